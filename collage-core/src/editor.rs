//! # Editor
//!
//! Ties the queue, the hit tester and the paste buffer to input events: pointer motion, clicks, and
//! [`EditorCommand`] key presses and releases. It owns the only piece of interactive state that isn't part of
//! the log, the selection.
//!
//! Translate and Scale are held: pressing starts a gesture on the selected sprite, pointer motion previews it and
//! releasing commits it. Cancel acts on press. Every other command acts on release, on the selected sprite.
//! Commands that can't apply right now (nothing selected, gesture in progress, nothing to undo) are logged and
//! otherwise ignored.

use std::sync::Arc;

use crate::{
    actions::{Action, LayerDirection},
    asset::ImageAsset,
    hit_test::HitTester,
    paste::PasteBuffer,
    pending::TransformKind,
    queue::{ActionQueue, QueueError},
    state::{transform::Point, Sprite, SpriteList},
    SpriteID,
};

#[derive(
    serde::Serialize,
    serde::Deserialize,
    Hash,
    PartialEq,
    Eq,
    strum::AsRefStr,
    strum::EnumIter,
    Clone,
    Copy,
    Debug,
)]
pub enum EditorCommand {
    Translate,
    Scale,
    Cancel,

    Delete,
    Duplicate,

    LayerUp,
    LayerDown,
    LayerToTop,
    LayerToBottom,

    Undo,
    Redo,

    CopyWidth,
    CopyHeight,
    Paste,
}
impl EditorCommand {
    /// The gesture this command holds, if it's a held command.
    #[must_use]
    pub fn transform_kind(self) -> Option<TransformKind> {
        match self {
            Self::Translate => Some(TransformKind::Translate),
            Self::Scale => Some(TransformKind::Scale),
            _ => None,
        }
    }
    fn layer_direction(self) -> Option<LayerDirection> {
        match self {
            Self::LayerUp => Some(LayerDirection::MoveUp),
            Self::LayerDown => Some(LayerDirection::MoveDown),
            Self::LayerToTop => Some(LayerDirection::MoveToTop),
            Self::LayerToBottom => Some(LayerDirection::MoveToBottom),
            _ => None,
        }
    }
}

pub struct Editor {
    queue: ActionQueue,
    hit_tester: HitTester,
    pointer: Point,
    selected: Option<SpriteID>,
    paste: PasteBuffer,
}
impl Editor {
    /// An empty editor over a canvas of the given size.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            queue: ActionQueue::new(),
            hit_tester: HitTester::new(width, height),
            pointer: Point::ZERO,
            selected: None,
            paste: PasteBuffer::default(),
        }
    }
    #[must_use]
    pub fn queue(&self) -> &ActionQueue {
        &self.queue
    }
    /// Current sprites, including any gesture preview.
    #[must_use]
    pub fn sprites(&self) -> SpriteList {
        self.queue.sprites()
    }
    #[must_use]
    pub fn pointer(&self) -> Point {
        self.pointer
    }
    #[must_use]
    pub fn paste_buffer(&self) -> PasteBuffer {
        self.paste
    }
    /// The selected sprite's id, if it is still live.
    #[must_use]
    pub fn selected(&self) -> Option<SpriteID> {
        let id = self.selected?;
        self.queue.sprites().get(id).is_some().then_some(id)
    }
    /// Place a new sprite from `image` and select it.
    /// Returns None if a gesture is in progress.
    pub fn add_image(&mut self, image: Arc<ImageAsset>) -> Option<SpriteID> {
        let id = self.queue.committed_sprites().next_id();
        log::debug!("Adding {:?} as {id}", image.name());
        self.push(Action::Create { image })?;
        self.selected = Some(id);
        Some(id)
    }
    /// Rename the selected sprite. Returns whether an action was written.
    pub fn rename_selected(&mut self, name: impl Into<String>) -> bool {
        let Some(target) = self.selected() else {
            log::debug!("Rename with nothing selected");
            return false;
        };
        self.push(Action::Rename {
            target,
            name: name.into(),
        })
        .is_some()
    }
    /// Track the pointer. Returns whether the preview changed.
    pub fn pointer_move(&mut self, pointer: Point) -> bool {
        self.pointer = pointer;
        self.queue.move_pointer(pointer)
    }
    /// Select the topmost sprite drawn under `pointer`, or clear the selection if there is none.
    /// Ignored while a gesture is in progress.
    pub fn click(&mut self, pointer: Point) -> Option<SpriteID> {
        if self.queue.pending().is_some() {
            log::debug!("Click ignored, a transformation is in progress");
            return self.selected();
        }
        self.pointer = pointer;
        let sprites = self.queue.sprites();
        self.selected = self
            .hit_tester
            .hit_test(pointer, &sprites)
            .map(|sprite| sprite.id);
        self.selected
    }
    /// Returns whether anything happened.
    pub fn key_down(&mut self, command: EditorCommand) -> bool {
        if let Some(kind) = command.transform_kind() {
            let Some(target) = self.selected() else {
                log::debug!("{} with nothing selected", command.as_ref());
                return false;
            };
            return match self.queue.begin_transformation(kind, target, self.pointer) {
                Ok(()) => true,
                Err(err) => {
                    log::debug!("{} refused: {err}", command.as_ref());
                    false
                }
            };
        }
        match command {
            EditorCommand::Cancel => self.queue.cancel_transformation().is_some(),
            // Everything else acts on release.
            _ => false,
        }
    }
    /// Returns whether anything happened.
    pub fn key_up(&mut self, command: EditorCommand) -> bool {
        if let Some(kind) = command.transform_kind() {
            // Releasing the other gesture's key doesn't end this one.
            if self.queue.pending().map(|pending| pending.kind) != Some(kind) {
                return false;
            }
            return self.queue.commit_transformation().is_some();
        }
        if command == EditorCommand::Cancel {
            return false;
        }
        self.run(command)
    }
    /// Perform an instant command.
    fn run(&mut self, command: EditorCommand) -> bool {
        match command {
            EditorCommand::Undo => self.queue_op(command, ActionQueue::undo),
            EditorCommand::Redo => self.queue_op(command, ActionQueue::redo),
            _ => {
                let sprites = self.queue.sprites();
                let Some(sprite) = self.selected.and_then(|id| sprites.get(id)) else {
                    log::debug!("{} with nothing selected", command.as_ref());
                    return false;
                };
                self.run_on(command, sprite, &sprites)
            }
        }
    }
    fn run_on(&mut self, command: EditorCommand, sprite: &Sprite, sprites: &SpriteList) -> bool {
        let target = sprite.id;
        if let Some(direction) = command.layer_direction() {
            return self
                .push(Action::ReorderLayers { target, direction })
                .is_some();
        }
        match command {
            EditorCommand::Delete => self.push(Action::Delete { target }).is_some(),
            EditorCommand::Duplicate => {
                let copy = sprites.next_id();
                let pushed = self.push(Action::Duplicate { target }).is_some();
                if pushed {
                    self.selected = Some(copy);
                }
                pushed
            }
            EditorCommand::CopyWidth => {
                self.paste = PasteBuffer::capture_width(sprite);
                true
            }
            EditorCommand::CopyHeight => {
                self.paste = PasteBuffer::capture_height(sprite);
                true
            }
            EditorCommand::Paste => match self.paste.apply(sprite) {
                Some(action) => self.push(action).is_some(),
                None => {
                    log::debug!("Paste with an empty paste buffer");
                    false
                }
            },
            EditorCommand::Translate
            | EditorCommand::Scale
            | EditorCommand::Cancel
            | EditorCommand::Undo
            | EditorCommand::Redo
            | EditorCommand::LayerUp
            | EditorCommand::LayerDown
            | EditorCommand::LayerToTop
            | EditorCommand::LayerToBottom => false,
        }
    }
    fn queue_op(
        &mut self,
        command: EditorCommand,
        op: impl FnOnce(&mut ActionQueue) -> Result<(), QueueError>,
    ) -> bool {
        match op(&mut self.queue) {
            Ok(()) => true,
            Err(err) => {
                log::debug!("{} refused: {err}", command.as_ref());
                false
            }
        }
    }
    fn push(&mut self, action: Action) -> Option<()> {
        match self.queue.push(action) {
            Ok(()) => Some(()),
            Err(err) => {
                log::debug!("Action refused: {err}");
                None
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use image::{Rgba, RgbaImage};

    fn opaque(name: &str, width: u32, height: u32) -> Arc<ImageAsset> {
        let pixels = RgbaImage::from_pixel(width, height, Rgba([255, 255, 255, 255]));
        Arc::new(ImageAsset::new(name, pixels).unwrap())
    }
    fn position(editor: &Editor, id: SpriteID) -> (f32, f32, f32) {
        let sprites = editor.sprites();
        let sprite = sprites.get(id).unwrap();
        (sprite.x, sprite.y, sprite.width)
    }

    #[test]
    fn add_selects() {
        let mut editor = Editor::new(64, 64);
        assert_eq!(editor.selected(), None);
        let a = editor.add_image(opaque("a.png", 10, 10)).unwrap();
        let b = editor.add_image(opaque("b.png", 10, 10)).unwrap();
        assert_eq!((a, b), (SpriteID(0), SpriteID(1)));
        assert_eq!(editor.selected(), Some(b));
    }
    #[test]
    fn click_selects_topmost() {
        let mut editor = Editor::new(64, 64);
        editor.add_image(opaque("a.png", 10, 10));
        editor.add_image(opaque("b.png", 5, 5));
        assert_eq!(editor.click(Point::new(2.0, 2.0)), Some(SpriteID(1)));
        assert_eq!(editor.click(Point::new(8.0, 8.0)), Some(SpriteID(0)));
        assert_eq!(editor.click(Point::new(40.0, 40.0)), None);
        assert_eq!(editor.selected(), None);
    }
    #[test]
    fn translate_gesture() {
        let mut editor = Editor::new(64, 64);
        let id = editor.add_image(opaque("a.png", 10, 10)).unwrap();
        editor.pointer_move(Point::new(5.0, 5.0));
        assert!(editor.key_down(EditorCommand::Translate));
        assert!(editor.pointer_move(Point::new(15.0, 25.0)));
        assert_eq!(position(&editor, id), (10.0, 20.0, 10.0));
        // Still only a preview.
        assert_eq!(editor.queue().actions().len(), 1);

        // Releasing the other gesture doesn't commit.
        assert!(!editor.key_up(EditorCommand::Scale));
        assert!(editor.key_up(EditorCommand::Translate));
        assert_eq!(editor.queue().actions().len(), 2);
        assert_eq!(position(&editor, id), (10.0, 20.0, 10.0));
    }
    #[test]
    fn scale_gesture() {
        let mut editor = Editor::new(64, 64);
        let id = editor.add_image(opaque("a.png", 10, 10)).unwrap();
        editor.pointer_move(Point::new(10.0, 5.0));
        assert!(editor.key_down(EditorCommand::Scale));
        // Second gesture is refused while one is live.
        assert!(!editor.key_down(EditorCommand::Translate));
        editor.pointer_move(Point::new(15.0, 5.0));
        assert!(editor.key_up(EditorCommand::Scale));
        assert_eq!(position(&editor, id), (-5.0, -5.0, 20.0));
    }
    #[test]
    fn cancel_gesture() {
        let mut editor = Editor::new(64, 64);
        let id = editor.add_image(opaque("a.png", 10, 10)).unwrap();
        editor.key_down(EditorCommand::Translate);
        editor.pointer_move(Point::new(30.0, 30.0));
        // Clicks and instant commands are frozen out meanwhile.
        assert_eq!(editor.click(Point::new(50.0, 50.0)), Some(id));
        assert!(!editor.key_up(EditorCommand::Delete));

        assert!(editor.key_down(EditorCommand::Cancel));
        assert!(!editor.key_up(EditorCommand::Translate));
        assert_eq!(position(&editor, id), (0.0, 0.0, 10.0));
        assert_eq!(editor.queue().actions().len(), 1);
    }
    #[test]
    fn nothing_selected() {
        let mut editor = Editor::new(64, 64);
        editor.add_image(opaque("a.png", 10, 10));
        editor.click(Point::new(50.0, 50.0));
        for command in [
            EditorCommand::Translate,
            EditorCommand::Delete,
            EditorCommand::Duplicate,
            EditorCommand::CopyWidth,
        ] {
            assert!(!editor.key_down(command));
            assert!(!editor.key_up(command));
        }
        assert!(!editor.rename_selected("x"));
        assert_eq!(editor.queue().actions().len(), 1);
    }
    #[test]
    fn duplicate_delete_undo() {
        let mut editor = Editor::new(64, 64);
        let original = editor.add_image(opaque("a.png", 10, 10)).unwrap();
        assert!(editor.key_up(EditorCommand::Duplicate));
        let copy = editor.selected().unwrap();
        assert_ne!(copy, original);
        assert_eq!(editor.sprites().get(copy).unwrap().name, "a (1)");

        assert!(editor.key_up(EditorCommand::Delete));
        assert_eq!(editor.selected(), None);
        assert!(editor.key_up(EditorCommand::Undo));
        // The selection comes back with the sprite.
        assert_eq!(editor.selected(), Some(copy));
        assert!(editor.key_up(EditorCommand::Redo));
        assert!(!editor.key_up(EditorCommand::Redo));
        assert_eq!(editor.sprites().len(), 1);
    }
    #[test]
    fn copy_paste_width() {
        let mut editor = Editor::new(64, 64);
        let small = editor.add_image(opaque("small.png", 4, 2)).unwrap();
        let big = editor.add_image(opaque("big.png", 30, 30)).unwrap();
        assert!(!editor.key_up(EditorCommand::Paste));

        assert!(editor.key_up(EditorCommand::CopyWidth));
        // The small sprite is entirely covered by the big one, so it can't be clicked.
        assert_eq!(editor.click(Point::new(1.0, 1.0)), Some(big));
        editor.selected = Some(small);
        assert!(editor.key_up(EditorCommand::Paste));
        assert_eq!(editor.sprites().get(small).unwrap().width, 30.0);
    }
    #[test]
    fn rename() {
        let mut editor = Editor::new(64, 64);
        editor.add_image(opaque("a.png", 1, 1));
        let b = editor.add_image(opaque("b.png", 1, 1)).unwrap();
        assert!(editor.rename_selected("a"));
        assert_eq!(editor.sprites().get(b).unwrap().name, "a (1)");
    }
}
