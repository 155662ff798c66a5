//! # Sprites
//!
//! The sprite set as derived from the action log. Layer order is list order, back to front.
//! Nothing here is stored independently of the log; a [`SpriteList`] is rebuilt by replaying actions into it.

pub mod names;
pub mod transform;

use std::sync::Arc;

use crate::{
    actions::{Action, ActionConsumer, ActionError, LayerDirection},
    asset::ImageAsset,
    SpriteID,
};
use transform::{Point, Rect};

/// A placed instance of an image. Height is never stored, it always follows from width and the image's aspect.
#[derive(Clone, Debug)]
pub struct Sprite {
    pub id: SpriteID,
    pub name: String,
    pub image: Arc<ImageAsset>,
    /// Top left corner, in canvas pixels.
    pub x: f32,
    pub y: f32,
    pub width: f32,
}
impl Sprite {
    #[must_use]
    pub fn height(&self) -> f32 {
        self.image.height_for_width(self.width)
    }
    #[must_use]
    pub fn bounds(&self) -> Rect {
        Rect {
            origin: Point::new(self.x, self.y),
            width: self.width,
            height: self.height(),
        }
    }
    #[must_use]
    pub fn center(&self) -> Point {
        self.bounds().center()
    }
}
/// Structural equality, except images compare by identity rather than pixel content.
impl PartialEq for Sprite {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.name == other.name
            && Arc::ptr_eq(&self.image, &other.image)
            && self.x == other.x
            && self.y == other.y
            && self.width == other.width
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SpriteList(Vec<Sprite>);
// Public methods for client
impl SpriteList {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
    /// Back to front.
    #[must_use]
    pub fn as_slice(&self) -> &[Sprite] {
        &self.0
    }
    /// Iterate back to front, i.e. in painting order.
    pub fn iter(&self) -> std::slice::Iter<'_, Sprite> {
        self.0.iter()
    }
    /// Iterate front to back, i.e. in picking order.
    pub fn iter_front_to_back(&self) -> std::iter::Rev<std::slice::Iter<'_, Sprite>> {
        self.0.iter().rev()
    }
    #[must_use]
    pub fn get(&self, id: SpriteID) -> Option<&Sprite> {
        self.0.iter().find(|sprite| sprite.id == id)
    }
    /// Index of the sprite in back-to-front order.
    #[must_use]
    pub fn position(&self, id: SpriteID) -> Option<usize> {
        self.0.iter().position(|sprite| sprite.id == id)
    }
    #[must_use]
    pub fn frontmost(&self) -> Option<&Sprite> {
        self.0.last()
    }
    /// The id the next created sprite will receive.
    #[must_use]
    pub fn next_id(&self) -> SpriteID {
        SpriteID::next_after(self.0.iter().map(|sprite| sprite.id))
    }
}
// Private methods for the applier
impl SpriteList {
    fn get_mut(&mut self, id: SpriteID) -> Result<&mut Sprite, ActionError> {
        self.0
            .iter_mut()
            .find(|sprite| sprite.id == id)
            .ok_or(ActionError::UnknownSprite(id))
    }
    fn position_of(&self, id: SpriteID) -> Result<usize, ActionError> {
        self.position(id).ok_or(ActionError::UnknownSprite(id))
    }
    /// Resolve `ideal` against every live name, except the one belonging to `except`.
    fn resolve_name(&self, ideal: &str, except: Option<SpriteID>) -> String {
        let taken: hashbrown::HashSet<&str> = self
            .0
            .iter()
            .filter(|sprite| Some(sprite.id) != except)
            .map(|sprite| sprite.name.as_str())
            .collect();
        names::resolve(ideal, &taken)
    }
    /// Push as the new frontmost layer under a fresh id and a collision-free name.
    fn push_front(&mut self, ideal_name: &str, image: Arc<ImageAsset>, x: f32, y: f32, width: f32) {
        let sprite = Sprite {
            id: self.next_id(),
            name: self.resolve_name(ideal_name, None),
            image,
            x,
            y,
            width,
        };
        self.0.push(sprite);
    }
    fn reorder(&mut self, target: SpriteID, direction: LayerDirection) -> Result<(), ActionError> {
        let idx = self.position_of(target)?;
        let last = self.0.len() - 1;
        match direction {
            LayerDirection::MoveUp | LayerDirection::MoveToTop if idx == last => {
                Err(ActionError::NoOp)
            }
            LayerDirection::MoveDown | LayerDirection::MoveToBottom if idx == 0 => {
                Err(ActionError::NoOp)
            }
            LayerDirection::MoveUp => {
                self.0.swap(idx, idx + 1);
                Ok(())
            }
            LayerDirection::MoveDown => {
                self.0.swap(idx, idx - 1);
                Ok(())
            }
            LayerDirection::MoveToTop => {
                self.0[idx..].rotate_left(1);
                Ok(())
            }
            LayerDirection::MoveToBottom => {
                self.0[..=idx].rotate_right(1);
                Ok(())
            }
        }
    }
}
impl<'a> IntoIterator for &'a SpriteList {
    type Item = &'a Sprite;
    type IntoIter = std::slice::Iter<'a, Sprite>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl ActionConsumer for SpriteList {
    fn apply(&mut self, action: &Action) -> Result<(), ActionError> {
        match action {
            Action::Create { image } => {
                let (width, ideal_name) = (image.width() as f32, image.sprite_name());
                self.push_front(ideal_name, image.clone(), 0.0, 0.0, width);
                Ok(())
            }
            Action::Delete { target } => {
                let idx = self.position_of(*target)?;
                self.0.remove(idx);
                Ok(())
            }
            Action::Duplicate { target } => {
                let Sprite {
                    name,
                    image,
                    x,
                    y,
                    width,
                    ..
                } = self
                    .get(*target)
                    .ok_or(ActionError::UnknownSprite(*target))?
                    .clone();
                self.push_front(&name, image, x, y, width);
                Ok(())
            }
            Action::Translate { target, x, y } => {
                let sprite = self.get_mut(*target)?;
                if sprite.x == *x && sprite.y == *y {
                    return Err(ActionError::NoOp);
                }
                sprite.x = *x;
                sprite.y = *y;
                Ok(())
            }
            Action::Scale { target, width } => {
                let sprite = self.get_mut(*target)?;
                if sprite.width == *width {
                    return Err(ActionError::NoOp);
                }
                let height = sprite.image.height_for_width(*width);
                let resized = sprite.bounds().resized_about_center(*width, height);
                sprite.x = resized.origin.x;
                sprite.y = resized.origin.y;
                sprite.width = *width;
                Ok(())
            }
            Action::ReorderLayers { target, direction } => self.reorder(*target, *direction),
            Action::Rename { target, name } => {
                // Check existence first, name resolution borrows the whole list.
                self.position_of(*target)?;
                let resolved = self.resolve_name(name, Some(*target));
                let sprite = self.get_mut(*target)?;
                if sprite.name == resolved {
                    return Err(ActionError::NoOp);
                }
                sprite.name = resolved;
                Ok(())
            }
        }
    }
}
