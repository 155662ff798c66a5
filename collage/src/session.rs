//! # Session scripts
//!
//! A session is a recorded stream of input events, replayed through an [`Editor`] as if a user had made them.
//! Scripts are TOML:
//!
//! ```toml
//! [canvas]
//! width = 640
//! height = 480
//! background = [255, 255, 255, 255]
//!
//! [output]
//! image = "collage.png"
//! records = "collage.json"
//!
//! [[event]]
//! type = "add"
//! image = "cat.png"
//!
//! [[event]]
//! type = "key_down"
//! key = "KeyG"
//! ```

use std::{path::PathBuf, sync::Arc};

use anyhow::Context;
use collage_core::{
    asset::ImageAsset,
    autocrop,
    editor::Editor,
    export,
    queue::QueueListener,
    render::{RenderSettings, Renderer},
    state::transform::Point,
};
use image::{Rgba, RgbaImage};

use crate::actions::{
    self,
    hotkeys::{KeyboardHotkey, KeysToActions},
    ActionEvent,
};

#[derive(serde::Deserialize, Debug)]
#[serde(deny_unknown_fields)]
pub struct Script {
    #[serde(default)]
    pub canvas: Canvas,
    #[serde(default)]
    pub output: Output,
    #[serde(default, rename = "event")]
    pub events: Vec<Event>,
}
impl Script {
    /// # Errors
    /// The file can't be read or isn't a valid script.
    pub fn load(path: &std::path::Path) -> anyhow::Result<Self> {
        let string =
            std::fs::read_to_string(path).with_context(|| format!("reading script {path:?}"))?;
        toml::from_str(&string).with_context(|| format!("parsing script {path:?}"))
    }
}

#[derive(serde::Deserialize, Debug, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
    /// Straight RGBA.
    pub background: [u8; 4],
    /// Draw an outline around the selected sprite in the output image.
    pub outline_selection: bool,
}
impl Default for Canvas {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 768,
            background: [0; 4],
            outline_selection: false,
        }
    }
}

#[derive(serde::Deserialize, Debug, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Output {
    /// Rendered collage, PNG. Relative to the script's directory.
    pub image: PathBuf,
    /// Placement records, JSON. Relative to the script's directory.
    pub records: PathBuf,
}
impl Default for Output {
    fn default() -> Self {
        Self {
            image: "collage.png".into(),
            records: "collage.json".into(),
        }
    }
}

#[derive(serde::Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    /// Place a loaded image, by asset name.
    Add { image: String },
    Pointer { x: f32, y: f32 },
    Click { x: f32, y: f32 },
    KeyDown { key: KeyboardHotkey },
    KeyUp { key: KeyboardHotkey },
    /// Rename the selected sprite.
    Rename { name: String },
    /// Replace a loaded image with its autocropped version. Sprites already placed keep the original.
    Autocrop {
        image: String,
        #[serde(default)]
        padding: u32,
    },
}

pub struct Session<'keys> {
    editor: Editor,
    renderer: Renderer,
    /// Sorted by name.
    assets: Vec<Arc<ImageAsset>>,
    keys: &'keys KeysToActions,
    listener: QueueListener,
    painted_selection: Option<collage_core::SpriteID>,
    frames: usize,
}
impl<'keys> Session<'keys> {
    #[must_use]
    pub fn new(canvas: &Canvas, assets: Vec<Arc<ImageAsset>>, keys: &'keys KeysToActions) -> Self {
        let editor = Editor::new(canvas.width, canvas.height);
        let settings = RenderSettings {
            background: Rgba(canvas.background),
            selection_outline: canvas
                .outline_selection
                .then_some(RenderSettings::default().selection_outline)
                .flatten(),
        };
        let listener = editor.queue().listen_from_start();
        Self {
            renderer: Renderer::new(canvas.width, canvas.height, settings),
            editor,
            assets,
            keys,
            listener,
            painted_selection: None,
            frames: 0,
        }
    }
    #[must_use]
    pub fn editor(&self) -> &Editor {
        &self.editor
    }
    /// How many times the canvas was repainted.
    #[must_use]
    pub fn frames(&self) -> usize {
        self.frames
    }
    fn asset(&self, name: &str) -> Option<&Arc<ImageAsset>> {
        self.assets
            .binary_search_by(|asset| asset.name().cmp(name))
            .ok()
            .map(|idx| &self.assets[idx])
    }
    /// Replay events in order. Events that don't apply are logged and skipped.
    pub fn run<'e>(&mut self, events: impl IntoIterator<Item = &'e Event>) {
        for event in events {
            self.handle(event);
            self.repaint_if_changed();
        }
    }
    fn handle(&mut self, event: &Event) {
        log::trace!("Event {event:?}");
        match event {
            Event::Add { image } => {
                let Some(asset) = self.asset(image).cloned() else {
                    log::warn!("No image named {image:?} was loaded");
                    return;
                };
                self.editor.add_image(asset);
            }
            Event::Pointer { x, y } => {
                self.editor.pointer_move(Point::new(*x, *y));
            }
            Event::Click { x, y } => {
                self.editor.click(Point::new(*x, *y));
            }
            Event::KeyDown { key } => {
                actions::dispatch(&mut self.editor, self.keys, *key, ActionEvent::Press);
            }
            Event::KeyUp { key } => {
                actions::dispatch(&mut self.editor, self.keys, *key, ActionEvent::Release);
            }
            Event::Rename { name } => {
                self.editor.rename_selected(name.as_str());
            }
            Event::Autocrop { image, padding } => self.autocrop(image, *padding),
        }
    }
    fn autocrop(&mut self, name: &str, padding: u32) {
        let Ok(idx) = self
            .assets
            .binary_search_by(|asset| asset.name().cmp(name))
        else {
            log::warn!("No image named {name:?} was loaded");
            return;
        };
        let asset = &self.assets[idx];
        let Some(bounds) = autocrop::compute_crop_bounds(asset.pixels()) else {
            log::warn!("{name:?} is fully transparent, not cropping");
            return;
        };
        match autocrop::crop_and_pad(asset, bounds, padding) {
            Ok(cropped) => {
                log::info!(
                    "Cropped {name:?} to {}x{}",
                    cropped.asset.width(),
                    cropped.asset.height()
                );
                // Same name, so the sort order holds.
                self.assets[idx] = Arc::new(cropped.asset);
            }
            Err(e) => log::warn!("Failed to crop {name:?}: {e}"),
        }
    }
    fn repaint_if_changed(&mut self) {
        let changed = self.listener.forward(self.editor.queue());
        let selected = self.editor.selected();
        if !changed && selected == self.painted_selection {
            return;
        }
        self.renderer.paint(&self.editor.sprites(), selected);
        self.painted_selection = selected;
        self.frames += 1;
    }
    /// The final frame and the export records as JSON.
    /// # Errors
    /// Serializing the records failed.
    pub fn finish(mut self) -> anyhow::Result<(RgbaImage, String)> {
        // Covers a session with no events at all.
        self.repaint_if_changed();
        let records = export::to_json(&self.editor.sprites())?;
        log::info!(
            "Session done: {} actions, {} sprites, {} frames",
            self.editor.queue().actions().len(),
            self.editor.sprites().len(),
            self.frames
        );
        Ok((self.renderer.into_canvas(), records))
    }
}
