//! A one-slot clipboard for sprite dimensions: copy one sprite's width or height, then resize another to match.

use crate::{actions::Action, state::Sprite};

#[derive(Copy, Clone, Debug, PartialEq, Default)]
pub enum PasteBuffer {
    /// Nothing captured, pasting does nothing.
    #[default]
    NoOp,
    Width(f32),
    Height(f32),
}
impl PasteBuffer {
    #[must_use]
    pub fn capture_width(source: &Sprite) -> Self {
        Self::Width(source.width)
    }
    #[must_use]
    pub fn capture_height(source: &Sprite) -> Self {
        Self::Height(source.height())
    }
    /// The scale that gives `target` the captured dimension, keeping its aspect ratio.
    #[must_use]
    pub fn apply(&self, target: &Sprite) -> Option<Action> {
        let width = match *self {
            Self::NoOp => return None,
            Self::Width(width) => width,
            Self::Height(height) => target.image.width_for_height(height),
        };
        Some(Action::Scale {
            target: target.id,
            width,
        })
    }
}
