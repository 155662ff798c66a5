//! # Actions
//!
//! Actions are the only way the sprite set changes. Every committed edit is appended to the
//! [action log](crate::queue::ActionQueue) and the sprites are recovered by replaying it, see [`crate::projector`].
//!
//! Actions are semantic and absolute ("move to 10,20", "make 50 wide") rather than deltas, so replaying one
//! against a state it wasn't written for still means something. An action that names a sprite which doesn't
//! exist (anymore) is simply skipped.

use std::sync::Arc;

use crate::{asset::ImageAsset, SpriteID};

#[derive(Clone, Debug)]
pub enum Action {
    /// Place a new sprite at 0,0 at the image's native size, as the frontmost layer.
    Create { image: Arc<ImageAsset> },
    Delete { target: SpriteID },
    /// Copy a sprite under a fresh id and name, as the frontmost layer.
    Duplicate { target: SpriteID },
    /// Move the sprite's top left corner to this absolute position.
    Translate { target: SpriteID, x: f32, y: f32 },
    /// Set an absolute width, about the sprite's center. Height follows from the aspect ratio.
    Scale { target: SpriteID, width: f32 },
    ReorderLayers {
        target: SpriteID,
        direction: LayerDirection,
    },
    /// Rename, resolving collisions at the time of application.
    Rename { target: SpriteID, name: String },
}
impl Action {
    /// The sprite this action refers to, if it refers to an existing one.
    #[must_use]
    pub fn target(&self) -> Option<SpriteID> {
        match self {
            Self::Create { .. } => None,
            Self::Delete { target }
            | Self::Duplicate { target }
            | Self::Translate { target, .. }
            | Self::Scale { target, .. }
            | Self::ReorderLayers { target, .. }
            | Self::Rename { target, .. } => Some(*target),
        }
    }
}

/// Movement within the back-to-front layer order.
#[derive(
    Copy,
    Clone,
    PartialEq,
    Eq,
    Hash,
    Debug,
    strum::AsRefStr,
    strum::EnumIter,
    serde::Serialize,
    serde::Deserialize,
)]
pub enum LayerDirection {
    /// Swap with the neighbor in front.
    MoveUp,
    /// Swap with the neighbor behind.
    MoveDown,
    MoveToTop,
    MoveToBottom,
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ActionError {
    #[error("{0} is not a live sprite")]
    UnknownSprite(SpriteID),
    #[error("action makes no changes")]
    NoOp,
}

pub trait ActionConsumer {
    /// Apply a single action. If this generates an error,
    /// the state of `self` should *not* be observably changed.
    fn apply(&mut self, action: &Action) -> Result<(), ActionError>;
}
