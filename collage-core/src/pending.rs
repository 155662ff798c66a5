//! # Pending transformations
//!
//! An interactive translate or scale, in flight between the key press that started it and the release that
//! commits it. It lives outside the action log; the projector overlays it so the gesture previews live.

use crate::{
    actions::Action,
    state::{transform::Point, SpriteList},
    SpriteID,
};

/// Scale gestures measure pointer distance from the sprite's center. Starting closer than this is treated as
/// starting this far away, so a gesture begun dead center can't divide by zero.
pub const MIN_SCALE_RADIUS: f32 = 1.0;

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, strum::AsRefStr)]
pub enum TransformKind {
    /// Drag to move.
    Translate,
    /// Drag toward or away from the sprite's center to resize about it.
    Scale,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PendingTransformation {
    pub kind: TransformKind,
    pub target: SpriteID,
    /// Pointer position when the gesture started.
    pub start: Point,
    /// Latest pointer position.
    pub current: Point,
}
impl PendingTransformation {
    #[must_use]
    pub fn new(kind: TransformKind, target: SpriteID, pointer: Point) -> Self {
        Self {
            kind,
            target,
            start: pointer,
            current: pointer,
        }
    }
    /// The action this gesture would commit, were it released against `sprites` right now.
    ///
    /// A missing target yields an action anyway (relative to a zeroed base). It will not apply.
    #[must_use]
    pub fn finalize(&self, sprites: &SpriteList) -> Action {
        let sprite = sprites.get(self.target);
        match self.kind {
            TransformKind::Translate => {
                let base = sprite.map_or(Point::ZERO, |sprite| Point::new(sprite.x, sprite.y));
                let moved = base + (self.current - self.start);
                Action::Translate {
                    target: self.target,
                    x: moved.x,
                    y: moved.y,
                }
            }
            TransformKind::Scale => {
                let (center, old_width) =
                    sprite.map_or((Point::ZERO, 0.0), |sprite| (sprite.center(), sprite.width));
                let start_distance = center.distance(self.start).max(MIN_SCALE_RADIUS);
                let current_distance = center.distance(self.current);
                let width = old_width * (current_distance / start_distance);
                Action::Scale {
                    target: self.target,
                    width: if width.is_finite() { width } else { old_width },
                }
            }
        }
    }
}
