//! # Projection
//!
//! The sprite set is never stored, it is recomputed by folding the action log from empty every time the log
//! (or the pending transformation) changes. Replay is total: an action that doesn't apply leaves the set as-is.

use bitvec::vec::BitVec;

use crate::{
    actions::{Action, ActionConsumer},
    pending::PendingTransformation,
    state::SpriteList,
};

/// Replay `actions` from an empty sprite set, then overlay the `pending` transformation if any.
///
/// The pending transformation is finalized against the committed state and applied as one last step,
/// exactly as it would be if it were committed right now.
#[must_use]
pub fn project(actions: &[Action], pending: Option<&PendingTransformation>) -> SpriteList {
    let mut sprites = fold(actions);
    if let Some(pending) = pending {
        let action = pending.finalize(&sprites);
        apply_lenient(&mut sprites, &action);
    }
    sprites
}

/// Replay actions from an empty sprite set.
#[must_use]
pub fn fold<'a>(actions: impl IntoIterator<Item = &'a Action>) -> SpriteList {
    let mut sprites = SpriteList::new();
    for action in actions {
        apply_lenient(&mut sprites, action);
    }
    sprites
}

/// For each action in the log, whether replaying it changed the sprite set.
///
/// Actions that didn't (targets deleted earlier, moves to where the sprite already was...) can be
/// dropped from the log without changing the outcome.
#[must_use]
pub fn meaningful(actions: &[Action]) -> BitVec {
    let mut mask = BitVec::with_capacity(actions.len());
    let mut sprites = SpriteList::new();
    for action in actions {
        // Consumers only succeed when they change something.
        mask.push(apply_lenient(&mut sprites, action));
    }
    mask
}

/// Apply, absorbing errors. Returns whether it applied.
fn apply_lenient(sprites: &mut SpriteList, action: &Action) -> bool {
    match sprites.apply(action) {
        Ok(()) => true,
        Err(e) => {
            log::trace!("skipped {action:?}: {e}");
            false
        }
    }
}
