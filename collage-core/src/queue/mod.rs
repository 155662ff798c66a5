//! Action Queue
//!
//! The queue owns the action log, the redo stack and the pending transformation. It is the ground truth for the
//! sprite set: everything else is a [projection](crate::projector) of it.
//!
//! The log only grows at the tail (new actions, redos) or shrinks from the tail (undos). Any new action discards
//! the redo stack. While a transformation is pending, the log is frozen: pushes, undos and redos are refused until
//! it is committed or cancelled.
//!
//! Listeners can observe the queue at various points in time; at any point they can ask whether anything changed
//! since they last looked and bring themselves back to the present.

use crate::{
    actions::Action,
    pending::{PendingTransformation, TransformKind},
    projector,
    state::{transform::Point, SpriteList},
    SpriteID,
};

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum QueueError {
    #[error("a transformation is in progress")]
    PendingTransformation,
    #[error("a transformation is already in progress")]
    AlreadyTransforming,
    #[error("nothing to undo")]
    NothingToUndo,
    #[error("nothing to redo")]
    NothingToRedo,
}

#[derive(Default)]
pub struct ActionQueue {
    /// Oldest first.
    actions: Vec<Action>,
    /// Undone actions, the most recently undone last.
    redo: Vec<Action>,
    pending: Option<PendingTransformation>,
    /// Bumped on every observable change, see [`QueueListener`].
    generation: u64,
}
impl ActionQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
    #[must_use]
    pub fn actions(&self) -> &[Action] {
        &self.actions
    }
    #[must_use]
    pub fn redo_stack(&self) -> &[Action] {
        &self.redo
    }
    #[must_use]
    pub fn pending(&self) -> Option<&PendingTransformation> {
        self.pending.as_ref()
    }
    /// The current sprites, including the preview of any pending transformation.
    #[must_use]
    pub fn sprites(&self) -> SpriteList {
        projector::project(&self.actions, self.pending.as_ref())
    }
    /// The sprites as committed to the log, ignoring any pending transformation.
    #[must_use]
    pub fn committed_sprites(&self) -> SpriteList {
        projector::project(&self.actions, None)
    }
    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.pending.is_none() && projector::meaningful(&self.actions).any()
    }
    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.pending.is_none() && !self.redo.is_empty()
    }
    /// Append a committed edit. Clears the redo stack.
    /// # Errors
    /// [`QueueError::PendingTransformation`] if a transformation is in progress.
    pub fn push(&mut self, action: Action) -> Result<(), QueueError> {
        if self.pending.is_some() {
            return Err(QueueError::PendingTransformation);
        }
        self.append(action);
        Ok(())
    }
    /// Undo the most recent action that made a difference.
    ///
    /// The log is collapsed first: every action that didn't change the sprite set when replayed is dropped, so
    /// undo never spends a step on something the user can't see.
    /// # Errors
    /// * [`QueueError::PendingTransformation`] if a transformation is in progress.
    /// * [`QueueError::NothingToUndo`] if no action in the log made a difference.
    pub fn undo(&mut self) -> Result<(), QueueError> {
        if self.pending.is_some() {
            return Err(QueueError::PendingTransformation);
        }
        let mask = projector::meaningful(&self.actions);
        if mask.not_any() {
            return Err(QueueError::NothingToUndo);
        }
        let mut collapsed: Vec<Action> = std::mem::take(&mut self.actions)
            .into_iter()
            .zip(mask.iter().by_vals())
            .filter_map(|(action, meaningful)| meaningful.then_some(action))
            .collect();
        // Some - mask has at least one set bit.
        if let Some(undone) = collapsed.pop() {
            log::trace!("Undo {undone:?}");
            self.redo.push(undone);
        }
        self.actions = collapsed;
        self.generation += 1;
        Ok(())
    }
    /// Re-append the most recently undone action.
    /// # Errors
    /// * [`QueueError::PendingTransformation`] if a transformation is in progress.
    /// * [`QueueError::NothingToRedo`] if the redo stack is empty.
    pub fn redo(&mut self) -> Result<(), QueueError> {
        if self.pending.is_some() {
            return Err(QueueError::PendingTransformation);
        }
        let action = self.redo.pop().ok_or(QueueError::NothingToRedo)?;
        log::trace!("Redo {action:?}");
        self.actions.push(action);
        self.generation += 1;
        Ok(())
    }
    /// Start an interactive transformation of `target` with the pointer at `pointer`.
    /// # Errors
    /// [`QueueError::AlreadyTransforming`] if one is already in progress. It is left untouched.
    pub fn begin_transformation(
        &mut self,
        kind: TransformKind,
        target: SpriteID,
        pointer: Point,
    ) -> Result<(), QueueError> {
        if self.pending.is_some() {
            return Err(QueueError::AlreadyTransforming);
        }
        self.pending = Some(PendingTransformation::new(kind, target, pointer));
        self.generation += 1;
        Ok(())
    }
    /// Track the pointer. Returns true if a pending transformation moved with it.
    pub fn move_pointer(&mut self, pointer: Point) -> bool {
        match &mut self.pending {
            Some(pending) => {
                pending.current = pointer;
                self.generation += 1;
                true
            }
            None => false,
        }
    }
    /// Discard the pending transformation, if any, without touching the log.
    pub fn cancel_transformation(&mut self) -> Option<PendingTransformation> {
        let cancelled = self.pending.take();
        if cancelled.is_some() {
            self.generation += 1;
        }
        cancelled
    }
    /// Finalize the pending transformation against the committed sprites and append the result,
    /// in one step. Returns the appended action, or None if nothing was pending.
    pub fn commit_transformation(&mut self) -> Option<&Action> {
        let pending = self.pending.take()?;
        let action = pending.finalize(&self.committed_sprites());
        self.append(action);
        self.actions.last()
    }
    /// Create a listener that reports everything as new on its first look.
    #[must_use]
    pub fn listen_from_start(&self) -> QueueListener {
        QueueListener { seen: None }
    }
    /// Create a listener that will only see new activity.
    #[must_use]
    pub fn listen_from_now(&self) -> QueueListener {
        QueueListener {
            seen: Some(self.generation),
        }
    }
    fn append(&mut self, action: Action) {
        log::trace!("Writing new action: {action:#?}");
        self.actions.push(action);
        self.redo.clear();
        self.generation += 1;
    }
}

/// Cursor over a queue's history of changes.
pub struct QueueListener {
    seen: Option<u64>,
}
impl QueueListener {
    /// Moves the cursor up-to-date with the queue, not reporting the changes.
    /// Returns `true` if any change occurred since the last call.
    pub fn forward(&mut self, queue: &ActionQueue) -> bool {
        let changed = self.seen != Some(queue.generation);
        self.seen = Some(queue.generation);
        changed
    }
}
