//! Snapshot history over a live dataset.
//!
//! # Responsibility
//! - Own the live dataset and every committed snapshot.
//! - Provide commit/undo/redo by moving a cursor through the history.
//!
//! # Invariants
//! - `cursor < history.len()` at all times.
//! - `history[cursor]` equals the live dataset after construction, after
//!   every commit and after every undo/redo.
//! - Undo/redo never change history length; commit drops every snapshot
//!   after the cursor before appending.

use super::{Dataset, EntityError, EntityResult, Mutation, ReadOnlyDataset};
use crate::model::allocation::Allocation;
use crate::model::room::Room;
use crate::model::student::Student;
use log::{debug, info};

/// Immutable copy of a dataset at one commit point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot(Dataset);

impl Snapshot {
    fn capture(dataset: &Dataset) -> Self {
        Self(dataset.clone())
    }

    pub fn as_dataset(&self) -> &Dataset {
        &self.0
    }
}

impl ReadOnlyDataset for Snapshot {
    fn students(&self) -> &[Student] {
        self.0.students()
    }

    fn rooms(&self) -> &[Room] {
        self.0.rooms()
    }

    fn allocations(&self) -> &[Allocation] {
        self.0.allocations()
    }
}

/// Live dataset plus committed snapshot history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionedStore {
    live: Dataset,
    history: Vec<Snapshot>,
    cursor: usize,
}

impl Default for VersionedStore {
    fn default() -> Self {
        Self::new(Dataset::new())
    }
}

impl VersionedStore {
    /// Creates a store whose first history entry is `initial`.
    pub fn new(initial: Dataset) -> Self {
        let history = vec![Snapshot::capture(&initial)];
        Self {
            live: initial,
            history,
            cursor: 0,
        }
    }

    /// Applies one mutation to the live dataset without committing.
    pub fn apply(&mut self, mutation: Mutation) -> EntityResult<()> {
        let kind = mutation.kind();
        let action = mutation.action();
        match mutation.apply_to(&mut self.live) {
            Ok(()) => {
                debug!("event=store_apply module=store status=ok kind={kind} action={action}");
                Ok(())
            }
            Err(err) => {
                debug!(
                    "event=store_apply module=store status=rejected kind={kind} action={action} error_code={}",
                    err.code()
                );
                Err(err)
            }
        }
    }

    /// Records the live dataset as the newest history point.
    ///
    /// Any undone states after the cursor are discarded first.
    pub fn commit(&mut self) {
        let discarded = self.history.len() - self.cursor - 1;
        self.history.truncate(self.cursor + 1);
        self.history.push(Snapshot::capture(&self.live));
        self.cursor += 1;
        info!(
            "event=store_commit module=store status=ok cursor={} history_len={} discarded={discarded}",
            self.cursor,
            self.history.len()
        );
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.history.len()
    }

    /// Restores the previous committed state.
    ///
    /// # Errors
    /// - `NoUndoableState` when the cursor is at the first snapshot.
    pub fn undo(&mut self) -> EntityResult<()> {
        if !self.can_undo() {
            return Err(EntityError::NoUndoableState);
        }
        self.cursor -= 1;
        self.live.reset_from(self.history[self.cursor].as_dataset());
        info!(
            "event=store_undo module=store status=ok cursor={} history_len={}",
            self.cursor,
            self.history.len()
        );
        Ok(())
    }

    /// Restores the next undone state.
    ///
    /// # Errors
    /// - `NoRedoableState` when the cursor is at the last snapshot.
    pub fn redo(&mut self) -> EntityResult<()> {
        if !self.can_redo() {
            return Err(EntityError::NoRedoableState);
        }
        self.cursor += 1;
        self.live.reset_from(self.history[self.cursor].as_dataset());
        info!(
            "event=store_redo module=store status=ok cursor={} history_len={}",
            self.cursor,
            self.history.len()
        );
        Ok(())
    }

    /// Read-only view of the live dataset.
    pub fn snapshot_view(&self) -> &Dataset {
        &self.live
    }

    /// Replaces the live contents wholesale without committing.
    pub fn reset_data(&mut self, dataset: &Dataset) {
        self.live.reset_from(dataset);
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Committed snapshot at `index`, oldest first.
    pub fn snapshot_at(&self, index: usize) -> Option<&Snapshot> {
        self.history.get(index)
    }
}
