//! In-memory registry store with snapshot history.
//!
//! # Responsibility
//! - Hold the three entity collections and their cross-collection rules.
//! - Record committed states and move through them with undo/redo.
//!
//! # Invariants
//! - Every rejected mutation leaves data and history unchanged.
//! - Snapshots are never aliased by the live dataset.

use crate::model::identity::{EntityKind, Identity};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod dataset;
pub mod mutation;
pub mod unique_list;
pub mod versioned;

pub use dataset::{Dataset, ReadOnlyDataset};
pub use mutation::Mutation;
pub use unique_list::UniqueList;
pub use versioned::{Snapshot, VersionedStore};

pub type EntityResult<T> = Result<T, EntityError>;

/// Recoverable store-level failure.
///
/// `key` carries the rendered identity key of the offending entity, never its
/// descriptive fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntityError {
    /// An entity with the same identity already exists.
    DuplicateEntity { kind: EntityKind, key: String },
    /// No entity with this identity exists.
    EntityNotFound { kind: EntityKind, key: String },
    /// An allocation points at a student or room that does not exist.
    DanglingReference { kind: EntityKind, key: String },
    /// The student or room is already referenced by another allocation.
    AlreadyAllocated { kind: EntityKind, key: String },
    /// The student or room cannot be removed or re-keyed while allocated.
    StillAllocated { kind: EntityKind, key: String },
    NoUndoableState,
    NoRedoableState,
}

impl EntityError {
    pub(crate) fn duplicate<T: Identity>(item: &T) -> Self {
        Self::DuplicateEntity {
            kind: T::KIND,
            key: item.identity().to_string(),
        }
    }

    pub(crate) fn not_found<T: Identity>(item: &T) -> Self {
        Self::EntityNotFound {
            kind: T::KIND,
            key: item.identity().to_string(),
        }
    }

    /// Stable machine-readable code for log events.
    pub fn code(&self) -> &'static str {
        match self {
            Self::DuplicateEntity { .. } => "duplicate_entity",
            Self::EntityNotFound { .. } => "entity_not_found",
            Self::DanglingReference { .. } => "dangling_reference",
            Self::AlreadyAllocated { .. } => "already_allocated",
            Self::StillAllocated { .. } => "still_allocated",
            Self::NoUndoableState => "no_undoable_state",
            Self::NoRedoableState => "no_redoable_state",
        }
    }
}

impl Display for EntityError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateEntity { kind, key } => write!(f, "{kind} already exists: {key}"),
            Self::EntityNotFound { kind, key } => write!(f, "{kind} not found: {key}"),
            Self::DanglingReference { kind, key } => {
                write!(f, "allocation references missing {kind}: {key}")
            }
            Self::AlreadyAllocated { kind, key } => write!(f, "{kind} is already allocated: {key}"),
            Self::StillAllocated { kind, key } => {
                write!(f, "{kind} is still allocated, deallocate first: {key}")
            }
            Self::NoUndoableState => write!(f, "no more commands to undo"),
            Self::NoRedoableState => write!(f, "no more commands to redo"),
        }
    }
}

impl Error for EntityError {}
