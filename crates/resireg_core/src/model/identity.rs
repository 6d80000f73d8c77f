//! Logical identity for registry entities.
//!
//! # Responsibility
//! - Separate "same real-world thing" from full field equality.
//!
//! # Invariants
//! - `identity()` depends only on identity fields, never on descriptive ones.
//! - Two values with equal identity keys are the same entity even when
//!   `PartialEq` says they differ.

use std::fmt::{Debug, Display, Formatter};
use std::hash::Hash;

/// Entity category, used to label errors and log events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Student,
    Room,
    Allocation,
}

impl EntityKind {
    /// Stable lowercase label.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Room => "room",
            Self::Allocation => "allocation",
        }
    }
}

impl Display for EntityKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identity comparison for values stored in a [`crate::store::UniqueList`].
///
/// Full equality stays on `PartialEq`; this trait only answers whether two
/// values denote the same entity.
pub trait Identity {
    /// Minimal key that identifies one entity.
    type Key: Clone + Eq + Hash + Debug + Display;

    /// Category label for errors.
    const KIND: EntityKind;

    /// Returns the identity key of this value.
    fn identity(&self) -> Self::Key;

    /// Returns whether `other` denotes the same entity.
    fn same_identity(&self, other: &Self) -> bool {
        self.identity() == other.identity()
    }
}
