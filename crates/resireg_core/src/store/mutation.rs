//! Single-entity mutation requests.
//!
//! # Responsibility
//! - Give command-layer callers one request type for every dataset write.
//! - Guard removals and re-keying of allocated students/rooms.
//!
//! # Invariants
//! - Applying a mutation is atomic: on error the dataset is untouched.
//! - Applying a mutation never records history.

use super::{Dataset, EntityError, EntityResult};
use crate::model::allocation::Allocation;
use crate::model::identity::{EntityKind, Identity};
use crate::model::room::Room;
use crate::model::student::Student;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    AddStudent(Student),
    RemoveStudent(Student),
    ReplaceStudent { target: Student, edited: Student },
    AddRoom(Room),
    RemoveRoom(Room),
    ReplaceRoom { target: Room, edited: Room },
    AddAllocation(Allocation),
    RemoveAllocation(Allocation),
    ReplaceAllocation { target: Allocation, edited: Allocation },
}

impl Mutation {
    /// Entity category this mutation writes.
    pub fn kind(&self) -> EntityKind {
        match self {
            Self::AddStudent(_) | Self::RemoveStudent(_) | Self::ReplaceStudent { .. } => {
                EntityKind::Student
            }
            Self::AddRoom(_) | Self::RemoveRoom(_) | Self::ReplaceRoom { .. } => EntityKind::Room,
            Self::AddAllocation(_)
            | Self::RemoveAllocation(_)
            | Self::ReplaceAllocation { .. } => EntityKind::Allocation,
        }
    }

    /// Stable action label for log events.
    pub fn action(&self) -> &'static str {
        match self {
            Self::AddStudent(_) | Self::AddRoom(_) | Self::AddAllocation(_) => "add",
            Self::RemoveStudent(_) | Self::RemoveRoom(_) | Self::RemoveAllocation(_) => "remove",
            Self::ReplaceStudent { .. }
            | Self::ReplaceRoom { .. }
            | Self::ReplaceAllocation { .. } => "replace",
        }
    }

    /// Applies this request to `dataset`.
    ///
    /// # Errors
    /// - Any error of the underlying dataset operation.
    /// - `StillAllocated` when removing an allocated student/room, or when an
    ///   edit would change its identity.
    pub fn apply_to(self, dataset: &mut Dataset) -> EntityResult<()> {
        match self {
            Self::AddStudent(student) => dataset.add_student(student),
            Self::RemoveStudent(student) => {
                if dataset.is_student_allocated(&student) {
                    return Err(still_allocated(&student));
                }
                dataset.remove_student(&student)
            }
            Self::ReplaceStudent { target, edited } => {
                if !target.same_identity(&edited) && dataset.is_student_allocated(&target) {
                    return Err(still_allocated(&target));
                }
                dataset.replace_student(&target, edited)
            }
            Self::AddRoom(room) => dataset.add_room(room),
            Self::RemoveRoom(room) => {
                if dataset.is_room_allocated(&room) {
                    return Err(still_allocated(&room));
                }
                dataset.remove_room(&room)
            }
            Self::ReplaceRoom { target, edited } => {
                if !target.same_identity(&edited) && dataset.is_room_allocated(&target) {
                    return Err(still_allocated(&target));
                }
                dataset.replace_room(&target, edited)
            }
            Self::AddAllocation(allocation) => dataset.add_allocation(allocation),
            Self::RemoveAllocation(allocation) => dataset.remove_allocation(&allocation),
            Self::ReplaceAllocation { target, edited } => {
                dataset.replace_allocation(&target, edited)
            }
        }
    }
}

fn still_allocated<T: Identity>(item: &T) -> EntityError {
    EntityError::StillAllocated {
        kind: T::KIND,
        key: item.identity().to_string(),
    }
}
