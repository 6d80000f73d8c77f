//! Allocation domain model.
//!
//! # Responsibility
//! - Link one student to one room by their identity keys.
//!
//! # Invariants
//! - An allocation stores keys only; the referenced entities live in the
//!   dataset and are resolved there.

use super::identity::{EntityKind, Identity};
use super::room::{Floor, Room, RoomKey, RoomNumber};
use super::student::{Student, StudentId};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Identity key of an allocation: the linked student and room.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AllocationKey {
    pub student_id: StudentId,
    pub room: RoomKey,
}

impl Display for AllocationKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}@{}", self.student_id, self.room)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Allocation {
    pub student_id: StudentId,
    pub floor: Floor,
    pub room_number: RoomNumber,
}

impl Allocation {
    pub fn new(student_id: StudentId, floor: Floor, room_number: RoomNumber) -> Self {
        Self {
            student_id,
            floor,
            room_number,
        }
    }

    /// Builds an allocation linking `student` to `room`.
    pub fn between(student: &Student, room: &Room) -> Self {
        Self::new(student.student_id.clone(), room.floor, room.room_number)
    }

    pub fn room_key(&self) -> RoomKey {
        RoomKey {
            floor: self.floor,
            number: self.room_number,
        }
    }

    pub fn references_student(&self, student_id: &StudentId) -> bool {
        self.student_id == *student_id
    }

    pub fn references_room(&self, room: &RoomKey) -> bool {
        self.room_key() == *room
    }
}

impl Identity for Allocation {
    type Key = AllocationKey;

    const KIND: EntityKind = EntityKind::Allocation;

    fn identity(&self) -> AllocationKey {
        AllocationKey {
            student_id: self.student_id.clone(),
            room: self.room_key(),
        }
    }
}

impl Display for Allocation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> #{}", self.student_id, self.room_key())
    }
}
