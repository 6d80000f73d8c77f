//! Aggregate of students, rooms and allocations.
//!
//! # Responsibility
//! - Own one identity-keyed list per entity type.
//! - Enforce allocation reference and one-to-one rules on single-item writes.
//!
//! # Invariants
//! - An allocation added or edited through this type references an existing
//!   student and room.
//! - At most one allocation references a given student, and at most one a
//!   given room.
//! - Removing a student or room does not check allocations; callers guard it
//!   (see `Mutation::apply_to`).
//! - Bulk setters skip reference checks; snapshots are consistent by
//!   construction.

use super::{EntityError, EntityResult, UniqueList};
use crate::model::allocation::{Allocation, AllocationKey};
use crate::model::identity::{EntityKind, Identity};
use crate::model::room::{Room, RoomKey};
use crate::model::student::{Student, StudentId};
use std::collections::HashSet;

/// Read-only access to the ordered collections of a dataset.
///
/// This is the contract handed to persistence and rendering collaborators.
pub trait ReadOnlyDataset {
    fn students(&self) -> &[Student];
    fn rooms(&self) -> &[Room];
    fn allocations(&self) -> &[Allocation];
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dataset {
    students: UniqueList<Student>,
    rooms: UniqueList<Room>,
    allocations: UniqueList<Allocation>,
}

impl Dataset {
    pub fn new() -> Self {
        Self::default()
    }

    // Students

    pub fn has_student(&self, student: &Student) -> bool {
        self.students.contains(student)
    }

    pub fn student(&self, id: &StudentId) -> Option<&Student> {
        self.students.get(id)
    }

    pub fn add_student(&mut self, student: Student) -> EntityResult<()> {
        self.students.add(student)
    }

    pub fn remove_student(&mut self, student: &Student) -> EntityResult<()> {
        self.students.remove(student).map(|_| ())
    }

    pub fn replace_student(&mut self, target: &Student, edited: Student) -> EntityResult<()> {
        self.students.replace(target, edited)
    }

    // Rooms

    pub fn has_room(&self, room: &Room) -> bool {
        self.rooms.contains(room)
    }

    pub fn room(&self, key: &RoomKey) -> Option<&Room> {
        self.rooms.get(key)
    }

    pub fn add_room(&mut self, room: Room) -> EntityResult<()> {
        self.rooms.add(room)
    }

    pub fn remove_room(&mut self, room: &Room) -> EntityResult<()> {
        self.rooms.remove(room).map(|_| ())
    }

    pub fn replace_room(&mut self, target: &Room, edited: Room) -> EntityResult<()> {
        self.rooms.replace(target, edited)
    }

    // Allocations

    pub fn has_allocation(&self, allocation: &Allocation) -> bool {
        self.allocations.contains(allocation)
    }

    /// Adds `allocation` after checking both references.
    ///
    /// # Errors
    /// - `DuplicateEntity` when the same allocation already exists.
    /// - `DanglingReference` when the student or room is missing.
    /// - `AlreadyAllocated` when the student or room is taken by another
    ///   allocation.
    pub fn add_allocation(&mut self, allocation: Allocation) -> EntityResult<()> {
        if self.allocations.contains(&allocation) {
            return Err(EntityError::duplicate(&allocation));
        }
        self.check_allocation_links(&allocation, None)?;
        self.allocations.add(allocation)
    }

    pub fn remove_allocation(&mut self, allocation: &Allocation) -> EntityResult<()> {
        self.allocations.remove(allocation).map(|_| ())
    }

    /// Replaces `target` with `edited`, re-checking references for `edited`.
    ///
    /// `target` itself does not count as a conflicting allocation.
    pub fn replace_allocation(
        &mut self,
        target: &Allocation,
        edited: Allocation,
    ) -> EntityResult<()> {
        if !self.allocations.contains(target) {
            return Err(EntityError::not_found(target));
        }
        let target_key = target.identity();
        self.check_allocation_links(&edited, Some(&target_key))?;
        self.allocations.replace(target, edited)
    }

    pub fn is_student_allocated(&self, student: &Student) -> bool {
        self.allocation_for_student(&student.student_id).is_some()
    }

    pub fn is_room_allocated(&self, room: &Room) -> bool {
        self.allocation_for_room(&room.key()).is_some()
    }

    pub fn allocation_for_student(&self, id: &StudentId) -> Option<&Allocation> {
        self.allocations
            .iter()
            .find(|allocation| allocation.references_student(id))
    }

    pub fn allocation_for_room(&self, key: &RoomKey) -> Option<&Allocation> {
        self.allocations
            .iter()
            .find(|allocation| allocation.references_room(key))
    }

    // Bulk operations

    pub fn set_students(&mut self, students: Vec<Student>) -> EntityResult<()> {
        self.students.set_all(students)
    }

    pub fn set_rooms(&mut self, rooms: Vec<Room>) -> EntityResult<()> {
        self.rooms.set_all(rooms)
    }

    pub fn set_allocations(&mut self, allocations: Vec<Allocation>) -> EntityResult<()> {
        self.allocations.set_all(allocations)
    }

    /// Overwrites every collection with `other`'s contents.
    ///
    /// Students and rooms are replaced before allocations.
    pub fn reset_from(&mut self, other: &Dataset) {
        self.students.clone_from(&other.students);
        self.rooms.clone_from(&other.rooms);
        self.allocations.clone_from(&other.allocations);
    }

    /// Verifies allocation references across the whole dataset.
    ///
    /// Used for data that bypassed single-item checks, e.g. loaded from disk.
    pub fn check_consistency(&self) -> EntityResult<()> {
        let mut students = HashSet::new();
        let mut rooms = HashSet::new();
        for allocation in &self.allocations {
            if !self.students.contains_key(&allocation.student_id) {
                return Err(EntityError::DanglingReference {
                    kind: EntityKind::Student,
                    key: allocation.student_id.to_string(),
                });
            }
            let room_key = allocation.room_key();
            if !self.rooms.contains_key(&room_key) {
                return Err(EntityError::DanglingReference {
                    kind: EntityKind::Room,
                    key: room_key.to_string(),
                });
            }
            if !students.insert(allocation.student_id.clone()) {
                return Err(EntityError::AlreadyAllocated {
                    kind: EntityKind::Student,
                    key: allocation.student_id.to_string(),
                });
            }
            if !rooms.insert(room_key) {
                return Err(EntityError::AlreadyAllocated {
                    kind: EntityKind::Room,
                    key: room_key.to_string(),
                });
            }
        }
        Ok(())
    }

    fn check_allocation_links(
        &self,
        allocation: &Allocation,
        ignore: Option<&AllocationKey>,
    ) -> EntityResult<()> {
        if !self.students.contains_key(&allocation.student_id) {
            return Err(EntityError::DanglingReference {
                kind: EntityKind::Student,
                key: allocation.student_id.to_string(),
            });
        }
        let room_key = allocation.room_key();
        if !self.rooms.contains_key(&room_key) {
            return Err(EntityError::DanglingReference {
                kind: EntityKind::Room,
                key: room_key.to_string(),
            });
        }

        let is_other = |existing: &&Allocation| Some(&existing.identity()) != ignore;
        if self
            .allocations
            .iter()
            .filter(is_other)
            .any(|existing| existing.references_student(&allocation.student_id))
        {
            return Err(EntityError::AlreadyAllocated {
                kind: EntityKind::Student,
                key: allocation.student_id.to_string(),
            });
        }
        if self
            .allocations
            .iter()
            .filter(is_other)
            .any(|existing| existing.references_room(&room_key))
        {
            return Err(EntityError::AlreadyAllocated {
                kind: EntityKind::Room,
                key: room_key.to_string(),
            });
        }
        Ok(())
    }
}

impl ReadOnlyDataset for Dataset {
    fn students(&self) -> &[Student] {
        self.students.as_slice()
    }

    fn rooms(&self) -> &[Room] {
        self.rooms.as_slice()
    }

    fn allocations(&self) -> &[Allocation] {
        self.allocations.as_slice()
    }
}

#[cfg(test)]
mod tests {
    use super::{Dataset, ReadOnlyDataset};
    use crate::model::allocation::Allocation;
    use crate::model::identity::EntityKind;
    use crate::model::room::Room;
    use crate::model::student::Student;
    use crate::store::EntityError;

    fn student(id: &str) -> Student {
        Student::parse("Bernice Yu", "99272758", "berniceyu@example.com", "FASS", id)
            .expect("valid student")
    }

    fn room(floor: u16, number: u16) -> Room {
        Room::parse(floor, number, "CN").expect("valid room")
    }

    #[test]
    fn lookups_match_by_identity() {
        let mut data = Dataset::new();
        data.add_student(student("E0000001")).unwrap();
        data.add_room(room(1, 1)).unwrap();
        let allocation = Allocation::between(&student("E0000001"), &room(1, 1));
        data.add_allocation(allocation.clone()).unwrap();

        let edited = Student::parse("Irfan", "9249", "i@x.com", "SDE", "E0000001")
            .expect("valid student");
        assert!(data.has_student(&edited));
        assert!(!data.has_student(&student("E0000002")));
        assert!(data.has_room(&Room::parse(1, 1, "SA").unwrap()));
        assert!(!data.has_room(&room(1, 2)));
        assert!(data.has_allocation(&allocation));

        let id = student("E0000001").student_id;
        assert_eq!(data.student(&id), Some(&student("E0000001")));
        assert_eq!(data.room(&room(1, 1).key()), Some(&room(1, 1)));
        assert_eq!(data.allocation_for_student(&id), Some(&allocation));
        assert_eq!(data.allocation_for_room(&room(1, 1).key()), Some(&allocation));
        assert_eq!(data.allocation_for_room(&room(1, 2).key()), None);
    }

    #[test]
    fn replace_allocation_may_move_to_free_room() {
        let mut data = Dataset::new();
        data.add_student(student("E0000001")).unwrap();
        data.add_room(room(1, 1)).unwrap();
        data.add_room(room(1, 2)).unwrap();
        let original = Allocation::between(&student("E0000001"), &room(1, 1));
        data.add_allocation(original.clone()).unwrap();

        let moved = Allocation::between(&student("E0000001"), &room(1, 2));
        data.replace_allocation(&original, moved.clone()).unwrap();

        assert_eq!(data.allocations(), &[moved]);
        assert!(!data.is_room_allocated(&room(1, 1)));
        assert!(data.is_room_allocated(&room(1, 2)));
    }

    #[test]
    fn replace_allocation_rejects_taken_room() {
        let mut data = Dataset::new();
        data.add_student(student("E0000001")).unwrap();
        data.add_student(student("E0000002")).unwrap();
        data.add_room(room(1, 1)).unwrap();
        data.add_room(room(1, 2)).unwrap();
        let first = Allocation::between(&student("E0000001"), &room(1, 1));
        data.add_allocation(first.clone()).unwrap();
        data.add_allocation(Allocation::between(&student("E0000002"), &room(1, 2)))
            .unwrap();
        let before = data.clone();

        let err = data
            .replace_allocation(&first, Allocation::between(&student("E0000001"), &room(1, 2)))
            .unwrap_err();
        assert_eq!(
            err,
            EntityError::AlreadyAllocated {
                kind: EntityKind::Room,
                key: "01-002".to_string(),
            }
        );
        assert_eq!(data, before);
    }

    #[test]
    fn check_consistency_flags_dangling_bulk_data() {
        let mut data = Dataset::new();
        data.add_room(room(2, 2)).unwrap();
        data.set_allocations(vec![Allocation::between(&student("E0000009"), &room(2, 2))])
            .unwrap();

        let err = data.check_consistency().unwrap_err();
        assert!(matches!(
            err,
            EntityError::DanglingReference {
                kind: EntityKind::Student,
                ..
            }
        ));
    }

    #[test]
    fn reset_from_copies_every_collection() {
        let mut source = Dataset::new();
        source.add_student(student("E0000001")).unwrap();
        source.add_room(room(1, 1)).unwrap();
        source
            .add_allocation(Allocation::between(&student("E0000001"), &room(1, 1)))
            .unwrap();

        let mut target = Dataset::new();
        target.add_room(room(9, 9)).unwrap();
        target.reset_from(&source);

        assert_eq!(target, source);
    }
}
