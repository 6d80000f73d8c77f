use resireg_core::{
    Allocation, Dataset, EntityError, EntityKind, Mutation, ReadOnlyDataset, Room, Student,
    VersionedStore,
};

#[test]
fn undo_and_redo_walk_committed_states() {
    let s1 = student("E0000001", "Alex Yeoh");
    let r1 = room(1, 1);
    let mut store = VersionedStore::new(Dataset::new());

    store.apply(Mutation::AddStudent(s1.clone())).unwrap();
    store.commit();
    store.apply(Mutation::AddRoom(r1.clone())).unwrap();
    store.commit();
    store
        .apply(Mutation::AddAllocation(Allocation::between(&s1, &r1)))
        .unwrap();
    store.commit();
    assert_eq!(store.history_len(), 4);

    store.undo().unwrap();
    let data = store.snapshot_view();
    assert_eq!(data.students(), &[s1.clone()]);
    assert_eq!(data.rooms(), &[r1.clone()]);
    assert!(data.allocations().is_empty());

    store.undo().unwrap();
    assert_eq!(store.snapshot_view().students(), &[s1.clone()]);
    assert!(store.snapshot_view().rooms().is_empty());

    store.redo().unwrap();
    store.redo().unwrap();
    let data = store.snapshot_view();
    assert_eq!(data.students(), &[s1.clone()]);
    assert_eq!(data.rooms(), &[r1.clone()]);
    assert_eq!(data.allocations(), &[Allocation::between(&s1, &r1)]);
    assert!(!store.can_redo());
}

#[test]
fn undo_then_redo_restores_the_same_state() {
    let mut store = VersionedStore::default();
    store
        .apply(Mutation::AddStudent(student("E0000001", "Alex Yeoh")))
        .unwrap();
    store.commit();
    let before = store.snapshot_view().clone();

    store.undo().unwrap();
    store.redo().unwrap();

    assert_eq!(store.snapshot_view(), &before);
    assert_eq!(store.cursor(), 1);
    assert_eq!(store.history_len(), 2);
}

#[test]
fn commit_after_undo_discards_redo_states() {
    let mut store = VersionedStore::default();
    store
        .apply(Mutation::AddStudent(student("E0000001", "Alex Yeoh")))
        .unwrap();
    store.commit();
    store.apply(Mutation::AddRoom(room(2, 5))).unwrap();
    store.commit();

    store.undo().unwrap();
    store.undo().unwrap();
    assert!(store.can_redo());

    store.apply(Mutation::AddRoom(room(3, 7))).unwrap();
    store.commit();

    assert!(!store.can_redo());
    assert_eq!(store.history_len(), 2);
    assert_eq!(store.redo(), Err(EntityError::NoRedoableState));
}

#[test]
fn dangling_allocation_leaves_data_and_history_unchanged() {
    let s1 = student("E0000001", "Alex Yeoh");
    let mut store = VersionedStore::default();
    store.apply(Mutation::AddStudent(s1.clone())).unwrap();
    store.commit();
    let history_len = store.history_len();
    let before = store.snapshot_view().clone();

    let err = store
        .apply(Mutation::AddAllocation(Allocation::between(&s1, &room(9, 99))))
        .unwrap_err();

    assert_eq!(
        err,
        EntityError::DanglingReference {
            kind: EntityKind::Room,
            key: "09-099".to_string(),
        }
    );
    assert_eq!(store.history_len(), history_len);
    assert_eq!(store.snapshot_view(), &before);
}

#[test]
fn uncommitted_changes_are_dropped_by_undo() {
    let mut store = VersionedStore::default();
    store.apply(Mutation::AddRoom(room(1, 1))).unwrap();
    store.commit();
    store.apply(Mutation::AddRoom(room(1, 2))).unwrap();

    store.undo().unwrap();

    assert!(store.snapshot_view().rooms().is_empty());
    assert_eq!(store.history_len(), 2);
}

fn student(id: &str, name: &str) -> Student {
    Student::parse(name, "91234567", "alex@example.com", "Computing", id).unwrap()
}

fn room(floor: u16, number: u16) -> Room {
    Room::parse(floor, number, "CA").unwrap()
}
