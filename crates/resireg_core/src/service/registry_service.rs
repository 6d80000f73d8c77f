//! Registry use-case service.
//!
//! # Responsibility
//! - Single entry point for command-layer callers: mutate, commit, undo, redo.
//! - Keep the three filtered views in step with every state change.
//! - Hand the read-only dataset to a persistence repository.
//!
//! # Invariants
//! - Every successful mutation, undo and redo refilters all views.
//! - Failed mutations neither commit nor refilter.
//! - Saving never changes history or cursor, whether or not it succeeds.

use crate::model::allocation::Allocation;
use crate::model::room::Room;
use crate::model::student::Student;
use crate::repo::dataset_repo::{DatasetRepository, RepoResult};
use crate::store::{Dataset, EntityResult, Mutation, VersionedStore};
use crate::view::FilteredView;
use log::{info, warn};

/// Versioned store plus filtered views over each collection.
#[derive(Debug)]
pub struct RegistryService {
    store: VersionedStore,
    students: FilteredView<Student>,
    rooms: FilteredView<Room>,
    allocations: FilteredView<Allocation>,
}

impl Default for RegistryService {
    fn default() -> Self {
        Self::new(Dataset::new())
    }
}

impl RegistryService {
    /// Creates a service whose history starts at `initial`.
    pub fn new(initial: Dataset) -> Self {
        let store = VersionedStore::new(initial);
        let data = store.snapshot_view();
        let students = FilteredView::new(data);
        let rooms = FilteredView::new(data);
        let allocations = FilteredView::new(data);
        Self {
            store,
            students,
            rooms,
            allocations,
        }
    }

    /// Loads the stored dataset and starts a fresh history from it.
    pub fn load_from<R: DatasetRepository>(repo: &R) -> RepoResult<Self> {
        let dataset = repo.load_dataset()?;
        Ok(Self::new(dataset))
    }

    /// Applies one mutation without committing.
    pub fn apply(&mut self, mutation: Mutation) -> EntityResult<()> {
        self.store.apply(mutation)?;
        self.refilter_all();
        Ok(())
    }

    /// Applies one mutation and commits it when it succeeds.
    ///
    /// This is the usual path for a completed user command.
    pub fn execute(&mut self, mutation: Mutation) -> EntityResult<()> {
        self.apply(mutation)?;
        self.store.commit();
        Ok(())
    }

    pub fn commit(&mut self) {
        self.store.commit();
    }

    pub fn can_undo(&self) -> bool {
        self.store.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.store.can_redo()
    }

    pub fn undo(&mut self) -> EntityResult<()> {
        self.store.undo()?;
        self.refilter_all();
        Ok(())
    }

    pub fn redo(&mut self) -> EntityResult<()> {
        self.store.redo()?;
        self.refilter_all();
        Ok(())
    }

    /// Replaces the live dataset without committing.
    pub fn reset_data(&mut self, dataset: &Dataset) {
        self.store.reset_data(dataset);
        self.refilter_all();
    }

    /// Read-only live dataset, for persistence and rendering.
    pub fn snapshot_view(&self) -> &Dataset {
        self.store.snapshot_view()
    }

    pub fn store(&self) -> &VersionedStore {
        &self.store
    }

    pub fn update_student_filter<P>(&mut self, predicate: P)
    where
        P: Fn(&Student, &Dataset) -> bool + 'static,
    {
        self.students
            .set_predicate(predicate, self.store.snapshot_view());
    }

    pub fn update_room_filter<P>(&mut self, predicate: P)
    where
        P: Fn(&Room, &Dataset) -> bool + 'static,
    {
        self.rooms.set_predicate(predicate, self.store.snapshot_view());
    }

    pub fn update_allocation_filter<P>(&mut self, predicate: P)
    where
        P: Fn(&Allocation, &Dataset) -> bool + 'static,
    {
        self.allocations
            .set_predicate(predicate, self.store.snapshot_view());
    }

    pub fn filtered_students(&self) -> impl Iterator<Item = &Student> + '_ {
        self.students.current_sequence(self.store.snapshot_view())
    }

    pub fn filtered_rooms(&self) -> impl Iterator<Item = &Room> + '_ {
        self.rooms.current_sequence(self.store.snapshot_view())
    }

    pub fn filtered_allocations(&self) -> impl Iterator<Item = &Allocation> + '_ {
        self.allocations.current_sequence(self.store.snapshot_view())
    }

    /// Writes the live dataset through `repo`.
    ///
    /// History and cursor are left as they are on both success and failure.
    pub fn save_to<R: DatasetRepository>(&self, repo: &R) -> RepoResult<()> {
        match repo.save_dataset(self.store.snapshot_view()) {
            Ok(()) => {
                info!(
                    "event=registry_save module=service status=ok cursor={}",
                    self.store.cursor()
                );
                Ok(())
            }
            Err(err) => {
                warn!(
                    "event=registry_save module=service status=error cursor={} error={err}",
                    self.store.cursor()
                );
                Err(err)
            }
        }
    }

    fn refilter_all(&mut self) {
        let data = self.store.snapshot_view();
        self.students.refilter(data);
        self.rooms.refilter(data);
        self.allocations.refilter(data);
    }
}
