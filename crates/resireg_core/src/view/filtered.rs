//! Model-aware filtered projection over one entity collection.
//!
//! # Responsibility
//! - Hold a predicate that may inspect the whole dataset, not only the item.
//! - Yield the items of the current dataset that pass it, on demand.
//!
//! # Invariants
//! - Visible items keep the collection order.
//! - `current_sequence` evaluates the predicate against the dataset it is
//!   given; it never yields an item the predicate rejects.
//! - `len`/`is_empty` report the count as of the last `refilter` or
//!   `set_predicate`.

use crate::model::allocation::Allocation;
use crate::model::identity::Identity;
use crate::model::room::Room;
use crate::model::student::Student;
use crate::store::{Dataset, ReadOnlyDataset};
use std::fmt::{Debug, Formatter};

/// Predicate over one item and the dataset it lives in.
pub type ModelPredicate<T> = Box<dyn Fn(&T, &Dataset) -> bool>;

/// Entity types that a [`FilteredView`] can project.
pub trait Listed: Identity + Sized + 'static {
    /// Ordered collection of `Self` inside `dataset`.
    fn collection(dataset: &Dataset) -> &[Self];
}

impl Listed for Student {
    fn collection(dataset: &Dataset) -> &[Self] {
        dataset.students()
    }
}

impl Listed for Room {
    fn collection(dataset: &Dataset) -> &[Self] {
        dataset.rooms()
    }
}

impl Listed for Allocation {
    fn collection(dataset: &Dataset) -> &[Self] {
        dataset.allocations()
    }
}

pub struct FilteredView<T> {
    predicate: ModelPredicate<T>,
    visible_count: usize,
}

impl<T: Listed> FilteredView<T> {
    /// Creates a view showing every item of `dataset`.
    pub fn new(dataset: &Dataset) -> Self {
        let mut view = Self {
            predicate: Box::new(|_: &T, _: &Dataset| true),
            visible_count: 0,
        };
        view.refilter(dataset);
        view
    }

    /// Replaces the predicate and re-evaluates it immediately.
    pub fn set_predicate<P>(&mut self, predicate: P, dataset: &Dataset)
    where
        P: Fn(&T, &Dataset) -> bool + 'static,
    {
        self.predicate = Box::new(predicate);
        self.refilter(dataset);
    }

    /// Sets a predicate that only looks at the item itself.
    pub fn set_item_predicate<P>(&mut self, predicate: P, dataset: &Dataset)
    where
        P: Fn(&T) -> bool + 'static,
    {
        self.set_predicate(move |item: &T, _: &Dataset| predicate(item), dataset);
    }

    /// Re-applies the current predicate to the current dataset.
    ///
    /// Must run after any write that may change a predicate result, including
    /// writes to other collections (allocating a room changes "vacant").
    pub fn refilter(&mut self, dataset: &Dataset) {
        self.visible_count = self.current_sequence(dataset).count();
    }

    /// Lazily yields the items of `dataset` that pass the predicate, in
    /// collection order.
    ///
    /// Each call starts a fresh pass over the current contents.
    pub fn current_sequence<'a>(
        &'a self,
        dataset: &'a Dataset,
    ) -> impl Iterator<Item = &'a T> + 'a {
        let predicate = &self.predicate;
        T::collection(dataset)
            .iter()
            .filter(move |item| predicate(*item, dataset))
    }

    pub fn len(&self) -> usize {
        self.visible_count
    }

    pub fn is_empty(&self) -> bool {
        self.visible_count == 0
    }
}

impl<T> Debug for FilteredView<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FilteredView")
            .field("visible_count", &self.visible_count)
            .finish_non_exhaustive()
    }
}
