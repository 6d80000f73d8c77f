//! Filtered, model-aware projections for list rendering.
//!
//! # Responsibility
//! - Derive visible subsets of each collection on demand.
//!
//! # Invariants
//! - Views are pull-based: they change only on `set_predicate`/`refilter`.
//! - Views never mutate the dataset.

pub mod filtered;
pub mod predicates;

pub use filtered::{FilteredView, Listed, ModelPredicate};
