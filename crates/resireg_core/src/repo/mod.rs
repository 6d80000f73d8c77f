//! Persistence adapters for the registry dataset.
//!
//! # Responsibility
//! - Define the storage contract consumed by the registry service.
//! - Isolate SQLite query details from store and service code.
//!
//! # Invariants
//! - Repositories read datasets through `ReadOnlyDataset` only.
//! - Repository APIs return semantic errors (`InvalidData`) in addition to
//!   DB transport errors.

pub mod dataset_repo;
