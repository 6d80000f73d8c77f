//! Core domain logic for the ResiReg residence registry.
//! This crate owns every registry invariant; front ends only issue mutations
//! and render filtered views.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod store;
pub mod view;

pub use config::{ConfigError, CoreConfig};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::allocation::{Allocation, AllocationKey};
pub use model::identity::{EntityKind, Identity};
pub use model::room::{Floor, Room, RoomKey, RoomNumber, RoomType};
pub use model::student::{Email, Faculty, PersonName, Phone, Student, StudentId};
pub use model::validation::ModelValidationError;
pub use repo::dataset_repo::{DatasetRepository, RepoError, RepoResult, SqliteDatasetRepository};
pub use service::registry_service::RegistryService;
pub use store::{
    Dataset, EntityError, EntityResult, Mutation, ReadOnlyDataset, Snapshot, UniqueList,
    VersionedStore,
};
pub use view::{FilteredView, Listed, ModelPredicate};

/// Minimal health-check API for host integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
