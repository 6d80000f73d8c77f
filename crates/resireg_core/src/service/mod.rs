//! Use-case services built on top of the store and views.
//!
//! # Responsibility
//! - Coordinate store writes, history and view refresh for callers.
//!
//! # Invariants
//! - Services never bypass store validation.
//! - Services stay storage-agnostic; persistence comes in as a repository.

pub mod registry_service;
