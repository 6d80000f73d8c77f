//! Domain model for residential registry records.
//!
//! # Responsibility
//! - Define students, rooms and allocations with validated fields.
//! - Model logical identity separately from full equality.
//!
//! # Invariants
//! - Every entity implements `Identity`; uniqueness is decided by its key.
//! - Invalid field values cannot be constructed or deserialized.

pub mod allocation;
pub mod identity;
pub mod room;
pub mod student;
pub mod validation;
