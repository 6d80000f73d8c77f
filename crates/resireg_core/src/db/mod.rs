//! Registry data file access.
//!
//! # Responsibility
//! - Open the registry file (or an in-memory twin for tests) ready for use.
//! - Bring the student/room/allocation tables up to the schema this build
//!   writes.
//!
//! # Invariants
//! - The schema version lives in `PRAGMA user_version`.
//! - A connection handed out by this module is fully migrated and enforces
//!   allocation foreign keys.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug)]
pub enum DbError {
    /// SQLite rejected an open, pragma or migration statement.
    Sqlite(rusqlite::Error),
    /// The registry file was written by a newer ResiReg build.
    SchemaTooNew {
        file_version: u32,
        supported_version: u32,
    },
    /// The registry file's parent directory could not be prepared.
    DataDir { path: PathBuf, message: String },
}

impl DbError {
    /// Stable machine-readable code for log events.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Sqlite(_) => "registry_sqlite",
            Self::SchemaTooNew { .. } => "registry_schema_too_new",
            Self::DataDir { .. } => "registry_data_dir",
        }
    }
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "registry storage error: {err}"),
            Self::SchemaTooNew {
                file_version,
                supported_version,
            } => write!(
                f,
                "registry file uses schema v{file_version}; this build reads up to v{supported_version}"
            ),
            Self::DataDir { path, message } => write!(
                f,
                "cannot prepare registry directory `{}`: {message}",
                path.display()
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::SchemaTooNew { .. } | Self::DataDir { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
