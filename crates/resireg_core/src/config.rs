//! Core runtime configuration.
//!
//! # Responsibility
//! - Load log and data-file settings from a JSON config file.
//! - Fill absent fields with build defaults.
//!
//! # Invariants
//! - A loaded config always has a valid log level and a non-empty data file.
//! - `log_dir`, when set, is absolute (same rule as `init_logging`).

use crate::logging::{default_log_level, normalize_level};
use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

pub const DEFAULT_DATA_FILE: &str = "resireg.sqlite3";

#[derive(Debug)]
pub enum ConfigError {
    Io { path: PathBuf, source: std::io::Error },
    Parse(serde_json::Error),
    Invalid(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read config `{}`: {source}", path.display())
            }
            Self::Parse(err) => write!(f, "failed to parse config: {err}"),
            Self::Invalid(message) => write!(f, "invalid config: {message}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse(err) => Some(err),
            Self::Invalid(_) => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value)
    }
}

/// Settings consumed by the CLI and host applications.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    pub log_level: &'static str,
    /// `None` disables file logging.
    pub log_dir: Option<PathBuf>,
    pub data_file: PathBuf,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_dir: None,
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    log_level: Option<String>,
    log_dir: Option<PathBuf>,
    data_file: Option<PathBuf>,
}

impl CoreConfig {
    /// Parses a JSON document such as
    /// `{"log_level": "info", "data_file": "data/resireg.sqlite3"}`.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig = serde_json::from_str(json)?;
        let defaults = Self::default();

        let log_level = match raw.log_level {
            Some(level) => normalize_level(&level)
                .map_err(|err| ConfigError::Invalid(err.to_string()))?,
            None => defaults.log_level,
        };
        if let Some(dir) = &raw.log_dir {
            if !dir.is_absolute() {
                return Err(ConfigError::Invalid(format!(
                    "log_dir must be an absolute path, got `{}`",
                    dir.display()
                )));
            }
        }
        let data_file = raw.data_file.unwrap_or(defaults.data_file);
        if data_file.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("data_file must not be empty".to_string()));
        }

        Ok(Self {
            log_level,
            log_dir: raw.log_dir,
            data_file,
        })
    }

    /// Reads and parses the config file at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, CoreConfig, DEFAULT_DATA_FILE};
    use std::path::PathBuf;

    #[test]
    fn empty_object_uses_defaults() {
        let config = CoreConfig::from_json_str("{}").expect("empty config should parse");
        assert_eq!(config, CoreConfig::default());
        assert_eq!(config.data_file, PathBuf::from(DEFAULT_DATA_FILE));
    }

    #[test]
    fn level_is_normalized() {
        let config = CoreConfig::from_json_str(r#"{"log_level": " WARNING "}"#).unwrap();
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn relative_log_dir_and_unknown_fields_are_rejected() {
        let err = CoreConfig::from_json_str(r#"{"log_dir": "logs"}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let err = CoreConfig::from_json_str(r#"{"theme": "dark"}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn missing_file_reports_io_error() {
        let err = CoreConfig::load("/nonexistent/resireg/config.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
