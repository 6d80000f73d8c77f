//! Field-level validation for registry value types.
//!
//! # Responsibility
//! - Hold the shared patterns used by validated newtypes.
//! - Report rejected input as `ModelValidationError`.
//!
//! # Invariants
//! - A validated newtype can only be built through its `parse` function,
//!   including when it is deserialized.

use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub(crate) static STUDENT_ID_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^E\d{7}$").expect("valid student id regex"));
pub(crate) static NAME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[\p{Alphabetic}\p{N}][\p{Alphabetic}\p{N} ]*$").expect("valid name regex")
});
pub(crate) static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{3,}$").expect("valid phone regex"));
pub(crate) static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"^[A-Za-z0-9+_.\-]+@",
        r"[A-Za-z0-9]([A-Za-z0-9\-]*[A-Za-z0-9])?",
        r"(\.[A-Za-z0-9]([A-Za-z0-9\-]*[A-Za-z0-9])?)*$",
    ))
    .expect("valid email regex")
});

/// Rejected field value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelValidationError {
    InvalidStudentId(String),
    InvalidName(String),
    InvalidPhone(String),
    InvalidEmail(String),
    BlankFaculty,
    FloorOutOfRange(u16),
    RoomNumberOutOfRange(u16),
    UnknownRoomType(String),
}

impl Display for ModelValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidStudentId(value) => write!(
                f,
                "student id `{value}` must be `E` followed by 7 digits"
            ),
            Self::InvalidName(value) => write!(
                f,
                "name `{value}` must be non-blank and contain only letters, digits and spaces"
            ),
            Self::InvalidPhone(value) => {
                write!(f, "phone `{value}` must contain at least 3 digits and nothing else")
            }
            Self::InvalidEmail(value) => {
                write!(f, "email `{value}` is not of the form local@domain")
            }
            Self::BlankFaculty => write!(f, "faculty must not be blank"),
            Self::FloorOutOfRange(value) => write!(f, "floor {value} must be within 1..=99"),
            Self::RoomNumberOutOfRange(value) => {
                write!(f, "room number {value} must be within 1..=999")
            }
            Self::UnknownRoomType(value) => {
                write!(f, "room type `{value}` is unknown; expected CA|CN|SA|SN")
            }
        }
    }
}

impl Error for ModelValidationError {}

#[cfg(test)]
mod tests {
    use super::{EMAIL_RE, NAME_RE, PHONE_RE, STUDENT_ID_RE};

    #[test]
    fn student_id_pattern_requires_prefix_and_seven_digits() {
        assert!(STUDENT_ID_RE.is_match("E0123456"));
        assert!(!STUDENT_ID_RE.is_match("E012345"));
        assert!(!STUDENT_ID_RE.is_match("A0123456"));
    }

    #[test]
    fn name_pattern_rejects_symbols_and_leading_space() {
        assert!(NAME_RE.is_match("Alex Yeoh"));
        assert!(!NAME_RE.is_match(" Alex"));
        assert!(!NAME_RE.is_match("Alex*"));
    }

    #[test]
    fn phone_and_email_patterns() {
        assert!(PHONE_RE.is_match("91234567"));
        assert!(!PHONE_RE.is_match("91"));
        assert!(EMAIL_RE.is_match("alex.yeoh@u.nus.edu"));
        assert!(!EMAIL_RE.is_match("alex.yeoh"));
    }
}
