//! Student domain model.
//!
//! # Responsibility
//! - Define the resident record and its validated field types.
//!
//! # Invariants
//! - Identity is the matriculation number (`student_id`) alone.
//! - Every field is validated on construction and on deserialization.

use super::identity::{EntityKind, Identity};
use super::validation::{ModelValidationError, EMAIL_RE, NAME_RE, PHONE_RE, STUDENT_ID_RE};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Shared boilerplate for string newtypes built through `parse`.
macro_rules! validated_text {
    ($name:ident) => {
        impl $name {
            /// Borrows the normalized value.
            pub fn as_str(&self) -> &str {
                self.0.as_str()
            }
        }

        impl TryFrom<String> for $name {
            type Error = ModelValidationError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::parse(value.as_str())
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.0.as_str())
            }
        }
    };
}

/// Matriculation number, `E` followed by 7 digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StudentId(String);

impl StudentId {
    /// Parses and upper-cases a matriculation number.
    pub fn parse(value: &str) -> Result<Self, ModelValidationError> {
        let normalized = value.trim().to_ascii_uppercase();
        if !STUDENT_ID_RE.is_match(&normalized) {
            return Err(ModelValidationError::InvalidStudentId(value.to_string()));
        }
        Ok(Self(normalized))
    }
}

validated_text!(StudentId);

/// Display name of a student.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PersonName(String);

impl PersonName {
    pub fn parse(value: &str) -> Result<Self, ModelValidationError> {
        let trimmed = value.trim();
        if !NAME_RE.is_match(trimmed) {
            return Err(ModelValidationError::InvalidName(value.to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }
}

validated_text!(PersonName);

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Phone(String);

impl Phone {
    pub fn parse(value: &str) -> Result<Self, ModelValidationError> {
        let trimmed = value.trim();
        if !PHONE_RE.is_match(trimmed) {
            return Err(ModelValidationError::InvalidPhone(value.to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }
}

validated_text!(Phone);

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    pub fn parse(value: &str) -> Result<Self, ModelValidationError> {
        let trimmed = value.trim();
        if !EMAIL_RE.is_match(trimmed) {
            return Err(ModelValidationError::InvalidEmail(value.to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }
}

validated_text!(Email);

/// Faculty code or name, free-form but non-blank.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Faculty(String);

impl Faculty {
    pub fn parse(value: &str) -> Result<Self, ModelValidationError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ModelValidationError::BlankFaculty);
        }
        Ok(Self(trimmed.to_string()))
    }
}

validated_text!(Faculty);

/// Resident record.
///
/// Two students with the same `student_id` are the same entity; edits to the
/// descriptive fields keep identity and only break full equality.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub name: PersonName,
    pub phone: Phone,
    pub email: Email,
    pub faculty: Faculty,
    pub student_id: StudentId,
}

impl Student {
    pub fn new(
        name: PersonName,
        phone: Phone,
        email: Email,
        faculty: Faculty,
        student_id: StudentId,
    ) -> Self {
        Self {
            name,
            phone,
            email,
            faculty,
            student_id,
        }
    }

    /// Builds a student from raw text fields, validating each one.
    ///
    /// # Errors
    /// - Returns the first field that fails validation, in declaration order.
    pub fn parse(
        name: &str,
        phone: &str,
        email: &str,
        faculty: &str,
        student_id: &str,
    ) -> Result<Self, ModelValidationError> {
        Ok(Self::new(
            PersonName::parse(name)?,
            Phone::parse(phone)?,
            Email::parse(email)?,
            Faculty::parse(faculty)?,
            StudentId::parse(student_id)?,
        ))
    }
}

impl Identity for Student {
    type Key = StudentId;

    const KIND: EntityKind = EntityKind::Student;

    fn identity(&self) -> StudentId {
        self.student_id.clone()
    }
}

impl Display for Student {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.student_id)
    }
}

#[cfg(test)]
mod tests {
    use super::{Student, StudentId};
    use crate::model::identity::Identity;
    use crate::model::validation::ModelValidationError;

    fn alex() -> Student {
        Student::parse("Alex Yeoh", "87438807", "alexyeoh@example.com", "SOC", "E0123456")
            .expect("valid student")
    }

    #[test]
    fn student_id_is_normalized_to_upper_case() {
        let id = StudentId::parse(" e0123456 ").expect("lowercase prefix should normalize");
        assert_eq!(id.as_str(), "E0123456");
    }

    #[test]
    fn edited_descriptive_fields_keep_identity_but_break_equality() {
        let original = alex();
        let mut edited = original.clone();
        edited.faculty = super::Faculty::parse("FASS").expect("valid faculty");

        assert!(original.same_identity(&edited));
        assert_ne!(original, edited);
    }

    #[test]
    fn parse_reports_first_invalid_field() {
        let err = Student::parse("Alex", "1", "bad", "SOC", "E0123456").unwrap_err();
        assert_eq!(err, ModelValidationError::InvalidPhone("1".to_string()));
    }
}
