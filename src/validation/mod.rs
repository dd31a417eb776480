//! Form validation rules.
//!
//! Every validator checks all fields and returns the complete list of
//! problems at once, so a caller can show each field's errors together.

pub mod forms;
pub mod password;
pub mod records;

pub use forms::*;
pub use password::{is_email_valid, is_password_strong, PASSWORD_POLICY_MESSAGE};
pub use records::{check_records, InvalidRecord};

use serde::Serialize;
use thiserror::Error;

/// What is wrong with a single field.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "code", rename_all = "camelCase")]
pub enum ValidationErrorKind {
    #[error("is required")]
    Required,
    #[error("must be at least {min} characters")]
    MinLength { min: usize },
    #[error("must be at most {max} characters")]
    MaxLength { max: usize },
    #[error("must be at least {min}")]
    Min { min: i64 },
    #[error("must be at most {max}")]
    Max { max: i64 },
    #[error("is not a valid email address")]
    Email,
    #[error("does not meet the password policy")]
    PasswordStrength,
    #[error("does not match the password")]
    PasswordMismatch,
    #[error("repeats the key '{key}'")]
    DuplicateKey { key: String },
    #[error("is missing or expired")]
    MissingToken,
}

/// A validation problem tied to a form field.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("{field} {kind}")]
pub struct FieldError {
    pub field: String,
    pub kind: ValidationErrorKind,
}

/// All problems found in one form. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("invalid input: {}", summarize(.errors))]
pub struct ValidationErrors {
    pub errors: Vec<FieldError>,
}

fn summarize(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationErrors {
    /// Errors reported for `field`.
    pub fn for_field(&self, field: &str) -> Vec<&ValidationErrorKind> {
        self.errors
            .iter()
            .filter(|e| e.field == field)
            .map(|e| &e.kind)
            .collect()
    }

    /// Whether `field` has an error of the given kind.
    pub fn has(&self, field: &str, kind: &ValidationErrorKind) -> bool {
        self.errors.iter().any(|e| e.field == field && &e.kind == kind)
    }
}

/// Length of `value` as the web forms measure it, in UTF-16 code units.
pub(crate) fn text_length(value: &str) -> usize {
    value.encode_utf16().count()
}

/// Accumulates field errors while a form is checked.
#[derive(Debug, Default)]
pub(crate) struct Checks {
    errors: Vec<FieldError>,
}

impl Checks {
    pub(crate) fn push(&mut self, field: &str, kind: ValidationErrorKind) {
        self.errors.push(FieldError {
            field: field.to_string(),
            kind,
        });
    }

    /// Flag an empty value. Returns whether the value is present, so the
    /// remaining rules only run on non-empty input.
    pub(crate) fn required(&mut self, field: &str, value: &str) -> bool {
        if value.is_empty() {
            self.push(field, ValidationErrorKind::Required);
            false
        } else {
            true
        }
    }

    pub(crate) fn min_length(&mut self, field: &str, value: &str, min: usize) {
        if !value.is_empty() && text_length(value) < min {
            self.push(field, ValidationErrorKind::MinLength { min });
        }
    }

    pub(crate) fn max_length(&mut self, field: &str, value: &str, max: usize) {
        if text_length(value) > max {
            self.push(field, ValidationErrorKind::MaxLength { max });
        }
    }

    pub(crate) fn finish(self) -> Result<(), ValidationErrors> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors {
                errors: self.errors,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checks_collects_every_error() {
        let mut checks = Checks::default();
        assert!(!checks.required("name", ""));
        checks.min_length("code", "ab", 3);
        checks.max_length("code", "abcdef", 5);

        let errors = checks.finish().unwrap_err();
        assert_eq!(errors.errors.len(), 3);
        assert!(errors.has("name", &ValidationErrorKind::Required));
        assert_eq!(errors.for_field("code").len(), 2);
    }

    #[test]
    fn test_min_length_ignores_empty_values() {
        let mut checks = Checks::default();
        checks.min_length("password", "", 6);
        assert!(checks.finish().is_ok());
    }

    #[test]
    fn test_lengths_count_characters() {
        let mut checks = Checks::default();
        checks.max_length("name", "ñññ", 3);
        assert!(checks.finish().is_ok());
    }

    #[test]
    fn test_astral_characters_count_twice() {
        assert_eq!(text_length("😀"), 2);

        let mut checks = Checks::default();
        checks.max_length("name", "😀😀", 3);
        checks.min_length("password", "😀😀😀1", 7);
        let errors = checks.finish().unwrap_err();
        assert!(errors.has("name", &ValidationErrorKind::MaxLength { max: 3 }));
        assert!(errors.for_field("password").is_empty());
    }

    #[test]
    fn test_error_display() {
        let errors = ValidationErrors {
            errors: vec![
                FieldError {
                    field: "email".to_string(),
                    kind: ValidationErrorKind::Email,
                },
                FieldError {
                    field: "fullName".to_string(),
                    kind: ValidationErrorKind::MaxLength { max: 150 },
                },
            ],
        };

        assert_eq!(
            errors.to_string(),
            "invalid input: email is not a valid email address; fullName must be at most 150 characters"
        );
    }
}
