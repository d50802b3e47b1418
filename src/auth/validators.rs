//! Client-side field validation
//!
//! Each validator checks a single raw input and is pure: the same input
//! always yields the same result. Name length is measured after trimming,
//! password length is not.

use crate::auth::models::Field;
use regex::Regex;
use std::sync::OnceLock;

pub const MIN_PASSWORD_LENGTH: usize = 6;
pub const MIN_NAME_LENGTH: usize = 2;

/// Byte order mark, treated as whitespace alongside Unicode `White_Space`
const BOM: char = '\u{FEFF}';

const EMAIL_PATTERN: &str = r"^[^\s\x{FEFF}@]+@[^\s\x{FEFF}@]+\.[^\s\x{FEFF}@]+$";

static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_REGEX.get_or_init(|| Regex::new(EMAIL_PATTERN).expect("email pattern is valid"))
}

/// Reason a field failed validation
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{} is required", .0.label())]
    Required(Field),

    #[error("Please enter a valid email address")]
    InvalidEmail,

    #[error("{} must be at least {min} characters long", .field.label())]
    TooShort { field: Field, min: usize },
}

impl ValidationError {
    /// Field the error should be shown next to
    pub fn field(&self) -> Field {
        match self {
            ValidationError::Required(field) => *field,
            ValidationError::InvalidEmail => Field::Email,
            ValidationError::TooShort { field, .. } => *field,
        }
    }
}

/// Outcome of validating a single field
pub type ValidationResult = Result<(), ValidationError>;

fn is_space(c: char) -> bool {
    c.is_whitespace() || c == BOM
}

fn trimmed(input: &str) -> &str {
    input.trim_matches(is_space)
}

fn is_blank(input: &str) -> bool {
    trimmed(input).is_empty()
}

/// Validates email address format
pub fn validate_email(email: &str) -> ValidationResult {
    if is_blank(email) {
        return Err(ValidationError::Required(Field::Email));
    }

    if !email_regex().is_match(email) {
        return Err(ValidationError::InvalidEmail);
    }

    Ok(())
}

/// Validates password length, counted on the raw value
pub fn validate_password(password: &str) -> ValidationResult {
    if is_blank(password) {
        return Err(ValidationError::Required(Field::Password));
    }

    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(ValidationError::TooShort {
            field: Field::Password,
            min: MIN_PASSWORD_LENGTH,
        });
    }

    Ok(())
}

/// Validates name length, counted on the trimmed value
pub fn validate_name(name: &str) -> ValidationResult {
    if is_blank(name) {
        return Err(ValidationError::Required(Field::Name));
    }

    if trimmed(name).chars().count() < MIN_NAME_LENGTH {
        return Err(ValidationError::TooShort {
            field: Field::Name,
            min: MIN_NAME_LENGTH,
        });
    }

    Ok(())
}
