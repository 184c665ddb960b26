//! Validation of credential form input.

use super::strength::check_strength;
use crate::database::NewCredential;
use thiserror::Error;

/// Longest username the credential table is declared to hold.
pub const MAX_USERNAME_LENGTH: usize = 200;
/// Longest password the credential table is declared to hold.
pub const MAX_PASSWORD_LENGTH: usize = 50;

/// Input rejected before any store operation runs
///
/// The display text is the message shown to the user.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("All fields must be filled")]
    MissingFields,

    #[error("Password must be at least 8 characters long")]
    PasswordTooShort,

    #[error("Password must contain letters and numbers")]
    PasswordTooWeak,

    #[error("{field} must be at most {max} characters")]
    FieldTooLong { field: &'static str, max: usize },

    #[error("Record id must be a number, got {0:?}")]
    InvalidId(String),

    #[error("Enter a search term!")]
    EmptySearchTerm,

    #[error("Please select a record to {0}")]
    NoRecordSelected(&'static str),
}

/// Validate raw form fields and return the trimmed credential
pub fn validate_credential(
    website: &str,
    username: &str,
    password: &str,
) -> Result<NewCredential, ValidationError> {
    let website = website.trim();
    let username = username.trim();
    let password = password.trim();

    if website.is_empty() || username.is_empty() || password.is_empty() {
        return Err(ValidationError::MissingFields);
    }

    if username.chars().count() > MAX_USERNAME_LENGTH {
        return Err(ValidationError::FieldTooLong {
            field: "Username",
            max: MAX_USERNAME_LENGTH,
        });
    }

    check_strength(password)?;

    if password.chars().count() > MAX_PASSWORD_LENGTH {
        return Err(ValidationError::FieldTooLong {
            field: "Password",
            max: MAX_PASSWORD_LENGTH,
        });
    }

    Ok(NewCredential::new(website, username, password))
}

/// Parse the id field of the form
///
/// `action` names the operation for the "nothing selected" message.
pub fn parse_record_id(raw: &str, action: &'static str) -> Result<i64, ValidationError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ValidationError::NoRecordSelected(action));
    }

    raw.parse::<i64>()
        .map_err(|_| ValidationError::InvalidId(raw.to_string()))
}
