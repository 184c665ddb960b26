//! Password generation, the strength rule, and credential form validation.

pub mod generator;
pub mod strength;
pub mod validation;

pub use generator::{generate_password, generate_password_with_rng, PasswordGeneratorConfig};
pub use strength::{check_strength, meets_strength_rule, MIN_PASSWORD_LENGTH};
pub use validation::{parse_record_id, validate_credential, ValidationError};

use thiserror::Error;

/// Errors that can occur while generating a password
#[derive(Error, Debug, PartialEq, Eq)]
pub enum PasswordError {
    #[error("Password length must be at least {min} characters, got {got}")]
    LengthTooShort { min: usize, got: usize },

    #[error("Password length must be at most {max} characters, got {got}")]
    LengthTooLong { max: usize, got: usize },

    #[error("No password satisfying the strength rule after {0} attempts")]
    Exhausted(usize),
}
