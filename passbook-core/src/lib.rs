//! Passbook Core Library
//!
//! This library provides the core functionality for Passbook, a local
//! credential book: the SQLite-backed credential store, the password
//! generator and strength rule, and the form controller that front ends
//! drive.

pub mod config;
pub mod controller;
pub mod database;
pub mod import_export;
pub mod password;
pub mod platform;
pub mod store;

pub use config::AppConfig;
pub use controller::{Clipboard, Controller, Form, FormField, FormMode, Notice, NoticeLevel};
pub use database::{CredentialRecord, Database, NewCredential, TableName};
pub use password::{
    generate_password, meets_strength_rule, validate_credential, PasswordError,
    PasswordGeneratorConfig, ValidationError,
};
pub use platform::{get_config_dir, get_data_dir, get_default_database_path};
pub use store::CredentialStore;

use thiserror::Error;

/// Result type for Passbook operations
pub type Result<T> = std::result::Result<T, PassbookError>;

/// General error type for Passbook operations
#[derive(Error, Debug)]
pub enum PassbookError {
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    #[error("Password generation failed: {0}")]
    Password(#[from] PasswordError),

    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Clipboard error: {0}")]
    Clipboard(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised by the storage layer
#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Invalid table name: {0:?}")]
    InvalidTableName(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("File error: {0}")]
    FileIo(String),
}

impl From<rusqlite::Error> for PassbookError {
    fn from(e: rusqlite::Error) -> Self {
        PassbookError::Database(DatabaseError::Sqlite(e))
    }
}
