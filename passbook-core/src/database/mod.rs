//! Database layer for Passbook.
//!
//! This module owns the SQLite connection, the credential table schema and
//! the row model shared by the store and the front ends.

pub mod models;
pub mod schema;

pub use models::{CredentialRecord, NewCredential};
pub use schema::{Database, TableName, DEFAULT_TABLE_NAME};
