//! Database models for credential records.

use chrono::{DateTime, Utc};
use rusqlite::Row;
use serde::{Deserialize, Serialize};

/// Column list used by every query that materializes a [`CredentialRecord`].
pub(crate) const RECORD_COLUMNS: &str = "id, created_at, updated_at, website, username, password";

/// A credential record stored in the database
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialRecord {
    pub id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub website: String,
    pub username: String,
    pub password: String,
}

impl CredentialRecord {
    /// Build a record from a row selected with [`RECORD_COLUMNS`].
    ///
    /// `username` and `password` are nullable in the schema; rows written
    /// around the controller may hold NULL there, which reads back as an
    /// empty string.
    pub(crate) fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        let created_at: i64 = row.get(1)?;
        let updated_at: i64 = row.get(2)?;
        let username: Option<String> = row.get(4)?;
        let password: Option<String> = row.get(5)?;

        Ok(Self {
            id: row.get(0)?,
            created_at: DateTime::from_timestamp(created_at, 0).unwrap_or_default(),
            updated_at: DateTime::from_timestamp(updated_at, 0).unwrap_or_default(),
            website: row.get(3)?,
            username: username.unwrap_or_default(),
            password: password.unwrap_or_default(),
        })
    }

    /// Password rendered as one `*` per character
    pub fn masked_password(&self) -> String {
        "*".repeat(self.password.chars().count())
    }

    /// The business fields of this record
    pub fn credential(&self) -> NewCredential {
        NewCredential {
            website: self.website.clone(),
            username: self.username.clone(),
            password: self.password.clone(),
        }
    }
}

/// The website/username/password triple written by insert and update
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCredential {
    pub website: String,
    pub username: String,
    pub password: String,
}

impl NewCredential {
    pub fn new(
        website: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            website: website.into(),
            username: username.into(),
            password: password.into(),
        }
    }
}
