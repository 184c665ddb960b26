//! Credential store - CRUD and search over the credential table

#[cfg(test)]
mod tests;

use crate::{
    database::{models::RECORD_COLUMNS, CredentialRecord, Database, NewCredential, TableName},
    DatabaseError, Result,
};
use chrono::Utc;
use rusqlite::OptionalExtension;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Credential store owning the database connection
///
/// Every operation runs a single parameterized statement. The connection is
/// closed when the store is dropped.
pub struct CredentialStore {
    db: Database,
    table: TableName,
    path: Option<PathBuf>,
}

impl CredentialStore {
    /// Open the store backed by the database file at `path`
    pub fn open<P: AsRef<Path>>(path: P, table: TableName) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let db = Database::open(&path)?;
        Ok(Self {
            db,
            table,
            path: Some(path),
        })
    }

    /// Create a store on a fresh in-memory database
    pub fn in_memory(table: TableName) -> Result<Self> {
        Ok(Self {
            db: Database::in_memory()?,
            table,
            path: None,
        })
    }

    /// Database file backing this store, `None` for in-memory stores.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn table(&self) -> &TableName {
        &self.table
    }

    /// Get a reference to the underlying database
    pub fn database(&self) -> &Database {
        &self.db
    }

    /// Create the credential table if it is absent
    pub fn ensure_schema(&self) -> Result<()> {
        self.db.ensure_credentials_table(&self.table)?;
        info!("Credential table {} ready", self.table);
        Ok(())
    }

    /// Insert a credential and return its new id
    ///
    /// Field contents are not checked here; callers validate first.
    pub fn insert(&self, credential: &NewCredential) -> Result<i64> {
        let now = Utc::now().timestamp();

        self.db
            .conn()
            .execute(
                &format!(
                    "INSERT INTO {} (website, username, password, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?4)",
                    self.table
                ),
                (
                    &credential.website,
                    &credential.username,
                    &credential.password,
                    now,
                ),
            )
            .map_err(DatabaseError::Sqlite)?;

        let id = self.db.conn().last_insert_rowid();
        debug!("Inserted credential {} for {}", id, credential.website);
        Ok(id)
    }

    /// List every record in insertion order
    pub fn list_all(&self) -> Result<Vec<CredentialRecord>> {
        let mut stmt = self
            .db
            .conn()
            .prepare(&format!(
                "SELECT {RECORD_COLUMNS} FROM {} ORDER BY id",
                self.table
            ))
            .map_err(DatabaseError::Sqlite)?;

        let records = stmt
            .query_map([], CredentialRecord::from_row)
            .map_err(DatabaseError::Sqlite)?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(DatabaseError::Sqlite)?;

        Ok(records)
    }

    /// Fetch a single record by id
    pub fn get(&self, id: i64) -> Result<Option<CredentialRecord>> {
        let record = self
            .db
            .conn()
            .query_row(
                &format!("SELECT {RECORD_COLUMNS} FROM {} WHERE id = ?1", self.table),
                [id],
                CredentialRecord::from_row,
            )
            .optional()
            .map_err(DatabaseError::Sqlite)?;

        Ok(record)
    }

    /// Overwrite the business fields of record `id`
    ///
    /// Returns `false` when no record has that id; nothing is changed in
    /// that case and no error is raised.
    pub fn update(&self, id: i64, credential: &NewCredential) -> Result<bool> {
        let now = Utc::now().timestamp();

        let rows_affected = self
            .db
            .conn()
            .execute(
                &format!(
                    "UPDATE {}
             SET website = ?1, username = ?2, password = ?3, updated_at = ?4
             WHERE id = ?5",
                    self.table
                ),
                (
                    &credential.website,
                    &credential.username,
                    &credential.password,
                    now,
                    id,
                ),
            )
            .map_err(DatabaseError::Sqlite)?;

        if rows_affected == 0 {
            warn!("Update matched no credential with id {}", id);
            return Ok(false);
        }

        debug!("Updated credential {}", id);
        Ok(true)
    }

    /// Delete record `id`; returns `false` if it did not exist
    pub fn delete(&self, id: i64) -> Result<bool> {
        let rows_affected = self
            .db
            .conn()
            .execute(&format!("DELETE FROM {} WHERE id = ?1", self.table), [id])
            .map_err(DatabaseError::Sqlite)?;

        if rows_affected == 0 {
            warn!("Delete matched no credential with id {}", id);
            return Ok(false);
        }

        debug!("Deleted credential {}", id);
        Ok(true)
    }

    /// Records whose website or username contains `term`, ignoring ASCII case
    ///
    /// LIKE wildcards in `term` are matched literally. An empty term matches
    /// every record.
    pub fn search(&self, term: &str) -> Result<Vec<CredentialRecord>> {
        let pattern = format!("%{}%", escape_like(term));

        let mut stmt = self
            .db
            .conn()
            .prepare(&format!(
                "SELECT {RECORD_COLUMNS} FROM {}
             WHERE website LIKE ?1 ESCAPE '\\' OR username LIKE ?1 ESCAPE '\\'
             ORDER BY id",
                self.table
            ))
            .map_err(DatabaseError::Sqlite)?;

        let records = stmt
            .query_map([&pattern], CredentialRecord::from_row)
            .map_err(DatabaseError::Sqlite)?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(DatabaseError::Sqlite)?;

        debug!("Search matched {} credentials", records.len());
        Ok(records)
    }

    /// Number of stored records
    pub fn count(&self) -> Result<usize> {
        let count: i64 = self
            .db
            .conn()
            .query_row(&format!("SELECT COUNT(*) FROM {}", self.table), [], |row| {
                row.get(0)
            })
            .map_err(DatabaseError::Sqlite)?;

        Ok(usize::try_from(count).unwrap_or_default())
    }
}

fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
