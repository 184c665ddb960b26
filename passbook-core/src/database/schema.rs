//! Database schema and connection management.

use crate::{DatabaseError, Result};
use rusqlite::Connection;
use std::fmt;
use std::path::Path;
use tracing::{debug, info};

/// Table used when no other name is configured.
pub const DEFAULT_TABLE_NAME: &str = "password_info";

const MAX_TABLE_NAME_LEN: usize = 64;

/// A table name that is safe to splice into SQL text.
///
/// Values are parameterized everywhere; the table name is the only
/// identifier that ends up inside a statement string, so it must pass
/// [`TableName::new`] first.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TableName(String);

impl TableName {
    /// Accepts `[A-Za-z_][A-Za-z0-9_]*`, at most 64 characters.
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        let mut chars = name.chars();

        let valid_start = chars
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic() || c == '_');
        let valid_rest = chars.all(|c| c.is_ascii_alphanumeric() || c == '_');

        if !valid_start || !valid_rest || name.len() > MAX_TABLE_NAME_LEN {
            return Err(DatabaseError::InvalidTableName(name).into());
        }

        // Keep clear of SQLite's internal tables
        if name.to_ascii_lowercase().starts_with("sqlite_") {
            return Err(DatabaseError::InvalidTableName(name).into());
        }

        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for TableName {
    fn default() -> Self {
        Self(DEFAULT_TABLE_NAME.to_string())
    }
}

impl fmt::Display for TableName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Database connection and schema manager
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open a database at the specified path, creating the file if needed
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let conn = Connection::open(path).map_err(DatabaseError::Sqlite)?;
        info!("Opened credential database at {}", path.display());
        Ok(Self { conn })
    }

    /// Create a new in-memory database for testing
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(DatabaseError::Sqlite)?;
        Ok(Self { conn })
    }

    /// Create the credential table if it does not exist yet
    pub fn ensure_credentials_table(&self, table: &TableName) -> Result<()> {
        debug!("Ensuring table {} exists", table);
        self.conn
            .execute(
                &format!(
                    "CREATE TABLE IF NOT EXISTS {table} (
                id INTEGER PRIMARY KEY AUTOINCREMENT NOT NULL,
                created_at INTEGER NOT NULL DEFAULT (strftime('%s', 'now')),
                updated_at INTEGER NOT NULL DEFAULT (strftime('%s', 'now')),
                website TEXT NOT NULL,
                username VARCHAR(200),
                password VARCHAR(50)
            )"
                ),
                [],
            )
            .map_err(DatabaseError::Sqlite)?;
        Ok(())
    }

    /// Check whether a table with the given name exists
    pub fn table_exists(&self, table: &TableName) -> Result<bool> {
        let exists: bool = self
            .conn
            .query_row(
                "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name=?1)",
                [table.as_str()],
                |row| row.get(0),
            )
            .map_err(DatabaseError::Sqlite)?;
        Ok(exists)
    }

    /// Get a reference to the underlying connection
    pub fn conn(&self) -> &Connection {
        &self.conn
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_memory_database() {
        let db = Database::in_memory().unwrap();
        let table = TableName::default();
        db.ensure_credentials_table(&table).unwrap();

        let columns: Vec<String> = db
            .conn
            .prepare("SELECT name FROM pragma_table_info('password_info')")
            .unwrap()
            .query_map([], |row| row.get(0))
            .unwrap()
            .collect::<std::result::Result<Vec<_>, _>>()
            .unwrap();

        assert_eq!(
            columns,
            vec!["id", "created_at", "updated_at", "website", "username", "password"]
        );
    }

    #[test]
    fn test_ensure_table_is_idempotent() {
        let db = Database::in_memory().unwrap();
        let table = TableName::default();
        assert!(!db.table_exists(&table).unwrap());

        db.ensure_credentials_table(&table).unwrap();
        db.ensure_credentials_table(&table).unwrap();
        assert!(db.table_exists(&table).unwrap());
    }

    #[test]
    fn test_table_name_accepts_identifiers() {
        assert_eq!(TableName::default().as_str(), "password_info");
        assert!(TableName::new("credentials").is_ok());
        assert!(TableName::new("_work_2").is_ok());
    }

    #[test]
    fn test_table_name_rejects_injection() {
        assert!(TableName::new("").is_err());
        assert!(TableName::new("1table").is_err());
        assert!(TableName::new("x; DROP TABLE y").is_err());
        assert!(TableName::new("name-with-dash").is_err());
        assert!(TableName::new("sqlite_master").is_err());
        assert!(TableName::new("a".repeat(65)).is_err());
    }
}
