//! Import/export of credential records

use crate::{CredentialRecord, CredentialStore, DatabaseError, NewCredential, Result};
use serde::{Deserialize, Serialize};
use std::io::{BufReader, Write};
use std::path::Path;
use tracing::info;

/// Export format for credential records
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportEntry {
    pub website: String,
    pub username: String,
    pub password: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<CredentialRecord> for ExportEntry {
    fn from(record: CredentialRecord) -> Self {
        Self {
            website: record.website,
            username: record.username,
            password: record.password,
            created_at: record.created_at.to_rfc3339(),
            updated_at: record.updated_at.to_rfc3339(),
        }
    }
}

/// Export every record to a pretty-printed JSON array
pub fn export_to_json(store: &CredentialStore, output: &Path) -> Result<usize> {
    let entries: Vec<ExportEntry> = store
        .list_all()?
        .into_iter()
        .map(ExportEntry::from)
        .collect();

    let json = serde_json::to_string_pretty(&entries)
        .map_err(|e| DatabaseError::Serialization(e.to_string()))?;

    std::fs::write(output, json)
        .map_err(|e| DatabaseError::FileIo(format!("Failed to write export: {}", e)))?;

    info!("Exported {} credentials to {}", entries.len(), output.display());
    Ok(entries.len())
}

/// Export every record as CSV
pub fn export_to_csv(store: &CredentialStore, output: &Path) -> Result<usize> {
    let records = store.list_all()?;
    let mut file = std::fs::File::create(output)
        .map_err(|e| DatabaseError::FileIo(format!("Failed to create export file: {}", e)))?;

    writeln!(file, "Website,Username,Password,Created At,Updated At")
        .map_err(|e| DatabaseError::FileIo(format!("Failed to write CSV: {}", e)))?;

    for record in &records {
        writeln!(
            file,
            "{},{},{},{},{}",
            escape_csv(&record.website),
            escape_csv(&record.username),
            escape_csv(&record.password),
            record.created_at.to_rfc3339(),
            record.updated_at.to_rfc3339(),
        )
        .map_err(|e| DatabaseError::FileIo(format!("Failed to write CSV: {}", e)))?;
    }

    info!("Exported {} credentials to {}", records.len(), output.display());
    Ok(records.len())
}

/// Insert every entry of a JSON export; returns how many were added
///
/// Imported entries get fresh ids and timestamps. Like any direct store
/// access, entries are not checked against the strength rule. The import is
/// all-or-nothing: if any insert fails, no entry is kept.
pub fn import_from_json(store: &CredentialStore, input: &Path) -> Result<usize> {
    let file = std::fs::File::open(input)
        .map_err(|e| DatabaseError::FileIo(format!("Failed to open import file: {}", e)))?;

    let entries: Vec<ExportEntry> = serde_json::from_reader(BufReader::new(file))
        .map_err(|e| DatabaseError::Serialization(format!("Failed to parse JSON: {}", e)))?;

    let tx = store
        .database()
        .conn()
        .unchecked_transaction()
        .map_err(DatabaseError::Sqlite)?;
    for entry in &entries {
        store.insert(&NewCredential::new(
            entry.website.as_str(),
            entry.username.as_str(),
            entry.password.as_str(),
        ))?;
    }
    tx.commit().map_err(DatabaseError::Sqlite)?;

    info!("Imported {} credentials from {}", entries.len(), input.display());
    Ok(entries.len())
}

fn escape_csv(field: &str) -> String {
    let needs_quotes = field.contains([',', '"', '\n', '\r']);
    let escaped = field.replace('"', "\"\"");
    if needs_quotes {
        format!("\"{}\"", escaped)
    } else {
        escaped
    }
}
