//! Application configuration.

use crate::database::TableName;
use crate::password::PasswordGeneratorConfig;
use crate::platform::{get_default_database_path, get_default_log_path};
use crate::{PassbookError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Settings read from `passbook.toml`; every field has a default
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub database_path: PathBuf,
    pub table_name: String,
    pub password_length: usize,
    pub include_symbols: bool,
    pub notice_millis: u64,
    pub status_reset_millis: u64,
    pub log_file: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_path: get_default_database_path(),
            table_name: TableName::default().to_string(),
            password_length: 16,
            include_symbols: true,
            notice_millis: 1_500,
            status_reset_millis: 3_000,
            log_file: get_default_log_path(),
        }
    }
}

impl AppConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)
            .map_err(|e| PassbookError::Config(format!("{}: {}", path.display(), e)))?;
        config.table()?;
        config.generator().validate()?;
        Ok(config)
    }

    /// Load `path` if it exists, defaults otherwise
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// The configured table name, checked against the identifier allow-list
    pub fn table(&self) -> Result<TableName> {
        TableName::new(self.table_name.as_str())
    }

    pub fn generator(&self) -> PasswordGeneratorConfig {
        PasswordGeneratorConfig::default()
            .length(self.password_length)
            .with_symbols(self.include_symbols)
    }

    pub fn notice_duration(&self) -> Duration {
        Duration::from_millis(self.notice_millis)
    }

    pub fn status_reset_duration(&self) -> Duration {
        Duration::from_millis(self.status_reset_millis)
    }
}
