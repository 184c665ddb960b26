//! Platform-specific locations for Passbook's files

use std::path::PathBuf;

const APP_DIR: &str = "Passbook";

/// Get the platform-specific data directory for storing application data
///
/// Returns:
/// - Windows: %LOCALAPPDATA%\Passbook
/// - macOS: ~/Library/Application Support/Passbook
/// - Linux/Other: ~/.local/share/Passbook
pub fn get_data_dir() -> PathBuf {
    let base = dirs::data_local_dir()
        .or_else(dirs::data_dir)
        .or_else(|| dirs::home_dir().map(|h| h.join(".data")))
        .unwrap_or_else(|| PathBuf::from("."));

    base.join(APP_DIR)
}

/// Get the platform-specific config directory
pub fn get_config_dir() -> PathBuf {
    let base = dirs::config_dir()
        .or_else(dirs::data_dir)
        .or_else(|| dirs::home_dir().map(|h| h.join(".config")))
        .unwrap_or_else(|| PathBuf::from("."));

    base.join(APP_DIR)
}

/// Get the default credential database path
pub fn get_default_database_path() -> PathBuf {
    get_data_dir().join("passbook.db")
}

/// Get the default config file path
pub fn get_default_config_path() -> PathBuf {
    get_config_dir().join("passbook.toml")
}

/// Get the default log file path
pub fn get_default_log_path() -> PathBuf {
    get_data_dir().join("passbook.log")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_data_dir() {
        let dir = get_data_dir();
        assert!(dir.ends_with(APP_DIR));
    }

    #[test]
    fn test_get_config_dir() {
        let dir = get_config_dir();
        assert!(dir.ends_with(APP_DIR));
    }

    #[test]
    fn test_default_file_paths() {
        assert!(get_default_database_path().ends_with("Passbook/passbook.db"));
        assert!(get_default_config_path().ends_with("Passbook/passbook.toml"));
        assert!(get_default_log_path().ends_with("Passbook/passbook.log"));
    }
}
