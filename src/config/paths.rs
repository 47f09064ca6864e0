//! Path management for Pocketbook
//!
//! ## Path Resolution Order
//!
//! 1. `POCKETBOOK_DATA_DIR` environment variable (if set)
//! 2. Unix (Linux/macOS): `$XDG_CONFIG_HOME/pocketbook` or `~/.config/pocketbook`
//! 3. Windows: `%APPDATA%\pocketbook`

use std::path::PathBuf;

use crate::error::PocketError;

/// Environment variable that overrides the base directory
pub const DATA_DIR_ENV: &str = "POCKETBOOK_DATA_DIR";

/// Manages all paths used by Pocketbook
#[derive(Debug, Clone)]
pub struct PocketPaths {
    base_dir: PathBuf,
}

impl PocketPaths {
    /// Resolve the base directory from the environment
    ///
    /// # Errors
    ///
    /// Returns an error if no home or config directory can be determined.
    pub fn new() -> Result<Self, PocketError> {
        let base_dir = match std::env::var(DATA_DIR_ENV) {
            Ok(custom) if !custom.trim().is_empty() => PathBuf::from(custom),
            _ => resolve_default_path()?,
        };

        Ok(Self { base_dir })
    }

    /// Create paths rooted at a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the data directory (<base>/data/)
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to accounts.json
    pub fn accounts_file(&self) -> PathBuf {
        self.data_dir().join("accounts.json")
    }

    /// Get the path to transactions.json
    pub fn transactions_file(&self) -> PathBuf {
        self.data_dir().join("transactions.json")
    }

    /// Ensure the base and data directories exist
    pub fn ensure_directories(&self) -> Result<(), PocketError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| PocketError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| PocketError::Io(format!("Failed to create data directory: {}", e)))?;

        Ok(())
    }

    /// Check if Pocketbook has been initialized (config file exists)
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

#[cfg(not(windows))]
fn resolve_default_path() -> Result<PathBuf, PocketError> {
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        if !xdg.trim().is_empty() {
            return Ok(PathBuf::from(xdg).join("pocketbook"));
        }
    }
    let home = std::env::var("HOME")
        .map_err(|_| PocketError::Config("Could not determine HOME directory".into()))?;
    Ok(PathBuf::from(home).join(".config").join("pocketbook"))
}

#[cfg(windows)]
fn resolve_default_path() -> Result<PathBuf, PocketError> {
    let appdata = std::env::var("APPDATA")
        .map_err(|_| PocketError::Config("Could not determine APPDATA directory".into()))?;
    Ok(PathBuf::from(appdata).join("pocketbook"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_custom_base_dir() {
        let temp_dir = TempDir::new().unwrap();
        let paths = PocketPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.base_dir(), temp_dir.path());
        assert_eq!(paths.data_dir(), temp_dir.path().join("data"));
    }

    #[test]
    fn test_ensure_directories() {
        let temp_dir = TempDir::new().unwrap();
        let paths = PocketPaths::with_base_dir(temp_dir.path().join("nested"));

        paths.ensure_directories().unwrap();

        assert!(paths.data_dir().exists());
        assert!(!paths.is_initialized());
    }

    #[test]
    fn test_file_paths() {
        let temp_dir = TempDir::new().unwrap();
        let paths = PocketPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.settings_file(), temp_dir.path().join("config.json"));
        assert_eq!(
            paths.accounts_file(),
            temp_dir.path().join("data").join("accounts.json")
        );
        assert_eq!(
            paths.transactions_file(),
            temp_dir.path().join("data").join("transactions.json")
        );
    }
}
