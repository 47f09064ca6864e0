//! User settings for Pocketbook
//!
//! Display preferences and the owner used when the command line does not
//! name one.

use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};

use super::paths::PocketPaths;
use crate::error::PocketError;
use crate::models::OwnerId;
use crate::storage::write_json_atomic;

/// User settings for Pocketbook
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency symbol shown next to amounts
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Date format preference (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Owner used when no `--owner` is given
    #[serde(default = "default_owner")]
    pub default_owner: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "R$".to_string()
}

fn default_date_format() -> String {
    "%d/%m/%Y".to_string()
}

fn default_owner() -> String {
    "local".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            date_format: default_date_format(),
            default_owner: default_owner(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or defaults if the file doesn't exist
    pub fn load_or_create(paths: &PocketPaths) -> Result<Self, PocketError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path)
                .map_err(|e| PocketError::Io(format!("Failed to read settings file: {}", e)))?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                PocketError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            settings.validate()?;
            Ok(settings)
        } else {
            // Not persisted until the caller asks
            Ok(Settings::default())
        }
    }

    /// Check values that are only interpreted later, at display time
    pub fn validate(&self) -> Result<(), PocketError> {
        let invalid = self.date_format.trim().is_empty()
            || StrftimeItems::new(&self.date_format).any(|item| matches!(item, Item::Error));
        if invalid {
            return Err(PocketError::Config(format!(
                "Invalid date_format '{}' in settings file",
                self.date_format
            )));
        }
        Ok(())
    }

    /// Save settings to disk
    pub fn save(&self, paths: &PocketPaths) -> Result<(), PocketError> {
        self.validate()?;
        paths.ensure_directories()?;
        write_json_atomic(paths.settings_file(), self)
    }

    /// Owner to act as, preferring an explicit one
    pub fn owner(&self, explicit: Option<&str>) -> OwnerId {
        match explicit.map(str::trim) {
            Some(owner) if !owner.is_empty() => OwnerId::new(owner),
            _ => OwnerId::new(self.default_owner.clone()),
        }
    }
}
