//! User settings for SpendLens
//!
//! Manages presentation preferences and extra date formats for coercion.

use serde::{Deserialize, Serialize};

use super::paths::SpendPaths;
use crate::error::ExpenseError;
use crate::models::DateParser;

/// User settings for SpendLens
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Symbol printed before amounts
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Number of rows shown by `history` when no limit is given
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,

    /// Extra chrono formats tried first when coercing dates
    #[serde(default)]
    pub extra_date_formats: Vec<String>,

    /// Width of the proportional bars in breakdown reports
    #[serde(default = "default_bar_width")]
    pub bar_width: usize,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_history_limit() -> usize {
    20
}

fn default_bar_width() -> usize {
    30
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            history_limit: default_history_limit(),
            extra_date_formats: Vec::new(),
            bar_width: default_bar_width(),
        }
    }
}

impl Settings {
    /// Date parser honoring `extra_date_formats`
    pub fn date_parser(&self) -> DateParser {
        DateParser::with_extra_formats(self.extra_date_formats.clone())
    }

    /// Load settings from disk, or defaults if the file doesn't exist
    pub fn load_or_create(paths: &SpendPaths) -> Result<Self, ExpenseError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                ExpenseError::Io(format!("Failed to read settings file: {}", e))
            })?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                ExpenseError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &SpendPaths) -> Result<(), ExpenseError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            ExpenseError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| ExpenseError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }
}
