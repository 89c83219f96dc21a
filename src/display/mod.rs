//! Display formatting for terminal output
//!
//! Provides the presentation options and shared helpers used by reports and
//! the history listing.

pub mod history;
pub mod report;

pub use history::format_history;

use crate::config::Settings;

/// Presentation preferences taken from the user's settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayOptions {
    /// Symbol printed before amounts
    pub currency_symbol: String,
    /// Width of the proportional bars in breakdown reports
    pub bar_width: usize,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            currency_symbol: "$".to_string(),
            bar_width: 30,
        }
    }
}

impl From<&Settings> for DisplayOptions {
    fn from(settings: &Settings) -> Self {
        Self {
            currency_symbol: settings.currency_symbol.clone(),
            bar_width: settings.bar_width,
        }
    }
}
