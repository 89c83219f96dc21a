//! CLI command handler for expense history

use crate::config::settings::Settings;
use crate::display::{format_history, DisplayOptions};
use crate::error::ExpenseResult;
use crate::services::ExpenseService;
use crate::storage::Storage;

/// Handle the history command
pub fn handle_history_command(
    storage: &Storage,
    settings: &Settings,
    limit: Option<usize>,
) -> ExpenseResult<()> {
    let limit = limit.unwrap_or(settings.history_limit);
    let rows = ExpenseService::new(storage).history(limit)?;

    println!("{}", format_history(&rows, &DisplayOptions::from(settings)));
    Ok(())
}
