//! Storage initialization
//!
//! Handles first-run setup: directories and an empty expense table.

use crate::config::paths::SpendPaths;
use crate::error::ExpenseError;

use super::expenses::ExpenseRepository;

/// Initialize storage for a fresh installation
///
/// Existing data is left untouched.
pub fn initialize_storage(paths: &SpendPaths) -> Result<(), ExpenseError> {
    paths.ensure_directories()?;

    if !paths.expenses_file().exists() {
        let repo = ExpenseRepository::new(paths.expenses_file());
        repo.save()?;
    }

    Ok(())
}

/// Check if storage needs initialization
pub fn needs_initialization(paths: &SpendPaths) -> bool {
    !paths.expenses_file().exists()
}
