//! CLI command handlers for batch upload
//!
//! Handles importing expense batches and listing the stored ones.

use std::path::Path;

use crate::audit::AuditLogger;
use crate::error::ExpenseResult;
use crate::services::ImportService;
use crate::storage::Storage;

/// Rejected rows echoed back to the user
const MAX_ERRORS_SHOWN: usize = 10;

/// Handle the import command
pub fn handle_import_command(storage: &Storage, file: &Path) -> ExpenseResult<()> {
    let audit = AuditLogger::new(storage.paths().audit_log());
    let result = ImportService::new(storage).import_file(file, &audit)?;

    println!("Imported '{}'", result.file_name);
    println!("  Imported:    {}", result.imported);
    if result.rejected > 0 {
        println!("  Rejected:    {}", result.rejected);
        for (line, msg) in result.error_messages.iter().take(MAX_ERRORS_SHOWN) {
            println!("    Line {}: {}", line, msg);
        }
        if result.rejected > MAX_ERRORS_SHOWN {
            println!("    ... and {} more", result.rejected - MAX_ERRORS_SHOWN);
        }
    }

    Ok(())
}

/// Handle the files command
pub fn handle_files_command(storage: &Storage) -> ExpenseResult<()> {
    let names = ImportService::new(storage).list_batches()?;

    if names.is_empty() {
        println!("No files uploaded yet. Run 'spendlens import <file.csv>' to add one.");
        return Ok(());
    }

    for name in names {
        println!("{}", name);
    }

    Ok(())
}
