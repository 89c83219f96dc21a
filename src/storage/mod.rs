//! Storage layer for SpendLens
//!
//! Provides the flat JSON expense table, the uploads directory, atomic
//! writes, and automatic directory creation.

pub mod expenses;
pub mod file_io;
pub mod init;
pub mod uploads;

pub use expenses::ExpenseRepository;
pub use file_io::{read_json, write_json_atomic};
pub use init::initialize_storage;
pub use uploads::UploadRepository;

use crate::config::paths::SpendPaths;
use crate::error::ExpenseError;

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    paths: SpendPaths,
    pub expenses: ExpenseRepository,
    pub uploads: UploadRepository,
}

impl Storage {
    /// Create a new Storage instance
    pub fn new(paths: SpendPaths) -> Result<Self, ExpenseError> {
        paths.ensure_directories()?;

        Ok(Self {
            expenses: ExpenseRepository::new(paths.expenses_file()),
            uploads: UploadRepository::new(paths.uploads_dir()),
            paths,
        })
    }

    /// Get the paths configuration
    pub fn paths(&self) -> &SpendPaths {
        &self.paths
    }

    /// Load all data from disk
    pub fn load_all(&self) -> Result<(), ExpenseError> {
        self.expenses.load()
    }

    /// Save all data to disk
    pub fn save_all(&self) -> Result<(), ExpenseError> {
        self.expenses.save()
    }

    /// Check if storage has been initialized
    pub fn is_initialized(&self) -> bool {
        self.paths.is_initialized()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_storage_creation() {
        let temp_dir = TempDir::new().unwrap();
        let paths = SpendPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();

        assert!(temp_dir.path().join("data").exists());
        assert!(temp_dir.path().join("uploads").exists());
        assert!(!storage.is_initialized());
    }
}
