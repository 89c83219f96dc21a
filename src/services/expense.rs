//! Expense history service

use crate::error::{ExpenseError, ExpenseResult};
use crate::models::ExpenseRow;
use crate::storage::Storage;

/// Service for browsing the stored expense rows
pub struct ExpenseService<'a> {
    storage: &'a Storage,
}

impl<'a> ExpenseService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// The latest `limit` rows, newest date text first
    pub fn history(&self, limit: usize) -> ExpenseResult<Vec<ExpenseRow>> {
        if limit == 0 {
            return Err(ExpenseError::Validation(
                "History limit must be at least 1".into(),
            ));
        }

        self.storage.expenses.load()?;
        self.storage.expenses.recent(limit)
    }

    /// Number of stored rows
    pub fn count(&self) -> ExpenseResult<usize> {
        self.storage.expenses.load()?;
        self.storage.expenses.count()
    }
}
