//! Expense repository for JSON storage
//!
//! The persisted store is a single flat table in expenses.json. Rows are
//! only ever appended; dates are kept exactly as uploaded.

use std::path::PathBuf;
use std::sync::RwLock;

use serde::{Deserialize, Serialize};

use crate::error::ExpenseError;
use crate::models::{ExpenseRow, NewExpense};

use super::file_io::{read_json, write_json_atomic};

/// Serializable expense table
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct ExpenseTable {
    #[serde(default)]
    next_id: u64,
    #[serde(default)]
    expenses: Vec<ExpenseRow>,
}

/// Repository for the flat expense table
pub struct ExpenseRepository {
    path: PathBuf,
    data: RwLock<ExpenseTable>,
}

impl ExpenseRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(ExpenseTable::default()),
        }
    }

    /// Load the table from disk, replacing whatever is in memory
    pub fn load(&self) -> Result<(), ExpenseError> {
        let mut table: ExpenseTable = read_json(&self.path)?;

        // Tables written by hand may omit next_id
        let max_id = table.expenses.iter().map(|row| row.id).max().unwrap_or(0);
        table.next_id = table.next_id.max(max_id + 1);

        let mut data = self
            .data
            .write()
            .map_err(|e| ExpenseError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        *data = table;

        Ok(())
    }

    /// Save the table to disk
    pub fn save(&self) -> Result<(), ExpenseError> {
        let data = self
            .data
            .read()
            .map_err(|e| ExpenseError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        write_json_atomic(&self.path, &*data)
    }

    /// Append rows, assigning ids; returns the new ids
    pub fn append(&self, rows: Vec<NewExpense>) -> Result<Vec<u64>, ExpenseError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| ExpenseError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        let mut ids = Vec::with_capacity(rows.len());
        for row in rows {
            let id = data.next_id.max(1);
            data.next_id = id + 1;
            data.expenses.push(ExpenseRow {
                id,
                date: row.date,
                amount: row.amount,
                category: row.category,
            });
            ids.push(id);
        }

        Ok(ids)
    }

    /// All rows in insertion order
    pub fn get_all(&self) -> Result<Vec<ExpenseRow>, ExpenseError> {
        let data = self
            .data
            .read()
            .map_err(|e| ExpenseError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.expenses.clone())
    }

    /// The `limit` latest rows, ordered by date text descending, then id descending
    pub fn recent(&self, limit: usize) -> Result<Vec<ExpenseRow>, ExpenseError> {
        let mut rows = self.get_all()?;
        rows.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));
        rows.truncate(limit);
        Ok(rows)
    }

    pub fn count(&self) -> Result<usize, ExpenseError> {
        let data = self
            .data
            .read()
            .map_err(|e| ExpenseError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.expenses.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Amount;
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, ExpenseRepository) {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("expenses.json");
        let repo = ExpenseRepository::new(path);
        repo.load().unwrap();
        (temp_dir, repo)
    }

    fn new_expense(date: &str, cents: i64, category: &str) -> NewExpense {
        NewExpense {
            date: date.to_string(),
            amount: Amount::from_cents(cents),
            category: category.to_string(),
        }
    }

    #[test]
    fn test_empty_store() {
        let (_temp_dir, repo) = create_test_repo();
        assert_eq!(repo.count().unwrap(), 0);
        assert!(repo.get_all().unwrap().is_empty());
    }

    #[test]
    fn test_append_assigns_sequential_ids() {
        let (_temp_dir, repo) = create_test_repo();

        let ids = repo
            .append(vec![
                new_expense("2024-01-05", 10000, "food"),
                new_expense("2024-01-10", 5000, "food"),
            ])
            .unwrap();
        assert_eq!(ids, vec![1, 2]);

        let ids = repo.append(vec![new_expense("2024-02-01", 3000, "travel")]).unwrap();
        assert_eq!(ids, vec![3]);
    }

    #[test]
    fn test_save_and_reload() {
        let (temp_dir, repo) = create_test_repo();
        repo.append(vec![new_expense("not a date", 1250, "misc")]).unwrap();
        repo.save().unwrap();

        let reloaded = ExpenseRepository::new(temp_dir.path().join("expenses.json"));
        reloaded.load().unwrap();
        let rows = reloaded.get_all().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].date, "not a date");
        assert_eq!(rows[0].amount, Amount::from_cents(1250));

        let ids = reloaded.append(vec![new_expense("2024-01-01", 1, "misc")]).unwrap();
        assert_eq!(ids, vec![2]);
    }

    #[test]
    fn test_load_without_next_id() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("expenses.json");
        std::fs::write(
            &path,
            r#"{"expenses": [{"id": 41, "date": "2024-01-01", "amount": "5", "category": "x"}]}"#,
        )
        .unwrap();

        let repo = ExpenseRepository::new(path);
        repo.load().unwrap();
        let ids = repo.append(vec![new_expense("2024-01-02", 100, "x")]).unwrap();
        assert_eq!(ids, vec![42]);
    }

    #[test]
    fn test_recent_orders_by_date_text_descending() {
        let (_temp_dir, repo) = create_test_repo();
        repo.append(vec![
            new_expense("2024-01-05", 100, "a"),
            new_expense("2024-03-01", 200, "b"),
            new_expense("2024-02-01", 300, "c"),
            new_expense("2024-03-01", 400, "d"),
        ])
        .unwrap();

        let recent = repo.recent(3).unwrap();
        let categories: Vec<&str> = recent.iter().map(|r| r.category.as_str()).collect();
        assert_eq!(categories, vec!["d", "b", "c"]);
    }
}
