//! CSV Import service
//!
//! Ingests uploaded expense batches. A batch is a CSV file with a header row
//! naming `date`, `amount` and `category` columns in any order. Dates are
//! kept as raw text; coercion happens when the rows are summarized.

use std::path::Path;

use csv::{ReaderBuilder, StringRecord};
use tracing::{debug, info};

use crate::audit::{AuditEntry, AuditLogger};
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{Amount, DateParser, ExpenseRecord, NewExpense};
use crate::storage::uploads::is_csv_name;
use crate::storage::Storage;

/// Column positions of the required fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMapping {
    pub date_column: usize,
    pub amount_column: usize,
    pub category_column: usize,
}

impl ColumnMapping {
    /// Locate the required columns by header name (case-insensitive)
    pub fn from_headers(headers: &StringRecord) -> ExpenseResult<Self> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(name))
                .ok_or_else(|| ExpenseError::Import(format!("Missing '{}' column", name)))
        };

        Ok(Self {
            date_column: find("date")?,
            amount_column: find("amount")?,
            category_column: find("category")?,
        })
    }

    fn parse_record(&self, record: &StringRecord) -> Result<NewExpense, String> {
        let field = |idx: usize, name: &str| {
            record
                .get(idx)
                .ok_or_else(|| format!("Missing {} value", name))
        };

        let date = field(self.date_column, "date")?.to_string();
        let amount = Amount::parse(field(self.amount_column, "amount")?)
            .map_err(|e| e.to_string())?;
        let category = field(self.category_column, "category")?.to_string();

        Ok(NewExpense {
            date,
            amount,
            category,
        })
    }
}

/// A parsed batch row, tagged with its line number in the file
pub type ParsedRow = (usize, Result<NewExpense, String>);

/// Result of a completed import
#[derive(Debug, Clone, PartialEq)]
pub struct ImportResult {
    /// Stored name of the batch in the uploads directory
    pub file_name: String,
    /// Number of rows appended to the store
    pub imported: usize,
    /// Number of rows that could not be parsed
    pub rejected: usize,
    /// Ids assigned to the appended rows
    pub imported_ids: Vec<u64>,
    /// Error messages by line number
    pub error_messages: Vec<(usize, String)>,
}

/// Service for batch ingestion
pub struct ImportService<'a> {
    storage: &'a Storage,
}

impl<'a> ImportService<'a> {
    /// Create a new import service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Parse CSV content into rows
    ///
    /// Fails only when the header row lacks a required column. Bad rows are
    /// returned as errors alongside the good ones.
    pub fn parse_csv(&self, content: &str) -> ExpenseResult<Vec<ParsedRow>> {
        parse_batch(content)
    }

    /// Ingest a batch file
    ///
    /// The file is copied into the uploads directory under its own name, the
    /// accepted rows are appended to the store and an audit entry is written.
    pub fn import_file(&self, path: &Path, audit: &AuditLogger) -> ExpenseResult<ImportResult> {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default();
        if !is_csv_name(name) {
            return Err(ExpenseError::Validation(format!(
                "Only .csv files can be imported: {}",
                path.display()
            )));
        }

        if !path.is_file() {
            return Err(ExpenseError::Import(format!(
                "File not found: {}",
                path.display()
            )));
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| ExpenseError::Import(format!("Failed to read file: {}", e)))?;
        let parsed = self.parse_csv(&content)?;

        let mut accepted = Vec::new();
        let mut error_messages = Vec::new();
        for (line, result) in parsed {
            match result {
                Ok(row) => accepted.push(row),
                Err(message) => {
                    debug!(line, %message, "rejected batch row");
                    error_messages.push((line, message));
                }
            }
        }

        let file_name = self.storage.uploads.store(path)?;

        // Another process may have appended since startup
        self.storage.expenses.load()?;
        let imported_ids = self.storage.expenses.append(accepted)?;
        self.storage.expenses.save()?;

        audit.log(&AuditEntry::import(
            &file_name,
            &imported_ids,
            error_messages.len(),
        ))?;

        info!(
            file = %file_name,
            imported = imported_ids.len(),
            rejected = error_messages.len(),
            "imported batch"
        );

        Ok(ImportResult {
            file_name,
            imported: imported_ids.len(),
            rejected: error_messages.len(),
            imported_ids,
            error_messages,
        })
    }

    /// Read a previously uploaded batch as a fresh list of records
    ///
    /// Rows with unparseable amounts are skipped.
    pub fn read_batch(&self, name: &str, parser: &DateParser) -> ExpenseResult<Vec<ExpenseRecord>> {
        let path = self.storage.uploads.resolve(name)?;
        let content = std::fs::read_to_string(&path)
            .map_err(|e| ExpenseError::Io(format!("Failed to read {}: {}", name, e)))?;

        let records = parse_batch(&content)?
            .into_iter()
            .filter_map(|(line, result)| match result {
                Ok(row) => Some(row.to_record(parser)),
                Err(message) => {
                    debug!(file = name, line, %message, "skipping batch row");
                    None
                }
            })
            .collect();

        Ok(records)
    }

    /// Names of all uploaded batches, sorted
    pub fn list_batches(&self) -> ExpenseResult<Vec<String>> {
        self.storage.uploads.list()
    }
}

fn parse_batch(content: &str) -> ExpenseResult<Vec<ParsedRow>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(content.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| ExpenseError::Import(format!("Failed to read header row: {}", e)))?
        .clone();
    let mapping = ColumnMapping::from_headers(&headers)?;

    let mut rows = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        // Header is line 1
        let line = idx + 2;
        let row = match result {
            Ok(record) => mapping.parse_record(&record),
            Err(e) => Err(format!("Error reading CSV record: {}", e)),
        };
        rows.push((line, row));
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::SpendPaths;
    use crate::storage::initialize_storage;
    use chrono::NaiveDate;
    use std::fs;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage, AuditLogger) {
        let temp_dir = TempDir::new().unwrap();
        let paths = SpendPaths::with_base_dir(temp_dir.path().join("spendlens"));
        initialize_storage(&paths).unwrap();
        let audit = AuditLogger::new(paths.audit_log());
        let storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage, audit)
    }

    fn write_batch(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_headers_any_order_and_case() {
        let headers = StringRecord::from(vec!["Category", "note", " AMOUNT ", "Date"]);
        let mapping = ColumnMapping::from_headers(&headers).unwrap();
        assert_eq!(mapping.date_column, 3);
        assert_eq!(mapping.amount_column, 2);
        assert_eq!(mapping.category_column, 0);
    }

    #[test]
    fn test_missing_column_is_import_error() {
        let (_temp_dir, storage, _audit) = create_test_storage();
        let service = ImportService::new(&storage);

        let err = service.parse_csv("date,amount\n2024-01-01,5\n").unwrap_err();
        assert!(matches!(err, ExpenseError::Import(_)));
        assert!(err.to_string().contains("category"));
    }

    #[test]
    fn test_parse_rows_and_rejects() {
        let (_temp_dir, storage, _audit) = create_test_storage();
        let service = ImportService::new(&storage);

        let content = "date,amount,category\n\
                       2024-01-05,100,food\n\
                       someday,\"$1,234.56\",rent\n\
                       2024-01-07,lots,food\n\
                       2024-01-08,(12.00),refund\n";
        let rows = service.parse_csv(content).unwrap();
        assert_eq!(rows.len(), 4);

        let (line, first) = &rows[0];
        assert_eq!(*line, 2);
        assert_eq!(first.as_ref().unwrap().amount, Amount::from_cents(10000));

        // Unparseable dates are kept raw
        let second = rows[1].1.as_ref().unwrap();
        assert_eq!(second.date, "someday");
        assert_eq!(second.amount, Amount::from_cents(123456));

        assert_eq!(rows[2].0, 4);
        assert!(rows[2].1.is_err());

        assert_eq!(rows[3].1.as_ref().unwrap().amount, Amount::from_cents(-1200));
    }

    #[test]
    fn test_short_row_is_rejected() {
        let (_temp_dir, storage, _audit) = create_test_storage();
        let service = ImportService::new(&storage);

        let rows = service.parse_csv("date,amount,category\n2024-01-01,5\n").unwrap();
        assert_eq!(rows[0].1, Err("Missing category value".to_string()));
    }

    #[test]
    fn test_out_of_range_amount_is_rejected() {
        let (_temp_dir, storage, _audit) = create_test_storage();
        let service = ImportService::new(&storage);

        let content = "date,amount,category\n\
                       2024-01-01,50000000000000000000000000000,rent\n\
                       2024-01-02,50000000000000000000000000000,rent\n\
                       2024-01-03,12.50,food\n";
        let rows = service.parse_csv(content).unwrap();
        assert!(rows[0].1.as_ref().unwrap_err().contains("out of range"));
        assert!(rows[1].1.is_err());
        assert_eq!(rows[2].1.as_ref().unwrap().amount, Amount::from_cents(1250));
    }

    #[test]
    fn test_import_file() {
        let (temp_dir, storage, audit) = create_test_storage();
        let service = ImportService::new(&storage);
        let path = write_batch(
            &temp_dir,
            "jan.csv",
            "date,amount,category\n2024-01-05,100,food\n2024-01-10,50,food\n2024-01-11,x,food\n",
        );

        let result = service.import_file(&path, &audit).unwrap();
        assert_eq!(result.file_name, "jan.csv");
        assert_eq!(result.imported, 2);
        assert_eq!(result.rejected, 1);
        assert_eq!(result.imported_ids, vec![1, 2]);
        assert_eq!(result.error_messages[0].0, 4);

        assert_eq!(storage.expenses.count().unwrap(), 2);
        assert_eq!(service.list_batches().unwrap(), vec!["jan.csv".to_string()]);

        let entries = audit.read_all().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].imported, 2);
        assert_eq!(entries[0].rejected, 1);
    }

    #[test]
    fn test_import_appends_across_batches() {
        let (temp_dir, storage, audit) = create_test_storage();
        let service = ImportService::new(&storage);

        let jan = write_batch(&temp_dir, "jan.csv", "date,amount,category\n2024-01-05,1,a\n");
        let feb = write_batch(&temp_dir, "feb.csv", "date,amount,category\n2024-02-05,2,b\n");
        service.import_file(&jan, &audit).unwrap();
        let result = service.import_file(&feb, &audit).unwrap();

        assert_eq!(result.imported_ids, vec![2]);
        assert_eq!(storage.expenses.count().unwrap(), 2);
        assert_eq!(
            service.list_batches().unwrap(),
            vec!["feb.csv".to_string(), "jan.csv".to_string()]
        );
    }

    #[test]
    fn test_import_rejects_non_csv() {
        let (temp_dir, storage, audit) = create_test_storage();
        let service = ImportService::new(&storage);
        let path = write_batch(&temp_dir, "notes.txt", "date,amount,category\n");

        let err = service.import_file(&path, &audit).unwrap_err();
        assert!(err.is_validation());
        assert_eq!(storage.expenses.count().unwrap(), 0);
        assert!(audit.read_all().unwrap().is_empty());
    }

    #[test]
    fn test_import_bad_header_stores_nothing() {
        let (temp_dir, storage, audit) = create_test_storage();
        let service = ImportService::new(&storage);
        let path = write_batch(&temp_dir, "bad.csv", "when,how much\n2024-01-01,5\n");

        assert!(service.import_file(&path, &audit).is_err());
        assert!(service.list_batches().unwrap().is_empty());
    }

    #[test]
    fn test_read_batch() {
        let (temp_dir, storage, audit) = create_test_storage();
        let service = ImportService::new(&storage);
        let path = write_batch(
            &temp_dir,
            "mixed.csv",
            "date,amount,category\n2024-01-05,100,food\nnot a date,5,food\n2024-01-06,?,food\n",
        );
        service.import_file(&path, &audit).unwrap();

        let records = service.read_batch("mixed.csv", &DateParser::new()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(
            records[0].date.parsed(),
            Some(NaiveDate::from_ymd_opt(2024, 1, 5).unwrap())
        );
        assert!(!records[1].date.is_parsed());
    }

    #[test]
    fn test_read_batch_unknown_name() {
        let (_temp_dir, storage, _audit) = create_test_storage();
        let service = ImportService::new(&storage);

        let err = service.read_batch("missing.csv", &DateParser::new()).unwrap_err();
        assert!(err.is_not_found());
    }
}
