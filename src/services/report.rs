//! Report service
//!
//! Builds the three breakdowns from a fresh read of the persisted store or
//! of a single uploaded batch.

use chrono::NaiveDate;

use crate::error::ExpenseResult;
use crate::models::{DateParser, ExpenseRecord};
use crate::reports::{
    summarize_filtered, summarize_filtered_at, FileReport, MonthReport, TrendReport,
};
use crate::storage::Storage;

use super::import::ImportService;

/// Service for generating reports
pub struct ReportService<'a> {
    storage: &'a Storage,
    parser: DateParser,
}

impl<'a> ReportService<'a> {
    pub fn new(storage: &'a Storage, parser: DateParser) -> Self {
        Self { storage, parser }
    }

    /// Category breakdown of one uploaded batch
    pub fn file_report(&self, name: &str) -> ExpenseResult<FileReport> {
        let records = ImportService::new(self.storage).read_batch(name, &self.parser)?;
        Ok(FileReport::generate(name, &records))
    }

    /// Month by category table over the whole store
    pub fn trend_report(&self) -> ExpenseResult<TrendReport> {
        Ok(TrendReport::generate(&self.stored_records()?))
    }

    /// Category breakdown of one month of the store
    ///
    /// Missing or invalid filter values fall back to the current month.
    pub fn month_report(&self, year: Option<&str>, month: Option<&str>) -> ExpenseResult<MonthReport> {
        let records = self.stored_records()?;
        Ok(summarize_filtered(&records, year, month))
    }

    /// Same as `month_report`, resolving defaults against `today`
    pub fn month_report_at(
        &self,
        year: Option<&str>,
        month: Option<&str>,
        today: NaiveDate,
    ) -> ExpenseResult<MonthReport> {
        let records = self.stored_records()?;
        Ok(summarize_filtered_at(&records, year, month, today))
    }

    fn stored_records(&self) -> ExpenseResult<Vec<ExpenseRecord>> {
        self.storage.expenses.load()?;
        let rows = self.storage.expenses.get_all()?;
        Ok(rows.iter().map(|row| row.to_record(&self.parser)).collect())
    }
}
