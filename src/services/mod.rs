//! Service layer for SpendLens
//!
//! The service layer sits between the CLI and storage: it ingests batches,
//! reads the store fresh for every request and feeds the aggregation core.

pub mod expense;
pub mod import;
pub mod report;

pub use expense::ExpenseService;
pub use import::{ColumnMapping, ImportResult, ImportService, ParsedRow};
pub use report::ReportService;
