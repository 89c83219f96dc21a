//! SpendLens - expense aggregation from uploaded CSV batches
//!
//! This library ingests expense batches, keeps them in a flat JSON store and
//! turns them into three breakdowns: spending per category, a month by
//! category table, and spending per category for a single month.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Amounts, months and expense records with date coercion
//! - `reports`: The aggregation core and the report types built on it
//! - `storage`: JSON file storage layer and the uploads directory
//! - `services`: Batch ingestion, reports and history over storage
//! - `audit`: Audit logging of imports
//! - `display` / `export`: Terminal rendering and file export
//! - `cli`: Command handlers for the `spendlens` binary
//!
//! # Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use spendlens::models::{Amount, ExpenseRecord};
//! use spendlens::reports::summarize_by_category;
//!
//! let records = vec![
//!     ExpenseRecord::new(NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(), Amount::from_cents(10000), "food"),
//!     ExpenseRecord::new(NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(), Amount::from_cents(3000), "travel"),
//! ];
//! let breakdown = summarize_by_category(&records).into_populated().unwrap();
//! assert_eq!(breakdown.get("food"), Some(Amount::from_cents(10000)));
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{ExpenseError, ExpenseResult};
