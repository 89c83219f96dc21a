//! Core data models for SpendLens
//!
//! Expense records, decimal amounts, and the calendar-month key used to
//! group them.

pub mod amount;
pub mod expense;
pub mod month;

pub use amount::{Amount, AmountParseError};
pub use expense::{DateField, DateParser, ExpenseRecord, ExpenseRow, NewExpense};
pub use month::{MonthParseError, YearMonth};
