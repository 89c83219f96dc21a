//! Reports module for SpendLens
//!
//! Turns expense records into grouped summaries: a category breakdown for a
//! batch file, a dense monthly trend over the store, and a breakdown of a
//! single month. Every summary reports "no data" through `Aggregation`.

pub mod aggregate;
pub mod category;
pub mod filtered;
pub mod monthly;

pub use aggregate::{dated_only, Aggregation, DatedExpense};
pub use category::{summarize_by_category, CategoryBreakdown, CategoryTotal, FileReport};
pub use filtered::{resolve_period, summarize_filtered, summarize_filtered_at, MonthReport};
pub use monthly::{summarize_by_month_and_category, MonthRow, MonthlyTrend, TrendReport};

use std::io::Write;

use serde::Serialize;

use crate::display::DisplayOptions;
use crate::error::ExpenseResult;

/// A report that can be shown in the terminal or exported
pub trait Report: Serialize {
    /// Human-readable rendering
    fn format_terminal(&self, options: &DisplayOptions) -> String;

    /// Tabular rendering
    fn write_csv<W: Write>(&self, writer: &mut csv::Writer<W>) -> ExpenseResult<()>;
}
