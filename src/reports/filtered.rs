//! Month-filtered breakdown
//!
//! Resolves the requested period (falling back to the current month for
//! missing or invalid input), keeps the records dated in that month, and
//! summarizes them by category. The resolved period is always reported,
//! including when nothing matched.

use std::io::Write;

use chrono::NaiveDate;
use serde::Serialize;

use crate::display::DisplayOptions;
use crate::error::ExpenseResult;
use crate::models::{ExpenseRecord, YearMonth};

use super::aggregate::{dated_only, Aggregation, DatedExpense};
use super::category::{format_breakdown, group_by_category, write_breakdown_csv, CategoryBreakdown};
use super::Report;

/// Work out which month a query refers to
///
/// A missing year or month takes the value from `today`. If either one is
/// present but is not an integer, or the month is outside 1..=12, both
/// fall back to `today`'s month.
pub fn resolve_period(year: Option<&str>, month: Option<&str>, today: NaiveDate) -> YearMonth {
    let fallback = YearMonth::of(today);

    let year = match year {
        None => Some(fallback.year()),
        Some(raw) => raw.trim().parse::<i32>().ok(),
    };
    let month = match month {
        None => Some(fallback.month()),
        Some(raw) => raw.trim().parse::<u32>().ok(),
    };

    let resolved = match (year, month) {
        (Some(year), Some(month)) => YearMonth::new(year, month),
        _ => None,
    };

    resolved.unwrap_or_else(|| {
        tracing::debug!(%fallback, "invalid period filter, using current month");
        fallback
    })
}

/// Breakdown of the records in one calendar month
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthReport {
    /// The month actually queried
    pub period: YearMonth,
    pub breakdown: Aggregation<CategoryBreakdown>,
}

impl MonthReport {
    pub fn year(&self) -> i32 {
        self.period.year()
    }

    pub fn month(&self) -> u32 {
        self.period.month()
    }

    pub fn title(&self) -> String {
        format!("Spending Breakdown for {}", self.period)
    }
}

/// Summarize one month, resolving the filter against the local clock
pub fn summarize_filtered(
    records: &[ExpenseRecord],
    year: Option<&str>,
    month: Option<&str>,
) -> MonthReport {
    summarize_filtered_at(records, year, month, chrono::Local::now().date_naive())
}

/// Summarize one month, resolving the filter against `today`
pub fn summarize_filtered_at(
    records: &[ExpenseRecord],
    year: Option<&str>,
    month: Option<&str>,
    today: NaiveDate,
) -> MonthReport {
    let period = resolve_period(year, month, today);

    let in_period: Vec<DatedExpense<'_>> = dated_only(records)
        .into_iter()
        .filter(|expense| period.contains(expense.date))
        .collect();

    MonthReport {
        period,
        breakdown: group_by_category(&in_period),
    }
}

impl Report for MonthReport {
    fn format_terminal(&self, options: &DisplayOptions) -> String {
        format_breakdown(
            &self.title(),
            &self.breakdown,
            &format!("No expenses recorded for {}.", self.period),
            options,
        )
    }

    fn write_csv<W: Write>(&self, writer: &mut csv::Writer<W>) -> ExpenseResult<()> {
        write_breakdown_csv(&self.breakdown, writer)
    }
}
