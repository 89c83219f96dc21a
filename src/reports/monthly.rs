//! Monthly trend
//!
//! Builds a dense month x category table: every category that appears in
//! any month gets an explicit value, possibly zero, in every month, so a
//! line per category has no gaps.

use std::collections::{BTreeSet, HashMap};
use std::io::Write;

use serde::Serialize;

use crate::display::report::{double_separator, separator, truncate};
use crate::display::DisplayOptions;
use crate::error::ExpenseResult;
use crate::models::{Amount, ExpenseRecord, YearMonth};

use super::aggregate::{dated_only, Aggregation};
use super::Report;

const MONTH_COLUMN: usize = 9;
const MAX_CATEGORY_COLUMN: usize = 14;

/// One month of the trend table, aligned with `MonthlyTrend::categories`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthRow {
    pub month: YearMonth,
    pub amounts: Vec<Amount>,
}

/// Dense table of sums keyed by month, one column per category
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyTrend {
    categories: Vec<String>,
    rows: Vec<MonthRow>,
}

impl MonthlyTrend {
    /// Categories, sorted by label
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Rows in chronological order
    pub fn rows(&self) -> &[MonthRow] {
        &self.rows
    }

    pub fn months(&self) -> Vec<YearMonth> {
        self.rows.iter().map(|row| row.month).collect()
    }

    /// Sum for a (month, category) cell; `None` only if either key is absent
    pub fn value(&self, month: YearMonth, category: &str) -> Option<Amount> {
        let column = self.column(category)?;
        self.rows
            .iter()
            .find(|row| row.month == month)
            .map(|row| row.amounts[column])
    }

    /// The line for one category, one point per month
    pub fn series(&self, category: &str) -> Option<Vec<(YearMonth, Amount)>> {
        let column = self.column(category)?;
        Some(
            self.rows
                .iter()
                .map(|row| (row.month, row.amounts[column]))
                .collect(),
        )
    }

    /// Sum of every rounded cell in a month
    pub fn month_total(&self, month: YearMonth) -> Option<Amount> {
        self.rows
            .iter()
            .find(|row| row.month == month)
            .map(|row| row.amounts.iter().sum())
    }

    fn column(&self, category: &str) -> Option<usize> {
        self.categories.iter().position(|c| c == category)
    }
}

/// Group by (month, category) and fill every missing cell with zero
///
/// Cells are rounded to cents once the sums are complete, so every export
/// format carries the same values.
pub fn summarize_by_month_and_category(records: &[ExpenseRecord]) -> Aggregation<MonthlyTrend> {
    let dated = dated_only(records);
    if dated.is_empty() {
        return Aggregation::Empty;
    }

    let mut months: BTreeSet<YearMonth> = BTreeSet::new();
    let mut categories: BTreeSet<&str> = BTreeSet::new();
    let mut sums: HashMap<(YearMonth, &str), Amount> = HashMap::new();

    for expense in &dated {
        let month = YearMonth::of(expense.date);
        months.insert(month);
        categories.insert(expense.category);
        *sums.entry((month, expense.category)).or_default() += expense.amount;
    }

    let categories: Vec<&str> = categories.into_iter().collect();
    let rows = months
        .into_iter()
        .map(|month| MonthRow {
            month,
            amounts: categories
                .iter()
                .map(|category| {
                    sums.get(&(month, *category))
                        .map(|sum| sum.round_for_display())
                        .unwrap_or(Amount::ZERO)
                })
                .collect(),
        })
        .collect();

    Aggregation::Populated(MonthlyTrend {
        categories: categories.into_iter().map(str::to_string).collect(),
        rows,
    })
}

/// Monthly spending per category over the whole store (line data)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendReport {
    pub trend: Aggregation<MonthlyTrend>,
}

impl TrendReport {
    pub fn generate(records: &[ExpenseRecord]) -> Self {
        Self {
            trend: summarize_by_month_and_category(records),
        }
    }

    pub fn title(&self) -> &'static str {
        "Monthly Spending per Category"
    }
}

impl Report for TrendReport {
    fn format_terminal(&self, _options: &DisplayOptions) -> String {
        let mut output = String::new();
        output.push_str(self.title());
        output.push('\n');

        let trend = match &self.trend {
            Aggregation::Empty => {
                output.push_str(&double_separator(40));
                output.push_str("\nNo expense data available.\n");
                return output;
            }
            Aggregation::Populated(trend) => trend,
        };

        let widths: Vec<usize> = trend
            .categories
            .iter()
            .map(|c| c.chars().count().clamp(10, MAX_CATEGORY_COLUMN))
            .collect();
        let table_width = MONTH_COLUMN + widths.iter().map(|w| w + 1).sum::<usize>();

        output.push_str(&double_separator(table_width));
        output.push('\n');

        output.push_str(&format!("{:<width$}", "Month", width = MONTH_COLUMN));
        for (category, width) in trend.categories.iter().zip(&widths) {
            output.push_str(&format!(" {:>width$}", truncate(category, *width), width = width));
        }
        output.push('\n');
        output.push_str(&separator(table_width));
        output.push('\n');

        for row in &trend.rows {
            output.push_str(&format!("{:<width$}", row.month.to_string(), width = MONTH_COLUMN));
            for (amount, width) in row.amounts.iter().zip(&widths) {
                output.push_str(&format!(" {:>width$}", amount.to_string(), width = width));
            }
            output.push('\n');
        }

        output
    }

    fn write_csv<W: Write>(&self, writer: &mut csv::Writer<W>) -> ExpenseResult<()> {
        match &self.trend {
            Aggregation::Empty => writer.write_record(["month"])?,
            Aggregation::Populated(trend) => {
                let mut header = vec!["month".to_string()];
                header.extend(trend.categories.iter().cloned());
                writer.write_record(&header)?;

                for row in &trend.rows {
                    let mut record = vec![row.month.to_string()];
                    record.extend(row.amounts.iter().map(|a| a.to_string()));
                    writer.write_record(&record)?;
                }
            }
        }
        Ok(())
    }
}
