//! History display formatting
//!
//! Renders the most recent stored expenses as a table.

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style};
use tabled::{Table, Tabled};

use crate::models::ExpenseRow;

use super::report::truncate;
use super::DisplayOptions;

#[derive(Tabled)]
struct HistoryLine {
    #[tabled(rename = "ID")]
    id: u64,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

/// Format stored expenses as a table, newest first as given
pub fn format_history(rows: &[ExpenseRow], options: &DisplayOptions) -> String {
    if rows.is_empty() {
        return "No expenses recorded yet.\n\nRun 'spendlens import <file.csv>' to add some."
            .to_string();
    }

    let lines: Vec<HistoryLine> = rows
        .iter()
        .map(|row| HistoryLine {
            id: row.id,
            date: row.date.clone(),
            category: truncate(&row.category, 30),
            amount: row.amount.format_with_symbol(&options.currency_symbol),
        })
        .collect();

    let mut table = Table::new(lines);
    table
        .with(Style::rounded())
        .with(Modify::new(Columns::single(3)).with(Alignment::right()));

    table.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Amount;

    #[test]
    fn test_format_history_empty() {
        let output = format_history(&[], &DisplayOptions::default());
        assert!(output.contains("No expenses recorded yet"));
    }

    #[test]
    fn test_format_history_rows() {
        let rows = vec![ExpenseRow {
            id: 3,
            date: "2024-02-01".into(),
            amount: Amount::from_cents(3000),
            category: "travel".into(),
        }];
        let output = format_history(&rows, &DisplayOptions::default());
        assert!(output.contains("2024-02-01"));
        assert!(output.contains("travel"));
        assert!(output.contains("$30.00"));
        assert!(output.contains("Category"));
    }
}
