//! Category breakdown
//!
//! Groups expenses by category label and sums them. Labels are compared by
//! raw equality, so "Food" and "food " are separate groups.

use std::collections::HashMap;
use std::io::Write;

use serde::Serialize;

use crate::display::report::{double_separator, format_share, separator, share_bar, truncate};
use crate::display::DisplayOptions;
use crate::error::ExpenseResult;
use crate::models::{Amount, ExpenseRecord};

use super::aggregate::{dated_only, Aggregation, DatedExpense};
use super::Report;

const REPORT_WIDTH: usize = 72;

/// Total for one category
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotal {
    pub category: String,
    /// Sum of the category's amounts, rounded to cents
    pub total: Amount,
    /// Percentage of the unrounded grand total
    pub share: f64,
    /// Number of records in the group
    pub count: usize,
}

/// Per-category totals in order of first appearance
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryBreakdown {
    pub entries: Vec<CategoryTotal>,
    /// Grand total, rounded to cents
    pub total: Amount,
}

impl CategoryBreakdown {
    /// Rounded total for a category, if it has any records
    pub fn get(&self, category: &str) -> Option<Amount> {
        self.entries
            .iter()
            .find(|entry| entry.category == category)
            .map(|entry| entry.total)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.category.as_str())
    }

    /// (category, total) pairs in group order
    pub fn totals(&self) -> Vec<(&str, Amount)> {
        self.entries
            .iter()
            .map(|entry| (entry.category.as_str(), entry.total))
            .collect()
    }
}

/// Sum amounts per category over every record with a parseable date
pub fn summarize_by_category(records: &[ExpenseRecord]) -> Aggregation<CategoryBreakdown> {
    group_by_category(&dated_only(records))
}

/// Group already-dated expenses by category
pub(crate) fn group_by_category(expenses: &[DatedExpense<'_>]) -> Aggregation<CategoryBreakdown> {
    if expenses.is_empty() {
        return Aggregation::Empty;
    }

    let mut order: Vec<&str> = Vec::new();
    let mut sums: HashMap<&str, (Amount, usize)> = HashMap::new();

    for expense in expenses {
        let entry = sums.entry(expense.category).or_insert_with(|| {
            order.push(expense.category);
            (Amount::ZERO, 0)
        });
        entry.0 += expense.amount;
        entry.1 += 1;
    }

    let grand_total: Amount = sums.values().map(|(sum, _)| *sum).sum();
    let grand_total_f64 = grand_total.to_f64();

    let entries = order
        .into_iter()
        .map(|category| {
            let (sum, count) = sums[category];
            let share = if grand_total_f64 == 0.0 {
                0.0
            } else {
                sum.to_f64() / grand_total_f64 * 100.0
            };
            CategoryTotal {
                category: category.to_string(),
                total: sum.round_for_display(),
                share,
                count,
            }
        })
        .collect();

    Aggregation::Populated(CategoryBreakdown {
        entries,
        total: grand_total.round_for_display(),
    })
}

/// Render a breakdown under a title, or the "no data" notice
pub(crate) fn format_breakdown(
    title: &str,
    breakdown: &Aggregation<CategoryBreakdown>,
    empty_notice: &str,
    options: &DisplayOptions,
) -> String {
    let mut output = String::new();
    output.push_str(title);
    output.push('\n');
    output.push_str(&double_separator(REPORT_WIDTH));
    output.push('\n');

    let breakdown = match breakdown {
        Aggregation::Empty => {
            output.push_str(empty_notice);
            output.push('\n');
            return output;
        }
        Aggregation::Populated(breakdown) => breakdown,
    };

    output.push_str(&format!(
        "{:<28} {:>12} {:>8}  {}\n",
        "Category", "Amount", "Share", "Count"
    ));
    output.push_str(&separator(REPORT_WIDTH));
    output.push('\n');

    let max_share = breakdown
        .entries
        .iter()
        .map(|entry| entry.share)
        .fold(0.0_f64, f64::max);

    for entry in &breakdown.entries {
        output.push_str(&format!(
            "{:<28} {:>12} {:>8}  {:<5} {}\n",
            truncate(&entry.category, 28),
            entry.total.format_with_symbol(&options.currency_symbol),
            format_share(entry.share),
            entry.count,
            share_bar(entry.share, max_share, options.bar_width),
        ));
    }

    output.push_str(&separator(REPORT_WIDTH));
    output.push('\n');
    output.push_str(&format!(
        "{:<28} {:>12}\n",
        "TOTAL",
        breakdown.total.format_with_symbol(&options.currency_symbol)
    ));

    output
}

/// Write a breakdown as CSV rows (header only when empty)
pub(crate) fn write_breakdown_csv<W: Write>(
    breakdown: &Aggregation<CategoryBreakdown>,
    writer: &mut csv::Writer<W>,
) -> ExpenseResult<()> {
    writer.write_record(["category", "amount", "share", "count"])?;

    if let Aggregation::Populated(breakdown) = breakdown {
        for entry in &breakdown.entries {
            writer.write_record([
                entry.category.clone(),
                entry.total.to_string(),
                format!("{:.2}", entry.share),
                entry.count.to_string(),
            ])?;
        }
    }

    Ok(())
}

/// Breakdown of one uploaded batch file (pie data)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileReport {
    pub file_name: String,
    pub breakdown: Aggregation<CategoryBreakdown>,
}

impl FileReport {
    /// Summarize a batch that was read fresh from its file
    pub fn generate(file_name: impl Into<String>, records: &[ExpenseRecord]) -> Self {
        Self {
            file_name: file_name.into(),
            breakdown: summarize_by_category(records),
        }
    }

    pub fn title(&self) -> String {
        format!("Spending Breakdown in {}", self.file_name)
    }
}

impl Report for FileReport {
    fn format_terminal(&self, options: &DisplayOptions) -> String {
        format_breakdown(
            &self.title(),
            &self.breakdown,
            "No expense data available in this file.",
            options,
        )
    }

    fn write_csv<W: Write>(&self, writer: &mut csv::Writer<W>) -> ExpenseResult<()> {
        write_breakdown_csv(&self.breakdown, writer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DateField;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn amount(s: &str) -> Amount {
        Amount::new(Decimal::from_str(s).unwrap())
    }

    fn sample_records() -> Vec<ExpenseRecord> {
        vec![
            ExpenseRecord::new(date(2024, 1, 5), amount("100"), "food"),
            ExpenseRecord::new(date(2024, 1, 10), amount("50"), "food"),
            ExpenseRecord::new(date(2024, 2, 1), amount("30"), "travel"),
        ]
    }

    #[test]
    fn test_summarize_by_category_example() {
        let breakdown = summarize_by_category(&sample_records())
            .into_populated()
            .unwrap();

        assert_eq!(
            breakdown.totals(),
            vec![("food", amount("150.0")), ("travel", amount("30.0"))]
        );
        assert_eq!(breakdown.total, amount("180"));
        assert_eq!(breakdown.entries[0].count, 2);
    }

    #[test]
    fn test_empty_input_is_empty_signal() {
        assert_eq!(summarize_by_category(&[]), Aggregation::Empty);
    }

    #[test]
    fn test_all_unparseable_is_empty_signal() {
        let records = vec![
            ExpenseRecord::new(DateField::Unparseable("??".into()), amount("10"), "food"),
            ExpenseRecord::new(DateField::Unparseable("".into()), amount("20"), "rent"),
        ];
        assert!(summarize_by_category(&records).is_empty());
    }

    #[test]
    fn test_zero_valued_group_is_not_empty() {
        let records = vec![
            ExpenseRecord::new(date(2024, 1, 1), amount("10"), "refunds"),
            ExpenseRecord::new(date(2024, 1, 2), amount("-10"), "refunds"),
        ];
        let breakdown = summarize_by_category(&records).into_populated().unwrap();
        assert_eq!(breakdown.get("refunds"), Some(Amount::ZERO));
        assert_eq!(breakdown.entries[0].share, 0.0);
    }

    #[test]
    fn test_total_matches_parseable_records() {
        let mut records = sample_records();
        records.push(ExpenseRecord::new(
            DateField::Unparseable("n/a".into()),
            amount("1000"),
            "food",
        ));
        records.push(ExpenseRecord::new(date(2023, 12, 31), amount("12.34"), "rent"));

        let breakdown = summarize_by_category(&records).into_populated().unwrap();
        let per_category: Amount = breakdown.entries.iter().map(|e| e.total).sum();
        let expected: Amount = records
            .iter()
            .filter(|r| r.date.is_parsed())
            .map(|r| r.amount)
            .sum();

        assert_eq!(per_category, expected);
        assert_eq!(breakdown.total, expected);
    }

    #[test]
    fn test_categories_are_not_normalized() {
        let records = vec![
            ExpenseRecord::new(date(2024, 1, 1), amount("1"), "Food"),
            ExpenseRecord::new(date(2024, 1, 1), amount("2"), "food"),
            ExpenseRecord::new(date(2024, 1, 1), amount("4"), "food "),
        ];
        let breakdown = summarize_by_category(&records).into_populated().unwrap();
        assert_eq!(breakdown.len(), 3);
        assert_eq!(breakdown.get("food"), Some(amount("2")));
    }

    #[test]
    fn test_group_order_is_first_appearance() {
        let records = vec![
            ExpenseRecord::new(date(2024, 1, 1), amount("1"), "zoo"),
            ExpenseRecord::new(date(2024, 1, 1), amount("1"), "apples"),
            ExpenseRecord::new(date(2024, 1, 1), amount("1"), "zoo"),
        ];
        let breakdown = summarize_by_category(&records).into_populated().unwrap();
        let order: Vec<&str> = breakdown.categories().collect();
        assert_eq!(order, vec!["zoo", "apples"]);
    }

    #[test]
    fn test_rounding_happens_after_summation() {
        let single = vec![ExpenseRecord::new(date(2024, 1, 1), amount("19.995"), "misc")];
        let breakdown = summarize_by_category(&single).into_populated().unwrap();
        assert_eq!(breakdown.get("misc"), Some(amount("20.00")));

        // Three half-cents round to 0.02 once summed; per-record rounding would give 0.03
        let halves = vec![
            ExpenseRecord::new(date(2024, 1, 1), amount("0.005"), "misc"),
            ExpenseRecord::new(date(2024, 1, 2), amount("0.005"), "misc"),
            ExpenseRecord::new(date(2024, 1, 3), amount("0.005"), "misc"),
        ];
        let breakdown = summarize_by_category(&halves).into_populated().unwrap();
        assert_eq!(breakdown.get("misc"), Some(amount("0.02")));
    }

    #[test]
    fn test_shares() {
        let breakdown = summarize_by_category(&sample_records())
            .into_populated()
            .unwrap();
        assert!((breakdown.entries[0].share - 83.333).abs() < 0.01);
        assert!((breakdown.entries[1].share - 16.667).abs() < 0.01);
    }

    #[test]
    fn test_extreme_amounts_do_not_panic() {
        let huge = Amount::new(Decimal::MAX);
        let records = vec![
            ExpenseRecord::new(date(2024, 1, 1), huge, "rent"),
            ExpenseRecord::new(date(2024, 1, 2), huge, "rent"),
            ExpenseRecord::new(date(2024, 1, 3), huge, "food"),
        ];

        let breakdown = summarize_by_category(&records).into_populated().unwrap();
        assert_eq!(breakdown.get("rent"), Some(huge.round_for_display()));
        assert_eq!(breakdown.total, huge.round_for_display());
    }

    #[test]
    fn test_file_report_terminal() {
        let report = FileReport::generate("jan.csv", &sample_records());
        let output = report.format_terminal(&DisplayOptions::default());
        assert!(output.starts_with("Spending Breakdown in jan.csv"));
        assert!(output.contains("$150.00"));
        assert!(output.contains("83.3%"));
        assert!(output.contains("$180.00"));
    }

    #[test]
    fn test_file_report_empty_terminal() {
        let report = FileReport::generate("empty.csv", &[]);
        let output = report.format_terminal(&DisplayOptions::default());
        assert!(output.contains("No expense data available"));
    }

    #[test]
    fn test_file_report_csv() {
        let report = FileReport::generate("jan.csv", &sample_records());
        let mut writer = csv::Writer::from_writer(Vec::new());
        report.write_csv(&mut writer).unwrap();
        let bytes = writer.into_inner().unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "category,amount,share,count");
        assert_eq!(lines[1], "food,150.00,83.33,2");
        assert_eq!(lines[2], "travel,30.00,16.67,1");
    }
}
