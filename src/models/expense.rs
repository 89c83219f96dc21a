//! Expense records and date coercion
//!
//! Dates arrive as free text, from an uploaded batch or from the stored
//! table. Coercion is total: every string becomes either a calendar date or
//! `DateField::Unparseable`, and nothing here ever fails.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::amount::Amount;

/// Date-only formats tried in order
pub const DEFAULT_DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%m/%d/%y",
    "%d.%m.%Y",
    "%Y%m%d",
    "%d %b %Y",
    "%b %d, %Y",
    "%B %d, %Y",
];

/// Month-only formats; the date is the first of the month
pub const MONTH_ONLY_FORMATS: &[&str] = &["%Y-%m", "%Y/%m"];

/// Date-and-time formats; the time part is discarded
pub const DEFAULT_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %H:%M",
];

/// The result of coercing a raw date string
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateField {
    Parsed(NaiveDate),
    /// Holds the raw text for diagnostics
    Unparseable(String),
}

impl DateField {
    pub fn parsed(&self) -> Option<NaiveDate> {
        match self {
            Self::Parsed(date) => Some(*date),
            Self::Unparseable(_) => None,
        }
    }

    pub fn is_parsed(&self) -> bool {
        matches!(self, Self::Parsed(_))
    }
}

impl From<NaiveDate> for DateField {
    fn from(date: NaiveDate) -> Self {
        Self::Parsed(date)
    }
}

/// Best-effort date coercion with a configurable list of formats
#[derive(Debug, Clone)]
pub struct DateParser {
    extra_formats: Vec<String>,
}

impl Default for DateParser {
    fn default() -> Self {
        Self::new()
    }
}

impl DateParser {
    /// Parser using only the built-in formats
    pub fn new() -> Self {
        Self {
            extra_formats: Vec::new(),
        }
    }

    /// Additional chrono formats, tried before the built-in ones
    pub fn with_extra_formats(extra_formats: Vec<String>) -> Self {
        Self { extra_formats }
    }

    /// Coerce a raw string into a `DateField`
    pub fn coerce(&self, raw: &str) -> DateField {
        let s = raw.trim();
        if s.is_empty() {
            return DateField::Unparseable(raw.to_string());
        }

        for format in &self.extra_formats {
            if let Some(date) = parse_with(s, format) {
                return DateField::Parsed(date);
            }
        }

        for format in DEFAULT_DATE_FORMATS {
            if let Ok(date) = NaiveDate::parse_from_str(s, format) {
                return DateField::Parsed(date);
            }
        }

        for format in DEFAULT_DATETIME_FORMATS {
            if let Ok(dt) = NaiveDateTime::parse_from_str(s, format) {
                return DateField::Parsed(dt.date());
            }
        }

        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return DateField::Parsed(dt.date_naive());
        }

        if let Some(date) = parse_month_only(s) {
            return DateField::Parsed(date);
        }

        DateField::Unparseable(raw.to_string())
    }
}

/// A user-supplied format may describe a date or a date-time
fn parse_with(s: &str, format: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, format)
        .ok()
        .or_else(|| NaiveDateTime::parse_from_str(s, format).ok().map(|dt| dt.date()))
}

fn parse_month_only(s: &str) -> Option<NaiveDate> {
    let with_day = format!("{} 1", s);
    MONTH_ONLY_FORMATS.iter().find_map(|format| {
        NaiveDate::parse_from_str(&with_day, &format!("{} %d", format)).ok()
    })
}

/// One expense entry as seen by the aggregator
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseRecord {
    pub date: DateField,
    pub amount: Amount,
    /// Opaque label; compared by raw equality
    pub category: String,
}

impl ExpenseRecord {
    pub fn new(date: impl Into<DateField>, amount: Amount, category: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            amount,
            category: category.into(),
        }
    }

    /// Build a record from raw text, coercing the date
    pub fn from_raw(
        parser: &DateParser,
        raw_date: &str,
        amount: Amount,
        category: impl Into<String>,
    ) -> Self {
        Self {
            date: parser.coerce(raw_date),
            amount,
            category: category.into(),
        }
    }
}

/// A row of the persisted expense table
///
/// The date is stored exactly as it was uploaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseRow {
    pub id: u64,
    pub date: String,
    pub amount: Amount,
    pub category: String,
}

impl ExpenseRow {
    pub fn to_record(&self, parser: &DateParser) -> ExpenseRecord {
        ExpenseRecord::from_raw(parser, &self.date, self.amount, self.category.clone())
    }
}

/// A row accepted from an uploaded batch, not yet assigned an id
#[derive(Debug, Clone, PartialEq)]
pub struct NewExpense {
    pub date: String,
    pub amount: Amount,
    pub category: String,
}

impl NewExpense {
    pub fn to_record(&self, parser: &DateParser) -> ExpenseRecord {
        ExpenseRecord::from_raw(parser, &self.date, self.amount, self.category.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_coerce_common_formats() {
        let parser = DateParser::new();
        assert_eq!(parser.coerce("2024-01-05"), DateField::Parsed(date(2024, 1, 5)));
        assert_eq!(parser.coerce("2024/01/05"), DateField::Parsed(date(2024, 1, 5)));
        assert_eq!(parser.coerce("01/05/2024"), DateField::Parsed(date(2024, 1, 5)));
        assert_eq!(parser.coerce(" 2024-01-05 "), DateField::Parsed(date(2024, 1, 5)));
        assert_eq!(
            parser.coerce("2024-01-05 13:45:00"),
            DateField::Parsed(date(2024, 1, 5))
        );
        assert_eq!(
            parser.coerce("2024-01-05T13:45:00+02:00"),
            DateField::Parsed(date(2024, 1, 5))
        );
    }

    #[test]
    fn test_coerce_is_total() {
        let parser = DateParser::new();
        for raw in ["", "   ", "not a date", "2024-13-01", "2024-02-30", "yesterday"] {
            assert_eq!(
                parser.coerce(raw),
                DateField::Unparseable(raw.to_string()),
                "{raw:?} should be unparseable"
            );
        }
    }

    #[test]
    fn test_coerce_month_only() {
        let parser = DateParser::new();
        assert_eq!(parser.coerce("2024-01"), DateField::Parsed(date(2024, 1, 1)));
        assert_eq!(parser.coerce("2023/12"), DateField::Parsed(date(2023, 12, 1)));
        assert_eq!(parser.coerce("2024-13"), DateField::Unparseable("2024-13".into()));
    }

    #[test]
    fn test_extra_formats_take_priority() {
        let parser = DateParser::with_extra_formats(vec!["%d/%m/%Y".to_string()]);
        assert_eq!(parser.coerce("05/01/2024"), DateField::Parsed(date(2024, 1, 5)));
        assert_eq!(
            DateParser::new().coerce("05/01/2024"),
            DateField::Parsed(date(2024, 5, 1))
        );
    }

    #[test]
    fn test_row_to_record() {
        let row = ExpenseRow {
            id: 7,
            date: "garbage".into(),
            amount: Amount::from_cents(500),
            category: "food".into(),
        };
        let record = row.to_record(&DateParser::new());
        assert!(!record.date.is_parsed());
        assert_eq!(record.category, "food");
    }
}
