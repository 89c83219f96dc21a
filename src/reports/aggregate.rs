//! Shared pieces of every aggregation
//!
//! `Aggregation` is the one result shape all summaries return, and
//! `dated_only` is the single place where records with unparseable dates
//! are dropped.

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::{Amount, ExpenseRecord};

/// Either "no qualifying records" or a populated summary
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "data", rename_all = "lowercase")]
pub enum Aggregation<T> {
    Empty,
    Populated(T),
}

impl<T> Aggregation<T> {
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    pub fn populated(&self) -> Option<&T> {
        match self {
            Self::Empty => None,
            Self::Populated(value) => Some(value),
        }
    }

    pub fn into_populated(self) -> Option<T> {
        match self {
            Self::Empty => None,
            Self::Populated(value) => Some(value),
        }
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Aggregation<U> {
        match self {
            Self::Empty => Aggregation::Empty,
            Self::Populated(value) => Aggregation::Populated(f(value)),
        }
    }
}

/// A record whose date survived coercion
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DatedExpense<'a> {
    pub date: NaiveDate,
    pub amount: Amount,
    pub category: &'a str,
}

/// Drop records with unparseable dates
pub fn dated_only(records: &[ExpenseRecord]) -> Vec<DatedExpense<'_>> {
    let dated: Vec<DatedExpense<'_>> = records
        .iter()
        .filter_map(|record| {
            record.date.parsed().map(|date| DatedExpense {
                date,
                amount: record.amount,
                category: record.category.as_str(),
            })
        })
        .collect();

    let dropped = records.len() - dated.len();
    if dropped > 0 {
        tracing::debug!(dropped, kept = dated.len(), "excluded records with unparseable dates");
    }

    dated
}
