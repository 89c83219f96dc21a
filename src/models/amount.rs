//! Amount type for expense values
//!
//! Stores amounts as exact decimals so that repeated summation never drifts.
//! Rounding to cents happens only when a total is presented.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign};
use std::str::FromStr;

/// Number of decimal places used when presenting totals
pub const DISPLAY_SCALE: u32 = 2;

/// Largest magnitude accepted from a batch (exclusive), one quadrillion
pub const MAX_MAGNITUDE: i64 = 1_000_000_000_000_000;

/// A monetary amount with arbitrary decimal precision
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Amount(Decimal);

impl Amount {
    /// The zero amount
    pub const ZERO: Amount = Amount(Decimal::ZERO);

    /// Wrap an exact decimal value
    pub const fn new(value: Decimal) -> Self {
        Self(value)
    }

    /// Create an amount from a count of cents
    ///
    /// # Examples
    /// ```
    /// use spendlens::models::Amount;
    /// let amount = Amount::from_cents(1050); // 10.50
    /// assert_eq!(amount.to_string(), "10.50");
    /// ```
    pub fn from_cents(cents: i64) -> Self {
        Self(Decimal::new(cents, 2))
    }

    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }

    pub fn abs(&self) -> Self {
        Self(self.0.abs())
    }

    /// Round to two decimal places, halves away from zero (19.995 -> 20.00)
    pub fn round_for_display(&self) -> Self {
        Self(
            self.0
                .round_dp_with_strategy(DISPLAY_SCALE, RoundingStrategy::MidpointAwayFromZero),
        )
    }

    /// Lossy conversion for ratio math (chart shares)
    pub fn to_f64(&self) -> f64 {
        self.0.to_f64().unwrap_or(0.0)
    }

    /// Parse an amount as it appears in an exported statement
    ///
    /// Accepts "100", "-12.5", "$1,234.56", "(12.00)" (accounting negative)
    /// and scientific notation such as "1.5e2". Magnitudes of
    /// `MAX_MAGNITUDE` or more are rejected.
    pub fn parse(s: &str) -> Result<Self, AmountParseError> {
        let original = s.trim();
        let cleaned: String = original
            .chars()
            .filter(|c| {
                c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | '(' | ')' | 'e' | 'E')
            })
            .collect();

        let (negative, digits) = if cleaned.starts_with('(') && cleaned.ends_with(')') {
            (true, &cleaned[1..cleaned.len() - 1])
        } else {
            (false, cleaned.as_str())
        };

        if digits.is_empty() {
            return Err(AmountParseError::InvalidFormat(original.to_string()));
        }

        let value = Decimal::from_str(digits)
            .or_else(|_| Decimal::from_scientific(digits))
            .map_err(|_| AmountParseError::InvalidFormat(original.to_string()))?;

        if value.abs() >= Decimal::from(MAX_MAGNITUDE) {
            return Err(AmountParseError::OutOfRange(original.to_string()));
        }

        Ok(Self(if negative { -value.abs() } else { value }))
    }

    /// Format the rounded amount with a currency symbol
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        let shown = self.round_for_display();
        if shown.is_negative() {
            format!("-{}{}", symbol, shown.abs())
        } else {
            format!("{}{}", symbol, shown)
        }
    }
}

impl fmt::Display for Amount {
    /// Always shows exactly two decimal places
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut shown = self.round_for_display().0;
        shown.rescale(DISPLAY_SCALE);
        write!(f, "{}", shown)
    }
}

impl From<Decimal> for Amount {
    fn from(value: Decimal) -> Self {
        Self(value)
    }
}

// Saturates at the Decimal bounds; only a hand-edited store can get there
impl Add for Amount {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Amount {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl std::iter::Sum for Amount {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Amount::ZERO, |acc, a| acc + a)
    }
}

impl<'a> std::iter::Sum<&'a Amount> for Amount {
    fn sum<I: Iterator<Item = &'a Amount>>(iter: I) -> Self {
        iter.fold(Amount::ZERO, |acc, a| acc + *a)
    }
}

/// Error type for amount parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AmountParseError {
    InvalidFormat(String),
    OutOfRange(String),
}

impl fmt::Display for AmountParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AmountParseError::InvalidFormat(s) => write!(f, "Invalid amount format: '{}'", s),
            AmountParseError::OutOfRange(s) => write!(f, "Amount out of range: '{}'", s),
        }
    }
}

impl std::error::Error for AmountParseError {}
