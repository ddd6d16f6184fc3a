//! Money type for representing currency amounts
//!
//! Internally stores amounts in minor units (i64 cents) to avoid
//! floating-point precision issues. User-entered amount text is converted
//! exactly once, at submit time, by rounding to the nearest cent.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Neg, Sub};

/// Represents a monetary amount stored as cents (hundredths of the currency unit)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Create a Money amount from cents
    ///
    /// # Examples
    /// ```
    /// use quickadd::models::Money;
    /// let amount = Money::from_cents(1050); // 10.50
    /// ```
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Create a zero Money amount
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Get the amount in cents
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Get the whole units portion (truncated toward zero)
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Get the cents portion (0-99)
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Check if the amount is zero
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Check if the amount is negative
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Add two amounts, returning `None` on overflow
    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }

    /// Convert form amount text into a signed amount
    ///
    /// Computes `round(sign * value * 100)` where `sign` is -1 for expenses.
    /// Rounding goes to the nearest cent, so `"19.99"` is always 1999 cents.
    ///
    /// # Examples
    /// ```
    /// use quickadd::models::Money;
    /// assert_eq!(Money::from_amount_text("19.99", true).unwrap().cents(), -1999);
    /// assert_eq!(Money::from_amount_text("0.1", false).unwrap().cents(), 10);
    /// ```
    pub fn from_amount_text(text: &str, is_expense: bool) -> Result<Self, MoneyParseError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(MoneyParseError::Empty);
        }

        let value: f64 = text
            .parse()
            .map_err(|_| MoneyParseError::InvalidFormat(text.to_string()))?;

        let sign = if is_expense { -1.0 } else { 1.0 };
        let cents = (sign * value * 100.0).round();

        if !cents.is_finite() || cents.abs() >= i64::MAX as f64 {
            return Err(MoneyParseError::OutOfRange(text.to_string()));
        }

        Ok(Self(cents as i64))
    }

    /// Format as a plain decimal with two places, e.g. `-5.00`
    pub fn to_decimal_string(&self) -> String {
        let sign = if self.is_negative() { "-" } else { "" };
        format!("{}{}.{:02}", sign, self.dollars().abs(), self.cents_part())
    }

    /// Format with a currency symbol
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        let sign = if self.is_negative() { "-" } else { "" };
        format!(
            "{}{}{}.{:02}",
            sign,
            symbol,
            self.dollars().abs(),
            self.cents_part()
        )
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_with_symbol("$"))
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0 - other.0)
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

/// Error type for money parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoneyParseError {
    Empty,
    InvalidFormat(String),
    OutOfRange(String),
}

impl fmt::Display for MoneyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "Amount is empty"),
            Self::InvalidFormat(s) => write!(f, "Invalid money format: {}", s),
            Self::OutOfRange(s) => write!(f, "Amount out of range: {}", s),
        }
    }
}

impl std::error::Error for MoneyParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checked_add() {
        let a = Money::from_cents(1000);
        assert_eq!(a.checked_add(Money::from_cents(-1500)), Some(Money::from_cents(-500)));
        assert_eq!(Money::from_cents(i64::MAX).checked_add(Money::from_cents(1)), None);
    }

    #[test]
    fn test_from_cents() {
        let m = Money::from_cents(1050);
        assert_eq!(m.cents(), 1050);
        assert_eq!(m.dollars(), 10);
        assert_eq!(m.cents_part(), 50);
    }

    #[test]
    fn test_amount_text_rounds_to_nearest_cent() {
        assert_eq!(Money::from_amount_text("19.99", true).unwrap().cents(), -1999);
        assert_eq!(Money::from_amount_text("19.99", false).unwrap().cents(), 1999);
        assert_eq!(Money::from_amount_text("0.1", false).unwrap().cents(), 10);
        assert_eq!(Money::from_amount_text("1.15", false).unwrap().cents(), 115);
        assert_eq!(Money::from_amount_text("0.29", true).unwrap().cents(), -29);
        assert_eq!(Money::from_amount_text("4.35", true).unwrap().cents(), -435);
    }

    #[test]
    fn test_amount_text_shapes() {
        assert_eq!(Money::from_amount_text("12", true).unwrap().cents(), -1200);
        assert_eq!(Money::from_amount_text("12.", true).unwrap().cents(), -1200);
        assert_eq!(Money::from_amount_text(".5", false).unwrap().cents(), 50);
        assert_eq!(Money::from_amount_text("0", true).unwrap().cents(), 0);
    }

    #[test]
    fn test_amount_text_errors() {
        assert_eq!(Money::from_amount_text("", true), Err(MoneyParseError::Empty));
        assert!(matches!(
            Money::from_amount_text(".", true),
            Err(MoneyParseError::InvalidFormat(_))
        ));
        assert!(matches!(
            Money::from_amount_text("12a", false),
            Err(MoneyParseError::InvalidFormat(_))
        ));
        assert!(matches!(
            Money::from_amount_text(&"9".repeat(40), false),
            Err(MoneyParseError::OutOfRange(_))
        ));
    }

    #[test]
    fn test_decimal_string() {
        assert_eq!(Money::from_cents(-500).to_decimal_string(), "-5.00");
        assert_eq!(Money::from_cents(-5).to_decimal_string(), "-0.05");
        assert_eq!(Money::from_cents(12345).to_decimal_string(), "123.45");
        assert_eq!(Money::zero().to_decimal_string(), "0.00");
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(1050)), "$10.50");
        assert_eq!(format!("{}", Money::from_cents(-1050)), "-$10.50");
        assert_eq!(Money::from_cents(-7).format_with_symbol("€"), "-€0.07");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);
        assert_eq!((-a).cents(), -1000);
    }

    #[test]
    fn test_serialization() {
        let m = Money::from_cents(-1999);
        let json = serde_json::to_string(&m).unwrap();
        assert_eq!(json, "-1999");
    }
}
