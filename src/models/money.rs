//! Money type for representing currency amounts
//!
//! Internally stores amounts in cents (i64) to avoid floating-point precision
//! issues. Provides safe arithmetic operations and formatting.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

/// Represents a monetary amount stored as cents (hundredths of the currency unit)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Create a Money amount from cents
    ///
    /// # Examples
    /// ```
    /// use pocketbook::models::Money;
    /// let amount = Money::from_cents(1050); // 10.50
    /// ```
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Create a Money amount from whole units and cents
    pub const fn from_units_cents(units: i64, cents: i64) -> Self {
        Self(units * 100 + cents)
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
    pub const fn units(&self) -> i64 {
        self.0 / 100
    }

    /// Get the cents portion (0-99)
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Get the absolute value
    pub const fn abs(&self) -> Self {
        Self(self.0.abs())
    }

    /// Divide evenly, truncating toward zero. Returns zero for a zero divisor.
    pub fn divide(&self, divisor: i64) -> Self {
        if divisor == 0 {
            Self::zero()
        } else {
            Self(self.0 / divisor)
        }
    }

    /// Parse a money amount from a string
    ///
    /// Accepts "10.50", "-10.50", "$10.50", "R$ 10,50", "10". A comma is read
    /// as the decimal separator when the string has no dot.
    pub fn parse(s: &str) -> Result<Self, MoneyParseError> {
        let original = s;
        let s = s.trim();

        let (negative, s) = if let Some(stripped) = s.strip_prefix('-') {
            (true, stripped)
        } else {
            (false, s)
        };

        let s = s
            .strip_prefix("R$")
            .or_else(|| s.strip_prefix('$'))
            .unwrap_or(s)
            .trim();

        let normalized = if s.contains('.') {
            s.to_string()
        } else {
            s.replace(',', ".")
        };

        let invalid = || MoneyParseError::InvalidFormat(original.to_string());

        let cents = if let Some((units, fraction)) = normalized.split_once('.') {
            if fraction.contains('.') || units.is_empty() {
                return Err(invalid());
            }
            let units: i64 = units.parse().map_err(|_| invalid())?;
            if !fraction.chars().all(|c| c.is_ascii_digit()) {
                return Err(invalid());
            }

            // Pad or truncate to 2 digits
            let cents: i64 = match fraction.len() {
                0 => 0,
                1 => fraction.parse::<i64>().map_err(|_| invalid())? * 10,
                _ => fraction[..2].parse().map_err(|_| invalid())?,
            };

            units * 100 + cents
        } else {
            normalized.parse::<i64>().map_err(|_| invalid())? * 100
        };

        Ok(Self(if negative { -cents } else { cents }))
    }

    /// Format with a currency symbol
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        if self.is_negative() {
            format!("-{} {}.{:02}", symbol, self.units().abs(), self.cents_part())
        } else {
            format!("{} {}.{:02}", symbol, self.units(), self.cents_part())
        }
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = if self.is_negative() {
            format!("-{}.{:02}", self.units().abs(), self.cents_part())
        } else {
            format!("{}.{:02}", self.units(), self.cents_part())
        };
        f.pad(&text)
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0 - other.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl<'a> std::iter::Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + *m)
    }
}

/// Error type for money parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoneyParseError {
    InvalidFormat(String),
}

impl fmt::Display for MoneyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoneyParseError::InvalidFormat(s) => write!(f, "Invalid money format: {}", s),
        }
    }
}

impl std::error::Error for MoneyParseError {}
