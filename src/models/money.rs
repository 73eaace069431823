//! Money type for representing currency amounts
//!
//! Internally stores amounts in cents (i64) to avoid floating-point precision
//! issues. Provides safe arithmetic operations and formatting.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

/// Currency symbols stripped when parsing user input
const KNOWN_SYMBOLS: [char; 4] = ['€', '$', '£', '¥'];

/// Represents a monetary amount stored as cents (hundredths of the currency unit)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Largest amount accepted from user input: 999 999 999 999.99
    pub const MAX_INPUT: Money = Money(99_999_999_999_999);

    /// Create a Money amount from cents
    ///
    /// # Examples
    /// ```
    /// use setaside::models::Money;
    /// let amount = Money::from_cents(1050); // 10.50
    /// assert_eq!(amount.to_string(), "10.50");
    /// ```
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

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

    pub const fn abs(&self) -> Self {
        Self(self.0.abs())
    }

    /// Divide by a positive integer, rounding to the nearest cent
    ///
    /// Halves round away from zero. Returns zero when `divisor <= 0`.
    ///
    /// # Examples
    /// ```
    /// use setaside::models::Money;
    /// assert_eq!(Money::from_cents(10000).div_round(3), Money::from_cents(3333));
    /// assert_eq!(Money::from_cents(1000).div_round(6), Money::from_cents(167));
    /// ```
    pub fn div_round(&self, divisor: i64) -> Self {
        if divisor <= 0 {
            return Self::zero();
        }
        let divisor = i128::from(divisor);
        let magnitude = (i128::from(self.0).abs() * 2 + divisor) / (divisor * 2);
        let rounded = if self.0 < 0 { -magnitude } else { magnitude };
        Self(rounded as i64)
    }

    /// This amount as a percentage of `total` (0.0 when `total` is zero)
    pub fn percent_of(&self, total: Money) -> f64 {
        if total.is_zero() {
            0.0
        } else {
            (self.0 as f64 / total.0 as f64) * 100.0
        }
    }

    /// Parse a money amount from a string
    ///
    /// Accepts formats: "10.50", "10,50", "-10.50", "€10.50", "10 €", "10".
    /// Extra decimals round to the cent, halves away from zero. Amounts above
    /// [`Money::MAX_INPUT`] are rejected.
    pub fn parse(s: &str) -> Result<Self, MoneyParseError> {
        let original = s;
        let s = s.trim();

        let (negative, s) = match s.strip_prefix('-') {
            Some(stripped) => (true, stripped),
            None => (false, s),
        };

        let s = s
            .trim_matches(|c: char| KNOWN_SYMBOLS.contains(&c) || c.is_whitespace())
            .replace(',', ".");

        if s.is_empty() {
            return Err(MoneyParseError::InvalidFormat(original.to_string()));
        }

        let invalid = || MoneyParseError::InvalidFormat(original.to_string());

        let cents = match s.split_once('.') {
            Some((units_str, cents_str)) => {
                if units_str.is_empty() && cents_str.is_empty() {
                    return Err(invalid());
                }
                if !units_str.is_empty() && !is_digits(units_str) {
                    return Err(invalid());
                }
                if !cents_str.is_empty() && !is_digits(cents_str) {
                    return Err(invalid());
                }

                let units: i64 = if units_str.is_empty() {
                    0
                } else {
                    units_str.parse().map_err(|_| invalid())?
                };

                let cents: i64 = match cents_str.len() {
                    0 => 0,
                    1 => cents_str.parse::<i64>().map_err(|_| invalid())? * 10,
                    _ => {
                        let whole: i64 = cents_str[..2].parse().map_err(|_| invalid())?;
                        let round_up = cents_str.as_bytes().get(2).is_some_and(|d| *d >= b'5');
                        whole + i64::from(round_up)
                    }
                };

                units
                    .checked_mul(100)
                    .and_then(|u| u.checked_add(cents))
                    .ok_or_else(|| MoneyParseError::TooLarge(original.to_string()))?
            }
            None => {
                if !is_digits(&s) {
                    return Err(invalid());
                }
                s.parse::<i64>()
                    .ok()
                    .and_then(|u| u.checked_mul(100))
                    .ok_or_else(|| MoneyParseError::TooLarge(original.to_string()))?
            }
        };

        if cents > Self::MAX_INPUT.0 {
            return Err(MoneyParseError::TooLarge(original.to_string()));
        }

        Ok(Self(if negative { -cents } else { cents }))
    }

    /// Format with a currency symbol
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        if self.is_negative() {
            format!("-{}{}.{:02}", symbol, self.units().abs(), self.cents_part())
        } else {
            format!("{}{}.{:02}", symbol, self.units(), self.cents_part())
        }
    }
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_digit())
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_negative() {
            write!(f, "-{}.{:02}", self.units().abs(), self.cents_part())
        } else {
            write!(f, "{}.{:02}", self.units(), self.cents_part())
        }
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_sub(other.0);
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self(self.0.saturating_neg())
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

/// Error type for money parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoneyParseError {
    InvalidFormat(String),
    TooLarge(String),
}

impl fmt::Display for MoneyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoneyParseError::InvalidFormat(s) => write!(f, "Invalid money format: {}", s),
            MoneyParseError::TooLarge(s) => {
                write!(f, "Amount {} is above the limit of {}", s.trim(), Money::MAX_INPUT)
            }
        }
    }
}

impl std::error::Error for MoneyParseError {}
