//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  With floating point:                                                   │
//! │    0.15 + 0.15 + 0.15 = 0.44999999999999996  ❌                         │
//! │                                                                         │
//! │  A checkout that compares totals against "32.40" must not drift.       │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    15 + 15 + 15 = 45 cents, exactly                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use checkout_core::money::Money;
//!
//! let price = Money::from_cents(125); // $1.25
//! let line = price * 3;               // $3.75
//! assert_eq!(line.cents(), 375);
//!
//! // Decimal strings parse without ever touching f64
//! let expected: Money = "32.40".parse().unwrap();
//! assert_eq!(expected.cents(), 3240);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul};
use std::str::FromStr;

use crate::error::CoreError;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (cents).
///
/// ## Design Decisions
/// - **i64 (signed)**: matches the arithmetic of the pricing rules, which
///   never divide money
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Serialized as plain cents**: `125`, not `"1.25"`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    ///
    /// ## Example
    /// ```rust
    /// use checkout_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // Represents $10.99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from major and minor units (dollars and cents).
    ///
    /// ## Example
    /// ```rust
    /// use checkout_core::money::Money;
    ///
    /// assert_eq!(Money::from_major_minor(12, 0).cents(), 1200);
    /// assert_eq!(Money::from_major_minor(-5, 50).cents(), -550);
    /// ```
    ///
    /// ## Note
    /// For negative amounts, only the major unit should be negative.
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        if major < 0 {
            Money(major * 100 - minor)
        } else {
            Money(major * 100 + minor)
        }
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (dollars) portion.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit (cents) portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Multiplies money by a count of units, or `None` on overflow.
    ///
    /// ## Example
    /// ```rust
    /// use checkout_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(15); // $0.15
    /// assert_eq!(unit_price.checked_multiply_quantity(3), Some(Money::from_cents(45)));
    /// assert_eq!(Money::from_cents(i64::MAX).checked_multiply_quantity(2), None);
    /// ```
    #[inline]
    pub const fn checked_multiply_quantity(&self, qty: i64) -> Option<Self> {
        match self.0.checked_mul(qty) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }

    /// Adds two amounts, or `None` on overflow.
    #[inline]
    pub const fn checked_add(&self, other: Money) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }
}

// =============================================================================
// Parsing
// =============================================================================

/// Parses a decimal amount such as `"32.40"`, `"7"` or `"-1.5"`.
///
/// ## Rules
/// - Optional leading `-`
/// - At least one digit before the decimal point
/// - At most two digits after it
impl FromStr for Money {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| CoreError::InvalidAmount {
            input: s.to_string(),
            reason: reason.to_string(),
        };

        let trimmed = s.trim();
        let (negative, unsigned) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed),
        };

        let (major_str, minor_str) = match unsigned.split_once('.') {
            Some((major, minor)) => (major, minor),
            None => (unsigned, ""),
        };

        if major_str.is_empty() || !major_str.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid("expected digits before the decimal point"));
        }
        if minor_str.len() > 2 || !minor_str.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid("expected at most two digits after the decimal point"));
        }

        let major: i64 = major_str.parse().map_err(|_| invalid("amount too large"))?;
        let minor: i64 = match minor_str.len() {
            0 => 0,
            1 => minor_str.parse::<i64>().map_err(|_| invalid("bad cents"))? * 10,
            _ => minor_str.parse().map_err(|_| invalid("bad cents"))?,
        };

        let cents = major
            .checked_mul(100)
            .and_then(|c| c.checked_add(minor))
            .ok_or_else(|| invalid("amount too large"))?;

        Ok(Money(if negative { -cents } else { cents }))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display shows money as `$D.CC`.
///
/// ## Note
/// This is for logs and receipts printed by the CLI. There is no locale
/// or currency handling.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}${}.{:02}",
            sign,
            self.dollars().abs(),
            self.cents_part()
        )
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

/// Multiplication by a unit count.
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(1099);
        assert_eq!(money.cents(), 1099);
        assert_eq!(money.dollars(), 10);
        assert_eq!(money.cents_part(), 99);
    }

    #[test]
    fn test_from_major_minor() {
        assert_eq!(Money::from_major_minor(10, 99).cents(), 1099);
        assert_eq!(Money::from_major_minor(-5, 50).cents(), -550);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(3240)), "$32.40");
        assert_eq!(format!("{}", Money::from_cents(15)), "$0.15");
        assert_eq!(format!("{}", Money::from_cents(-550)), "-$5.50");
        assert_eq!(format!("{}", Money::zero()), "$0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a * 3).cents(), 3000);

        let mut c = a;
        c += b;
        assert_eq!(c.cents(), 1500);
    }

    #[test]
    fn test_sum() {
        let total: Money = [700, 2400, 125, 15]
            .into_iter()
            .map(Money::from_cents)
            .sum();
        assert_eq!(total.cents(), 3240);

        let empty: Money = std::iter::empty().sum();
        assert!(empty.is_zero());
    }

    #[test]
    fn test_parse_valid_amounts() {
        assert_eq!("32.40".parse::<Money>().unwrap().cents(), 3240);
        assert_eq!("7.25".parse::<Money>().unwrap().cents(), 725);
        assert_eq!("12".parse::<Money>().unwrap().cents(), 1200);
        assert_eq!("0.5".parse::<Money>().unwrap().cents(), 50);
        assert_eq!("-1.5".parse::<Money>().unwrap().cents(), -150);
        assert_eq!(" 0 ".parse::<Money>().unwrap().cents(), 0);
        assert_eq!("3.".parse::<Money>().unwrap().cents(), 300);
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        for input in ["", "abc", ".5", "1.255", "1,50", "+2", "1.-5", "--1"] {
            let err = input.parse::<Money>().unwrap_err();
            assert!(
                matches!(err, CoreError::InvalidAmount { .. }),
                "expected InvalidAmount for {input:?}"
            );
        }
    }

    #[test]
    fn test_parse_overflow() {
        assert!("99999999999999999999".parse::<Money>().is_err());
    }

    #[test]
    fn test_checked_arithmetic() {
        let price = Money::from_cents(5_000_000_000_000_000_000);
        assert_eq!(price.checked_multiply_quantity(1), Some(price));
        assert_eq!(price.checked_multiply_quantity(2), None);
        assert_eq!(price.checked_add(price), None);
        assert_eq!(
            Money::from_cents(700).checked_add(Money::from_cents(200)),
            Some(Money::from_cents(900))
        );
    }

    #[test]
    fn test_serializes_as_cents() {
        let json = serde_json::to_string(&Money::from_cents(125)).unwrap();
        assert_eq!(json, "125");
        let back: Money = serde_json::from_str("700").unwrap();
        assert_eq!(back.cents(), 700);
    }
}
