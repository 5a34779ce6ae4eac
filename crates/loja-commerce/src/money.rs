//! Fixed-point money type.
//!
//! Amounts are stored as integer cents to avoid the floating-point precision
//! issues that plague monetary calculations. The catalog uses two decimal
//! places throughout; on the wire a value renders as a decimal string such as
//! `"90.00"`.

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A monetary value with two decimal places, stored as cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Money {
    cents: i64,
}

impl Money {
    /// Create a Money value from cents.
    pub fn from_cents(cents: i64) -> Self {
        Self { cents }
    }

    /// Create a Money value from a decimal amount, rounding to the nearest
    /// cent.
    ///
    /// Midpoints round away from zero, but only within what `f64` can
    /// represent; a literal like `0.615` arrives slightly below the midpoint
    /// and lands on 61 cents. Wire input goes through [`FromStr`] instead,
    /// which reads the digits and is exact.
    ///
    /// ```
    /// use loja_commerce::money::Money;
    /// assert_eq!(Money::from_decimal(49.99), Money::from_cents(4999));
    /// ```
    pub fn from_decimal(amount: f64) -> Self {
        Self {
            cents: (amount * 100.0).round() as i64,
        }
    }

    /// A zero amount.
    pub fn zero() -> Self {
        Self { cents: 0 }
    }

    /// Amount in cents.
    pub fn cents(&self) -> i64 {
        self.cents
    }

    /// Check if this is zero.
    pub fn is_zero(&self) -> bool {
        self.cents == 0
    }

    /// Check if this is negative.
    pub fn is_negative(&self) -> bool {
        self.cents < 0
    }

    /// Checked addition.
    pub fn checked_add(&self, other: Money) -> Option<Money> {
        self.cents.checked_add(other.cents).map(Money::from_cents)
    }

    /// Checked multiplication by a scalar quantity.
    pub fn checked_mul(&self, factor: i64) -> Option<Money> {
        self.cents.checked_mul(factor).map(Money::from_cents)
    }

    /// Saturating multiplication by a scalar quantity.
    pub fn saturating_mul(&self, factor: i64) -> Money {
        Money::from_cents(self.cents.saturating_mul(factor))
    }

    /// Apply a flat percentage discount, rounding the discount half-up to
    /// cents: `price - round(price * percent / 100)`.
    ///
    /// Only defined for non-negative amounts; catalog prices are never
    /// negative.
    pub fn percent_off(&self, percent: u8) -> Money {
        let raw = self.cents.saturating_mul(i64::from(percent));
        let discount = (raw + 50) / 100;
        Money::from_cents(self.cents - discount)
    }

    /// Convert to a decimal value. Lossy; for display and tests only.
    pub fn to_decimal(&self) -> f64 {
        self.cents as f64 / 100.0
    }
}

/// A money literal could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid money literal")]
pub struct ParseMoneyError;

impl std::str::FromStr for Money {
    type Err = ParseMoneyError;

    /// Parse a decimal literal such as `"90.00"` digit by digit.
    ///
    /// Exact for any number of fraction digits: the value is truncated to
    /// cents and the third fraction digit rounds half-up. No float is
    /// involved, so `"0.615"` is 62 cents.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (negative, digits) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s),
        };
        let (int_part, frac_part) = match digits.split_once('.') {
            Some((i, f)) => (i, f),
            None => (digits, ""),
        };
        if int_part.is_empty() && frac_part.is_empty() {
            return Err(ParseMoneyError);
        }
        if !int_part.bytes().all(|b| b.is_ascii_digit())
            || !frac_part.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(ParseMoneyError);
        }

        let mut cents: i64 = 0;
        for b in int_part.bytes() {
            cents = cents
                .checked_mul(10)
                .and_then(|v| v.checked_add(i64::from(b - b'0')))
                .ok_or(ParseMoneyError)?;
        }
        cents = cents.checked_mul(100).ok_or(ParseMoneyError)?;

        let mut frac = frac_part.bytes();
        if let Some(b) = frac.next() {
            cents = cents
                .checked_add(i64::from(b - b'0') * 10)
                .ok_or(ParseMoneyError)?;
        }
        if let Some(b) = frac.next() {
            cents = cents.checked_add(i64::from(b - b'0')).ok_or(ParseMoneyError)?;
        }
        if let Some(b) = frac.next() {
            if b >= b'5' {
                cents = cents.checked_add(1).ok_or(ParseMoneyError)?;
            }
        }

        Ok(Money::from_cents(if negative { -cents } else { cents }))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.cents < 0 { "-" } else { "" };
        let abs = self.cents.unsigned_abs();
        write!(f, "{}{}.{:02}", sign, abs / 100, abs % 100)
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

struct MoneyVisitor;

impl Visitor<'_> for MoneyVisitor {
    type Value = Money;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a decimal money string or number")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Money, E> {
        v.parse()
            .map_err(|_| E::invalid_value(de::Unexpected::Str(v), &self))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Money, E> {
        Ok(Money::from_decimal(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Money, E> {
        Ok(Money::from_decimal(v as f64))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Money, E> {
        Ok(Money::from_decimal(v as f64))
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Money, D::Error> {
        deserializer.deserialize_any(MoneyVisitor)
    }
}
