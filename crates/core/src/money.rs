use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Neg, Sub};
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Money(Decimal);

#[derive(Debug, Clone, Error)]
#[error("invalid amount: {0:?}")]
pub struct ParseMoneyError(pub String);

impl Money {
    pub fn from_cents(cents: i64) -> Self {
        Money(Decimal::from(cents) / Decimal::from(100))
    }

    pub fn to_cents(self) -> i64 {
        (self.0 * Decimal::from(100)).round().to_i64().unwrap()
    }

    pub fn from_decimal(decimal: Decimal) -> Self {
        Money(decimal.round_dp(2))
    }

    pub fn as_decimal(self) -> Decimal {
        self.0
    }

    pub fn zero() -> Self {
        Money(Decimal::ZERO)
    }

    pub fn is_zero(self) -> bool {
        self.0.is_zero()
    }

    /// Parses bank-export amount strings. Strips `$`, thousands separators and
    /// whitespace; `(75.25)` accounting notation reads as a negative.
    pub fn parse(s: &str) -> Result<Self, ParseMoneyError> {
        let raw = s.trim();
        let (negative, inner) = if raw.starts_with('(') && raw.ends_with(')') {
            (true, &raw[1..raw.len() - 1])
        } else {
            (false, raw)
        };
        let cleaned = inner.replace([',', '$', ' '], "");
        let mut dec =
            Decimal::from_str(&cleaned).map_err(|_| ParseMoneyError(raw.to_string()))?;
        if negative {
            dec = -dec;
        }
        Ok(Money(dec))
    }

    /// Mean over `count` items, rounded to cents. `count` must be non-zero.
    pub fn per(self, count: usize) -> Money {
        Money((self.0 / Decimal::from(count as i64)).round_dp(2))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${:.2}", self.0)
    }
}

impl Add for Money {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Money(self.0 + rhs.0)
    }
}

impl Sub for Money {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Money(self.0 - rhs.0)
    }
}

impl Neg for Money {
    type Output = Self;
    fn neg(self) -> Self {
        Money(-self.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::zero(), |a, b| a + b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── parse ─────────────────────────────────────────────────────────────────

    #[test]
    fn parse_plain() {
        assert_eq!(Money::parse("123.45").unwrap(), Money::from_cents(12345));
    }

    #[test]
    fn parse_with_dollar_sign() {
        assert_eq!(Money::parse("$99.99").unwrap(), Money::from_cents(9999));
    }

    #[test]
    fn parse_with_commas() {
        assert_eq!(Money::parse("1,234.56").unwrap(), Money::from_cents(123456));
    }

    #[test]
    fn parse_negative() {
        assert_eq!(Money::parse("-50.00").unwrap(), Money::from_cents(-5000));
    }

    #[test]
    fn parse_accounting_parens() {
        assert_eq!(Money::parse("(75.25)").unwrap(), Money::from_cents(-7525));
    }

    #[test]
    fn parse_zero() {
        assert_eq!(Money::parse("0.00").unwrap(), Money::zero());
        assert_eq!(Money::parse("0").unwrap(), Money::zero());
    }

    #[test]
    fn parse_whole_number() {
        assert_eq!(Money::parse("100").unwrap(), Money::from_cents(10000));
    }

    #[test]
    fn parse_invalid() {
        assert!(Money::parse("not_a_number").is_err());
        assert!(Money::parse("").is_err());
    }

    // ── arithmetic ────────────────────────────────────────────────────────────

    #[test]
    fn add_and_sub() {
        let a = Money::from_cents(500);
        let b = Money::from_cents(150);
        assert_eq!((a + b).to_cents(), 650);
        assert_eq!((a - b).to_cents(), 350);
    }

    #[test]
    fn neg_flips_sign() {
        assert_eq!((-Money::from_cents(4550)).to_cents(), -4550);
    }

    #[test]
    fn sum_over_iterator() {
        let total: Money = [10, 20, 30].iter().map(|&c| Money::from_cents(c)).sum();
        assert_eq!(total.to_cents(), 60);
    }

    #[test]
    fn per_rounds_to_cents() {
        // 81.25 / 3 = 27.0833...
        assert_eq!(Money::from_cents(8125).per(3).to_cents(), 2708);
    }

    #[test]
    fn display_two_decimals() {
        assert_eq!(Money::from_cents(123456).to_string(), "$1234.56");
    }

    #[test]
    fn ordering_by_value() {
        assert!(Money::from_cents(100) > Money::from_cents(-100));
        assert!(Money::from_cents(-100) < Money::zero());
    }
}
