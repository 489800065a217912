//! Exact, non-negative euro amounts.
//!
//! Menu prices, order lines and order totals are all [`Money`]. Arithmetic is
//! done on [`Decimal`] so `subtotal * 0.10` is exact and the invariant
//! `total == subtotal + tax` holds to the cent and beyond. Rounding only
//! happens when an amount is formatted for display.

use core::fmt;
use core::iter::Sum;
use core::ops::Add;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Sales tax applied to every order (10%).
pub const TAX_RATE: Decimal = Decimal::from_parts(10, 0, 0, false, 2);

/// Errors that can occur when constructing [`Money`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum MoneyError {
    /// Amounts are never negative in this domain.
    #[error("amount cannot be negative (got {0})")]
    Negative(Decimal),
}

/// A non-negative amount in euros.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Money(Decimal);

impl Money {
    /// Zero euros.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create an amount, rejecting negative values.
    ///
    /// # Errors
    ///
    /// Returns `MoneyError::Negative` if `amount < 0`.
    pub fn new(amount: Decimal) -> Result<Self, MoneyError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(MoneyError::Negative(amount));
        }
        Ok(Self(amount))
    }

    /// Whole euros, for fixtures and seeds.
    #[must_use]
    pub fn from_euros(euros: u32) -> Self {
        Self(Decimal::from(euros))
    }

    /// Euros and cents expressed as a total number of cents.
    #[must_use]
    pub fn from_cents(cents: u32) -> Self {
        Self(Decimal::new(i64::from(cents), 2))
    }

    /// The exact decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// This amount multiplied by a line quantity.
    #[must_use]
    pub fn times(self, quantity: u32) -> Self {
        Self(self.0 * Decimal::from(quantity))
    }

    /// This amount multiplied by a non-negative rate such as [`TAX_RATE`].
    #[must_use]
    pub fn scaled(self, rate: Decimal) -> Self {
        Self(self.0 * rate.abs())
    }

    /// Amount rounded half-up to cents, for display and reporting.
    #[must_use]
    pub fn rounded(&self) -> Decimal {
        self.0
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "€{:.2}", self.rounded())
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl TryFrom<Decimal> for Money {
    type Error = MoneyError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Money> for Decimal {
    fn from(money: Money) -> Self {
        money.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn test_negative_amount_rejected() {
        let err = Money::new(Decimal::from(-1)).unwrap_err();
        assert_eq!(err, MoneyError::Negative(Decimal::from(-1)));
        assert!(Money::new(Decimal::ZERO).is_ok());
    }

    #[test]
    fn test_tax_rate_is_ten_percent() {
        assert_eq!(TAX_RATE, Decimal::from_str("0.10").unwrap());
        let tax = Money::from_euros(44).scaled(TAX_RATE);
        assert_eq!(tax.amount(), Decimal::from_str("4.4").unwrap());
    }

    #[test]
    fn test_sum_and_times() {
        let total: Money = [Money::from_euros(8).times(2), Money::from_euros(28)]
            .into_iter()
            .sum();
        assert_eq!(total, Money::from_euros(44));
    }

    #[test]
    fn test_display_rounds_half_up() {
        assert_eq!(Money::from_cents(4840).to_string(), "€48.40");
        let third = Money::new(Decimal::from_str("0.125").unwrap()).unwrap();
        assert_eq!(third.to_string(), "€0.13");
    }

    #[test]
    fn test_deserialize_accepts_numbers_and_strings() {
        let from_number: Money = serde_json::from_str("8").unwrap();
        let from_string: Money = serde_json::from_str("\"8.00\"").unwrap();
        assert_eq!(from_number, from_string);
        assert!(serde_json::from_str::<Money>("-3").is_err());
    }
}
