//! Type-safe price representation using decimal arithmetic.
//!
//! Catalog prices arrive as JSON numbers (`109.95`) and are persisted the
//! same way in saved carts, so `Price` serializes as a float while all cart
//! arithmetic happens on [`Decimal`].

use core::fmt;
use core::iter::Sum;
use core::ops::{Add, Mul};

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Errors that can occur when constructing a [`Price`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// Prices cannot be negative.
    #[error("price cannot be negative (got {0})")]
    Negative(Decimal),
    /// The value could not be represented as a decimal.
    #[error("price is not a finite number")]
    NotFinite,
}

/// A non-negative amount in US dollars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Price(Decimal);

impl Price {
    /// A price of zero.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a new price.
    ///
    /// # Errors
    ///
    /// Returns `PriceError::Negative` if `amount` is below zero.
    pub fn new(amount: Decimal) -> Result<Self, PriceError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(PriceError::Negative(amount));
        }
        Ok(Self(amount))
    }

    /// Create a price from whole cents, e.g. `1999` for $19.99.
    #[must_use]
    pub fn from_cents(cents: u32) -> Self {
        Self(Decimal::new(i64::from(cents), 2))
    }

    /// The underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Format for display, e.g. `$19.99`.
    #[must_use]
    pub fn display(&self) -> String {
        format!("${:.2}", self.0.round_dp(2))
    }
}

impl TryFrom<f64> for Price {
    type Error = PriceError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        let amount = Decimal::from_f64_retain(value).ok_or(PriceError::NotFinite)?;
        // from_f64_retain keeps binary noise (19.99 -> 19.989999...), so
        // normalise to what a human typed.
        Self::new(amount.round_dp(10).normalize())
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

// Totals saturate at `Decimal::MAX`: a persisted cart can hold any
// non-negative price, and reading one back must not panic.
impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0.checked_add(rhs.0).unwrap_or(Decimal::MAX))
    }
}

impl Mul<u32> for Price {
    type Output = Self;

    fn mul(self, quantity: u32) -> Self::Output {
        Self(
            self.0
                .checked_mul(Decimal::from(quantity))
                .unwrap_or(Decimal::MAX),
        )
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        rust_decimal::serde::float::serialize(&self.0, serializer)
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // Decimal's own impl accepts JSON numbers and numeric strings.
        let amount = <Decimal as Deserialize>::deserialize(deserializer)?;
        Self::new(amount).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_negative() {
        assert!(matches!(
            Price::new(Decimal::new(-1, 2)),
            Err(PriceError::Negative(_))
        ));
        assert!(Price::new(Decimal::ZERO).is_ok());
    }

    #[test]
    fn test_display_two_decimals() {
        assert_eq!(Price::from_cents(1999).display(), "$19.99");
        assert_eq!(Price::from_cents(500).to_string(), "$5.00");
        assert_eq!(Price::ZERO.display(), "$0.00");
    }

    #[test]
    fn test_arithmetic() {
        let total: Price = [Price::from_cents(1999) * 2, Price::from_cents(3199)]
            .into_iter()
            .sum();
        assert_eq!(total, Price::from_cents(7197));
    }

    #[test]
    fn test_arithmetic_saturates() {
        let huge: Price = serde_json::from_str("1e28").unwrap();
        assert_eq!((huge * 10).amount(), Decimal::MAX);
        assert_eq!((huge * 10 + huge).amount(), Decimal::MAX);
        assert_eq!(huge * 1, huge);
    }

    #[test]
    fn test_try_from_f64_is_exact() {
        let price = Price::try_from(19.99).unwrap();
        assert_eq!(price, Price::from_cents(1999));
        assert!(Price::try_from(f64::NAN).is_err());
        assert!(Price::try_from(-3.0).is_err());
    }

    #[test]
    fn test_serde_uses_json_numbers() {
        let price: Price = serde_json::from_str("109.95").unwrap();
        assert_eq!(price, Price::from_cents(10995));
        assert_eq!(serde_json::to_string(&price).unwrap(), "109.95");
        assert!(serde_json::from_str::<Price>("-1.5").is_err());
    }
}
