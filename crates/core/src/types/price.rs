//! Decimal price amounts.
//!
//! The API exchanges prices as JSON numbers. They are held as `Decimal` on
//! the client so display and comparison never suffer float rounding.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A price in the marketplace's single currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct Price(#[serde(with = "rust_decimal::serde::float")] Decimal);

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Create a price from an amount in cents.
    #[must_use]
    pub fn from_cents(cents: i64) -> Self {
        Self(Decimal::new(cents, 2))
    }

    /// Get the decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }
}

impl std::fmt::Display for Price {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl std::str::FromStr for Price {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<Decimal>().map(Self)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_price_reads_json_number() {
        let price: Price = serde_json::from_str("4.5").unwrap();
        assert_eq!(price.to_string(), "4.50");
    }

    #[test]
    fn test_price_from_cents() {
        assert_eq!(Price::from_cents(1999).to_string(), "19.99");
    }

    #[test]
    fn test_price_from_str() {
        let price: Price = "12.25".parse().unwrap();
        assert_eq!(price, Price::from_cents(1225));
    }
}
