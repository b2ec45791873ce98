//! Type-safe price representation using decimal arithmetic.
//!
//! Catalog prices, cart subtotals, and order totals are all [`Price`]
//! values so that `price x quantity` sums never drift the way binary
//! floating point would.

use core::fmt;
use core::iter::Sum;
use core::ops::Add;
use core::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Price`] from form input.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// The input is not a decimal number.
    #[error("price must be a number")]
    NotANumber,
    /// The input is below zero.
    #[error("price cannot be negative")]
    Negative,
}

/// A non-negative amount in the store's display currency.
///
/// ```
/// use botanical_core::Price;
///
/// let price = Price::from_cents(4999);
/// assert_eq!(price.display(), "$49.99");
/// assert_eq!(price.times(3).display(), "$149.97");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// Zero.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a price from a whole number of cents.
    #[must_use]
    pub fn from_cents(cents: i64) -> Self {
        Self(Decimal::new(cents, 2))
    }

    /// Create a price from a decimal amount.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Negative`] for amounts below zero.
    pub fn new(amount: Decimal) -> Result<Self, PriceError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(PriceError::Negative);
        }
        Ok(Self(amount))
    }

    /// Parse a price typed into an admin form (e.g. `"19.99"`).
    ///
    /// # Errors
    ///
    /// Returns an error if the input is not a number or is negative.
    pub fn parse(input: &str) -> Result<Self, PriceError> {
        let amount = Decimal::from_str(input.trim()).map_err(|_| PriceError::NotANumber)?;
        Self::new(amount)
    }

    /// The underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// This price multiplied by a line quantity.
    #[must_use]
    pub fn times(&self, quantity: u32) -> Self {
        Self(self.0 * Decimal::from(quantity))
    }

    /// Whether the amount is exactly zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Format for display with the store's dollar sign (e.g. `"$19.99"`).
    #[must_use]
    pub fn display(&self) -> String {
        format!("${:.2}", self.0)
    }

    /// Format as a plain two-decimal number for form inputs (e.g. `"19.99"`).
    #[must_use]
    pub fn to_input_value(&self) -> String {
        format!("{:.2}", self.0)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

/// Currency configured in the back office settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum CurrencyCode {
    #[default]
    Ron,
    Usd,
    Eur,
    Gbp,
}

impl CurrencyCode {
    /// Every supported currency, in settings dropdown order.
    pub const ALL: [Self; 4] = [Self::Ron, Self::Usd, Self::Eur, Self::Gbp];

    /// ISO 4217 code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Ron => "RON",
            Self::Usd => "USD",
            Self::Eur => "EUR",
            Self::Gbp => "GBP",
        }
    }

    /// Human-readable label for the settings form.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Ron => "Romanian Leu (RON)",
            Self::Usd => "US Dollar (USD)",
            Self::Eur => "Euro (EUR)",
            Self::Gbp => "British Pound (GBP)",
        }
    }
}

impl FromStr for CurrencyCode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.code().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unsupported currency: {s}"))
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_display_pads_two_decimals() {
        assert_eq!(Price::from_cents(1500).display(), "$15.00");
        assert_eq!(Price::from_cents(5).display(), "$0.05");
        assert_eq!(Price::ZERO.display(), "$0.00");
    }

    #[test]
    fn test_times_and_sum_are_exact() {
        let total: Price = [Price::from_cents(2999).times(2), Price::from_cents(1999)]
            .into_iter()
            .sum();
        assert_eq!(total, Price::from_cents(7997));
    }

    #[test]
    fn test_parse_form_input() {
        assert_eq!(Price::parse("19.99").unwrap(), Price::from_cents(1999));
        assert_eq!(Price::parse(" 0 ").unwrap(), Price::ZERO);
        assert_eq!(Price::parse("abc"), Err(PriceError::NotANumber));
        assert_eq!(Price::parse("-1"), Err(PriceError::Negative));
    }

    #[test]
    fn test_input_value_has_no_symbol() {
        assert_eq!(Price::from_cents(599).to_input_value(), "5.99");
    }

    #[test]
    fn test_currency_code_parse() {
        assert_eq!("ron".parse::<CurrencyCode>().unwrap(), CurrencyCode::Ron);
        assert_eq!("EUR".parse::<CurrencyCode>().unwrap(), CurrencyCode::Eur);
        assert!("XYZ".parse::<CurrencyCode>().is_err());
    }
}
