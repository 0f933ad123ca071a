//! Type-safe price representation using decimal arithmetic.
//!
//! Catalog prices are whole cents, but discounts and tax produce fractional
//! cents. Arithmetic keeps full precision; rounding to cents happens only
//! when a price is displayed or compared as money via [`Price::rounded`].

use std::fmt;
use std::iter::Sum;
use std::ops::Add;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// A price with currency information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's standard unit (e.g., dollars, not cents).
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency_code: CurrencyCode,
}

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal, currency_code: CurrencyCode) -> Self {
        Self {
            amount,
            currency_code,
        }
    }

    /// Create a price in US dollars.
    #[must_use]
    pub const fn usd(amount: Decimal) -> Self {
        Self::new(amount, CurrencyCode::USD)
    }

    /// A zero amount in US dollars.
    #[must_use]
    pub const fn zero() -> Self {
        Self::usd(Decimal::ZERO)
    }

    /// Apply a percentage discount: `amount - amount * percent / 100`.
    #[must_use]
    pub fn discounted(self, percent: u8) -> Self {
        let cut = self.amount * Decimal::from(percent) / Decimal::ONE_HUNDRED;
        Self::new(self.amount - cut, self.currency_code)
    }

    /// Multiply by a quantity.
    #[must_use]
    pub fn times(self, quantity: u32) -> Self {
        Self::new(self.amount * Decimal::from(quantity), self.currency_code)
    }

    /// Multiply by a rate (e.g. `0.08` for 8% tax).
    #[must_use]
    pub fn scaled(self, rate: Decimal) -> Self {
        Self::new(self.amount * rate, self.currency_code)
    }

    /// The amount rounded to cents, half away from zero.
    #[must_use]
    pub fn rounded(self) -> Decimal {
        self.amount
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    }

    /// Format for display (e.g., "$19.99").
    #[must_use]
    pub fn display(&self) -> String {
        self.to_string()
    }
}

impl Default for Price {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:.2}", self.currency_code.symbol(), self.rounded())
    }
}

impl Add for Price {
    type Output = Self;

    /// Mixed currencies never occur in a single cart; the left operand's
    /// currency wins.
    fn add(self, rhs: Self) -> Self {
        Self::new(self.amount + rhs.amount, self.currency_code)
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), Add::add)
    }
}

/// ISO 4217 currency codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    USD,
    EUR,
    GBP,
}

impl CurrencyCode {
    /// Display symbol for the currency.
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::USD => "$",
            Self::EUR => "€",
            Self::GBP => "£",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn usd(cents: i64) -> Price {
        Price::usd(Decimal::new(cents, 2))
    }

    #[test]
    fn test_display_pads_to_cents() {
        assert_eq!(usd(2999).to_string(), "$29.99");
        assert_eq!(Price::usd(Decimal::from(50)).to_string(), "$50.00");
        assert_eq!(Price::zero().display(), "$0.00");
    }

    #[test]
    fn test_discount_keeps_precision_until_display() {
        // 59.99 at 15% off is 50.9915
        let sale = usd(5999).discounted(15);
        assert_eq!(sale.amount, Decimal::new(509_915, 4));
        assert_eq!(sale.to_string(), "$50.99");
    }

    #[test]
    fn test_rounding_is_half_away_from_zero() {
        assert_eq!(Price::usd(Decimal::new(10_005, 3)).rounded(), Decimal::new(1001, 2));
    }

    #[test]
    fn test_times_and_sum() {
        let total: Price = [usd(2999).times(2), usd(1000)].into_iter().sum();
        assert_eq!(total.to_string(), "$69.98");
    }

    #[test]
    fn test_scaled_tax() {
        let tax = usd(10_000).scaled(Decimal::new(8, 2));
        assert_eq!(tax.to_string(), "$8.00");
    }

    #[test]
    fn test_currency_symbols() {
        assert_eq!(CurrencyCode::USD.symbol(), "$");
        assert_eq!(CurrencyCode::GBP.symbol(), "£");
    }
}
