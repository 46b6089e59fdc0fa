//! Type-safe price representation using decimal arithmetic.
//!
//! Catalog prices arrive from the content store as loosely typed JSON. The
//! storefront only ever renders a [`Price`], so a missing amount can never
//! leak into a template as anything other than `$0.00`.

use core::fmt;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// A price with currency information.
///
/// Amounts are never negative; constructors that accept untrusted input fall
/// back to zero instead.
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

    /// A zero price in the default currency.
    #[must_use]
    pub const fn zero() -> Self {
        Self::new(Decimal::ZERO, CurrencyCode::USD)
    }

    /// Create a USD price, substituting zero for negative amounts.
    #[must_use]
    pub fn usd(amount: Decimal) -> Self {
        if amount.is_sign_negative() {
            Self::zero()
        } else {
            Self::new(amount, CurrencyCode::USD)
        }
    }

    /// Format for display with two decimal places (e.g., "$19.99").
    ///
    /// Half-cent amounts round away from zero.
    #[must_use]
    pub fn display(&self) -> String {
        let cents = self
            .amount
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        format!("{}{:.2}", self.currency_code.symbol(), cents)
    }
}

impl Default for Price {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

/// ISO 4217 currency codes.
///
/// The catalog is priced in US dollars only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    USD,
}

impl CurrencyCode {
    /// Display symbol for the currency.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::USD => "$",
        }
    }

    /// ISO 4217 code, e.g. "USD".
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::USD => "USD",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_price_formats_as_number() {
        assert_eq!(Price::zero().display(), "$0.00");
        assert_eq!(Price::default().to_string(), "$0.00");
    }

    #[test]
    fn test_display_rounds_to_cents() {
        let price = Price::usd(Decimal::new(129_999, 3));
        assert_eq!(price.display(), "$130.00");

        let price = Price::usd(Decimal::new(45, 0));
        assert_eq!(price.display(), "$45.00");
    }

    #[test]
    fn test_display_rounds_half_cents_up() {
        assert_eq!(Price::usd(Decimal::new(1235, 3)).display(), "$1.24");
        assert_eq!(Price::usd(Decimal::new(12_345, 3)).display(), "$12.35");
        assert_eq!(Price::usd(Decimal::new(12_344, 3)).display(), "$12.34");
    }

    #[test]
    fn test_negative_amount_becomes_zero() {
        let price = Price::usd(Decimal::new(-500, 2));
        assert_eq!(price, Price::zero());
    }
}
