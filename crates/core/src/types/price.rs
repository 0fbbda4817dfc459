//! Type-safe price representation using decimal arithmetic.
//!
//! The backend serializes all monetary amounts as decimal strings; parsing
//! happens once at the boundary into [`rust_decimal::Decimal`], never as
//! floating point.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A price with currency information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's standard unit (e.g., bolivianos, not centavos).
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

    /// Format for display (e.g., "Bs 19.99").
    #[must_use]
    pub fn display(&self) -> String {
        format!("{} {:.2}", self.currency_code.symbol(), self.amount)
    }
}

/// ISO 4217 currency codes accepted by the payment backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    #[serde(rename = "BOB")]
    Bob,
    #[serde(rename = "USD")]
    Usd,
    #[serde(rename = "EUR")]
    Eur,
}

impl CurrencyCode {
    /// The display symbol for the currency.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Bob => "Bs",
            Self::Usd => "$",
            Self::Eur => "€",
        }
    }

    /// The ISO 4217 code as sent on the wire.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Bob => "BOB",
            Self::Usd => "USD",
            Self::Eur => "EUR",
        }
    }
}

impl std::fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_display() {
        let price = Price::new(Decimal::new(1999, 2), CurrencyCode::Bob);
        assert_eq!(price.display(), "Bs 19.99");

        let price = Price::new(Decimal::new(5, 0), CurrencyCode::Usd);
        assert_eq!(price.display(), "$ 5.00");
    }

    #[test]
    fn test_currency_code_wire_format() {
        let json = serde_json::to_string(&CurrencyCode::Bob).expect("serialize");
        assert_eq!(json, "\"BOB\"");

        let code: CurrencyCode = serde_json::from_str("\"EUR\"").expect("deserialize");
        assert_eq!(code, CurrencyCode::Eur);
    }
}
