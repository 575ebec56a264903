//! Currency codes and fixed conversion rates.

use serde::{Deserialize, Serialize};

/// Supported currencies for demurrage rates and display.
///
/// Rates are fixed illustrative constants against USD; live FX integration is
/// out of scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Usd,
    Inr,
    Eur,
    Gbp,
}

impl Currency {
    /// Conversion rate: units of this currency per 1 USD.
    pub fn rate(&self) -> f64 {
        match self {
            Currency::Usd => 1.0,
            Currency::Inr => 83.5,
            Currency::Eur => 0.92,
            Currency::Gbp => 0.79,
        }
    }

    /// Convert an amount between currencies via the USD base.
    pub fn convert(amount: f64, from: Currency, to: Currency) -> f64 {
        amount / from.rate() * to.rate()
    }

    /// ISO 4217 code.
    pub fn code(&self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Inr => "INR",
            Currency::Eur => "EUR",
            Currency::Gbp => "GBP",
        }
    }

    pub const ALL: [Currency; 4] = [Currency::Usd, Currency::Inr, Currency::Eur, Currency::Gbp];
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl std::str::FromStr for Currency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "USD" => Ok(Currency::Usd),
            "INR" => Ok(Currency::Inr),
            "EUR" => Ok(Currency::Eur),
            "GBP" => Ok(Currency::Gbp),
            other => Err(format!("Unknown currency: {}", other)),
        }
    }
}
