//! Currencies accepted by the hosted checkout.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::errors::CheckoutError;

/// Currency codes the gateway accepts for `currency_code`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CurrencyCode {
    AUD,
    BRL,
    CAD,
    CZK,
    EUR,
    HKD,
    HUF,
    ILS,
    JPY,
    MYR,
    MXN,
    NOK,
    NZD,
    PHP,
    PLN,
    GBP,
    SGD,
    SEK,
    CHF,
    TWD,
    THB,
    TRY,
    #[default]
    USD,
}

impl CurrencyCode {
    /// Every accepted currency, in gateway documentation order.
    pub const ALL: [CurrencyCode; 23] = [
        CurrencyCode::AUD,
        CurrencyCode::BRL,
        CurrencyCode::CAD,
        CurrencyCode::CZK,
        CurrencyCode::EUR,
        CurrencyCode::HKD,
        CurrencyCode::HUF,
        CurrencyCode::ILS,
        CurrencyCode::JPY,
        CurrencyCode::MYR,
        CurrencyCode::MXN,
        CurrencyCode::NOK,
        CurrencyCode::NZD,
        CurrencyCode::PHP,
        CurrencyCode::PLN,
        CurrencyCode::GBP,
        CurrencyCode::SGD,
        CurrencyCode::SEK,
        CurrencyCode::CHF,
        CurrencyCode::TWD,
        CurrencyCode::THB,
        CurrencyCode::TRY,
        CurrencyCode::USD,
    ];

    /// Returns the ISO code as sent to the gateway.
    pub fn as_str(&self) -> &'static str {
        match self {
            CurrencyCode::AUD => "AUD",
            CurrencyCode::BRL => "BRL",
            CurrencyCode::CAD => "CAD",
            CurrencyCode::CZK => "CZK",
            CurrencyCode::EUR => "EUR",
            CurrencyCode::HKD => "HKD",
            CurrencyCode::HUF => "HUF",
            CurrencyCode::ILS => "ILS",
            CurrencyCode::JPY => "JPY",
            CurrencyCode::MYR => "MYR",
            CurrencyCode::MXN => "MXN",
            CurrencyCode::NOK => "NOK",
            CurrencyCode::NZD => "NZD",
            CurrencyCode::PHP => "PHP",
            CurrencyCode::PLN => "PLN",
            CurrencyCode::GBP => "GBP",
            CurrencyCode::SGD => "SGD",
            CurrencyCode::SEK => "SEK",
            CurrencyCode::CHF => "CHF",
            CurrencyCode::TWD => "TWD",
            CurrencyCode::THB => "THB",
            CurrencyCode::TRY => "TRY",
            CurrencyCode::USD => "USD",
        }
    }
}

impl FromStr for CurrencyCode {
    type Err = CheckoutError;

    /// Case-sensitive: `usd` is rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CurrencyCode::ALL
            .into_iter()
            .find(|code| code.as_str() == s)
            .ok_or_else(|| {
                CheckoutError::invalid_argument(
                    "currency_code",
                    "a currency code accepted by the gateway",
                    s,
                )
            })
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
