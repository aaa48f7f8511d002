//! Type-safe price representation using decimal arithmetic.
//!
//! Product prices are stored in the CMS as integers in the currency's minor
//! unit (cents). [`Price`] lifts such a value into a [`Decimal`] amount so it
//! can be formatted without floating point rounding.

use core::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Number of minor units per major unit for every supported currency.
const MINOR_UNIT_SCALE: u32 = 2;

/// Error returned when a currency code is not supported.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unsupported currency code: {0}")]
pub struct CurrencyError(pub String);

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

    /// Create a price from an amount in minor units (e.g. cents).
    #[must_use]
    pub fn from_minor_units(value: i64, currency_code: CurrencyCode) -> Self {
        Self::new(Decimal::new(value, MINOR_UNIT_SCALE), currency_code)
    }

    /// Format for display (e.g., "$19.99").
    #[must_use]
    pub fn display(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = self.currency_code.symbol();
        if self.amount.is_sign_negative() && !self.amount.is_zero() {
            write!(f, "-{symbol}{:.2}", self.amount.abs())
        } else {
            write!(f, "{symbol}{:.2}", self.amount)
        }
    }
}

/// Format a minor-unit amount in the given currency.
///
/// The active currency is always passed in by the caller; nothing here reads
/// site-wide settings.
///
/// ```
/// use hygraph_storefront_core::{CurrencyCode, format_currency_value};
///
/// assert_eq!(format_currency_value(CurrencyCode::USD, 2000), "$20.00");
/// assert_eq!(format_currency_value(CurrencyCode::EUR, 1999), "€19.99");
/// ```
#[must_use]
pub fn format_currency_value(currency: CurrencyCode, value: i64) -> String {
    Price::from_minor_units(value, currency).display()
}

/// ISO 4217 currency codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    USD,
    EUR,
    GBP,
    CAD,
    AUD,
}

impl CurrencyCode {
    /// Display symbol for the currency.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::USD => "$",
            Self::EUR => "€",
            Self::GBP => "£",
            Self::CAD => "CA$",
            Self::AUD => "A$",
        }
    }

    /// ISO 4217 code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::USD => "USD",
            Self::EUR => "EUR",
            Self::GBP => "GBP",
            Self::CAD => "CAD",
            Self::AUD => "AUD",
        }
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl std::str::FromStr for CurrencyCode {
    type Err = CurrencyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "USD" => Ok(Self::USD),
            "EUR" => Ok(Self::EUR),
            "GBP" => Ok(Self::GBP),
            "CAD" => Ok(Self::CAD),
            "AUD" => Ok(Self::AUD),
            _ => Err(CurrencyError(s.to_owned())),
        }
    }
}
