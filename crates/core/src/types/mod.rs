//! Core types for the storefront.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod cart;
pub mod id;
pub mod locale;
pub mod price;
pub mod product;

pub use cart::{CartLineItem, MAX_QUANTITY, Quantity, QuantityError};
pub use id::*;
pub use locale::{Locale, LocaleError};
pub use price::{CurrencyCode, CurrencyError, Price, format_currency_value};
pub use product::{Image, Localization, Product, ProductError, Variant};
