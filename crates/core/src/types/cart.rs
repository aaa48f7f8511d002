//! Cart line items and quantities.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::id::{ProductId, VariantId};
use super::locale::Locale;
use super::product::{Image, Localization};

/// Largest quantity the product page lets a shopper pick at once.
pub const MAX_QUANTITY: u32 = 5;

/// Error returned when a quantity is outside `1..=MAX_QUANTITY`.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("quantity must be between 1 and {MAX_QUANTITY} (got {0})")]
pub struct QuantityError(pub u32);

/// Number of units of a variant being added to the cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Quantity(u32);

impl Quantity {
    /// A single unit.
    pub const ONE: Self = Self(1);

    /// Create a quantity.
    ///
    /// # Errors
    ///
    /// Returns [`QuantityError`] when `value` is zero or above [`MAX_QUANTITY`].
    pub const fn new(value: u32) -> Result<Self, QuantityError> {
        if value == 0 || value > MAX_QUANTITY {
            return Err(QuantityError(value));
        }
        Ok(Self(value))
    }

    /// The underlying count.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }

    /// Every quantity a shopper can choose, in ascending order.
    pub fn options() -> impl Iterator<Item = Self> {
        (1..=MAX_QUANTITY).map(Self)
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Self::ONE
    }
}

impl TryFrom<u32> for Quantity {
    type Error = QuantityError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Quantity> for u32 {
    fn from(quantity: Quantity) -> Self {
        quantity.0
    }
}

/// The payload handed to the cart when a shopper adds a variant.
///
/// Serializes flat, with one key per locale next to the fixed fields:
///
/// ```json
/// { "id": "b", "productId": "1", "price": 20, "image": { "url": "x" },
///   "en": { "locale": "en", "title": "X" } }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineItem {
    /// ID of the selected variant; the cart keys lines by it.
    pub id: VariantId,
    pub product_id: ProductId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<Image>,
    /// Unit price in minor units.
    pub price: i64,
    /// One entry per locale; a locale named like a fixed field would
    /// overwrite it, see [`CartLineItem::is_reserved_key`].
    #[serde(flatten)]
    pub localizations: BTreeMap<Locale, Localization>,
}

impl CartLineItem {
    /// Keys of the fixed fields in the serialized form.
    pub const RESERVED_KEYS: &'static [&'static str] = &["id", "productId", "image", "price"];

    /// Whether `key` is taken by a fixed field and cannot carry a locale.
    #[must_use]
    pub fn is_reserved_key(key: &str) -> bool {
        Self::RESERVED_KEYS.contains(&key)
    }
}
