//! Product records as loaded from the CMS.
//!
//! These are read-only snapshots; the storefront never mutates a product.
//! [`Product::validate`] checks the invariants the product page relies on and
//! should be called wherever products enter the system.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::id::{ProductId, VariantId};
use super::locale::Locale;

/// Errors raised when a product record does not satisfy the data contract.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ProductError {
    /// The product has no variants, so there is nothing to select.
    #[error("product {0} has no variants")]
    NoVariants(ProductId),
    /// Two variants share the same ID.
    #[error("product {product} has duplicate variant {variant}")]
    DuplicateVariant {
        /// Product carrying the duplicate.
        product: ProductId,
        /// The repeated variant ID.
        variant: VariantId,
    },
    /// The requested variant does not belong to the product.
    #[error("variant {0} not found")]
    VariantNotFound(VariantId),
}

/// A product image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    /// Image URL.
    pub url: String,
    /// Image height in pixels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    /// Image width in pixels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
}

impl Image {
    /// Create an image with no known dimensions.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            height: None,
            width: None,
        }
    }
}

/// A purchasable configuration of a product (size, color, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variant {
    pub id: VariantId,
    pub name: String,
}

/// Localized content of a product for one locale.
///
/// Only `locale` is interpreted; every other field is kept verbatim so it can
/// be passed through to the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Localization {
    pub locale: Locale,
    #[serde(flatten)]
    pub fields: serde_json::Map<String, serde_json::Value>,
}

impl Localization {
    /// Create a localization with no extra fields.
    #[must_use]
    pub fn new(locale: Locale) -> Self {
        Self {
            locale,
            fields: serde_json::Map::new(),
        }
    }

    /// Add a field, builder style.
    #[must_use]
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }
}

/// A product as published in the CMS.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub slug: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Base price in minor units; variants share it.
    pub price: i64,
    #[serde(default)]
    pub images: Vec<Image>,
    pub variants: Vec<Variant>,
    #[serde(default)]
    pub localizations: Vec<Localization>,
}

impl Product {
    /// Check the invariants the product page depends on.
    ///
    /// # Errors
    ///
    /// Returns [`ProductError::NoVariants`] if `variants` is empty and
    /// [`ProductError::DuplicateVariant`] if two variants share an ID.
    pub fn validate(&self) -> Result<(), ProductError> {
        if self.variants.is_empty() {
            return Err(ProductError::NoVariants(self.id.clone()));
        }

        let mut seen = HashSet::with_capacity(self.variants.len());
        for variant in &self.variants {
            if !seen.insert(&variant.id) {
                return Err(ProductError::DuplicateVariant {
                    product: self.id.clone(),
                    variant: variant.id.clone(),
                });
            }
        }

        Ok(())
    }

    /// The first image, if any.
    #[must_use]
    pub fn primary_image(&self) -> Option<&Image> {
        self.images.first()
    }

    /// The first variant, if any.
    #[must_use]
    pub fn first_variant(&self) -> Option<&Variant> {
        self.variants.first()
    }

    /// Look up a variant by ID.
    #[must_use]
    pub fn variant(&self, id: &VariantId) -> Option<&Variant> {
        self.variants.iter().find(|variant| &variant.id == id)
    }

    /// Look up the localization for a locale.
    #[must_use]
    pub fn localization(&self, locale: &Locale) -> Option<&Localization> {
        self.localizations
            .iter()
            .find(|localization| &localization.locale == locale)
    }
}
