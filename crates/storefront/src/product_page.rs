//! Variant and quantity selection for a product detail page.
//!
//! A [`ProductPage`] owns the transient selection state of one page view:
//! the active variant and the chosen quantity. Every variant change is
//! reported to a [`VariantLocation`] so the page address can deep-link the
//! selection, and "Add to Cart" builds a [`CartLineItem`] for a
//! [`CartStore`].

use std::collections::BTreeMap;

use hygraph_storefront_core::{
    CartLineItem, Image, Locale, Product, ProductError, Quantity, Variant, VariantId,
};
use url::form_urlencoded;

use crate::cart::CartStore;

/// Query parameter that carries the selected variant.
pub const VARIANT_QUERY_PARAM: &str = "variantId";

/// Site-relative URL of a product page with a variant selected.
#[must_use]
pub fn variant_url(slug: &str, variant_id: &VariantId) -> String {
    let query = form_urlencoded::Serializer::new(String::new())
        .append_pair(VARIANT_QUERY_PARAM, variant_id.as_str())
        .finish();
    format!("/products/{slug}?{query}")
}

/// Port to the page address.
///
/// Implementations replace the current URL without adding a history entry or
/// navigating. Calls are fire-and-forget.
pub trait VariantLocation {
    /// Encode `variant_id` in the address of the product page for `slug`.
    fn replace_variant(&mut self, slug: &str, variant_id: &VariantId);
}

/// A [`VariantLocation`] that remembers the latest URL.
///
/// Used by the HTTP layer to report the canonical address of a selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordedLocation {
    current: Option<String>,
    replacements: usize,
}

impl RecordedLocation {
    /// The latest URL, if any replacement happened.
    #[must_use]
    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// Number of replacements so far.
    #[must_use]
    pub const fn replacements(&self) -> usize {
        self.replacements
    }
}

impl VariantLocation for RecordedLocation {
    fn replace_variant(&mut self, slug: &str, variant_id: &VariantId) {
        self.current = Some(variant_url(slug, variant_id));
        self.replacements += 1;
    }
}

/// Selection state of a product page.
#[derive(Debug, Clone)]
pub struct ProductPage<L> {
    product: Product,
    active_variant_id: VariantId,
    quantity: Quantity,
    location: L,
}

impl<L: VariantLocation> ProductPage<L> {
    /// Open a product page.
    ///
    /// The active variant is `requested_variant` when it is non-empty and
    /// names one of the product's variants, otherwise the first variant.
    /// Quantity starts at one. The location is updated with the initial
    /// selection.
    ///
    /// # Errors
    ///
    /// Returns [`ProductError`] if the product has no variants or duplicate
    /// variant IDs.
    pub fn new(
        product: Product,
        requested_variant: Option<&str>,
        mut location: L,
    ) -> Result<Self, ProductError> {
        product.validate()?;

        let requested = requested_variant
            .filter(|id| !id.is_empty())
            .map(VariantId::from)
            .filter(|id| product.variant(id).is_some());

        let active_variant_id = match requested {
            Some(id) => id,
            None => product
                .first_variant()
                .map(|variant| variant.id.clone())
                .ok_or_else(|| ProductError::NoVariants(product.id.clone()))?,
        };

        location.replace_variant(&product.slug, &active_variant_id);

        Ok(Self {
            product,
            active_variant_id,
            quantity: Quantity::ONE,
            location,
        })
    }

    /// Make `id` the active variant and update the page address.
    ///
    /// The address is updated on every call, including when `id` is already
    /// active.
    ///
    /// # Errors
    ///
    /// Returns [`ProductError::VariantNotFound`] and leaves the state
    /// untouched if `id` is not one of the product's variants.
    pub fn select_variant(&mut self, id: VariantId) -> Result<(), ProductError> {
        if self.product.variant(&id).is_none() {
            return Err(ProductError::VariantNotFound(id));
        }

        self.location.replace_variant(&self.product.slug, &id);
        self.active_variant_id = id;
        Ok(())
    }

    /// Set the quantity to add.
    pub const fn select_quantity(&mut self, quantity: Quantity) {
        self.quantity = quantity;
    }

    /// Send the active variant to the cart.
    ///
    /// One localization is attached per entry of `locales` the product has a
    /// record for.
    pub fn add_to_cart(&self, locales: &[Locale], store: &mut impl CartStore) {
        let item = self.build_line_item(locales);
        tracing::debug!(
            product_id = %item.product_id,
            variant_id = %item.id,
            quantity = self.quantity.get(),
            "Adding item to cart"
        );
        store.add_item(item, self.quantity);
    }
}

impl<L> ProductPage<L> {
    /// The product shown on this page.
    #[must_use]
    pub const fn product(&self) -> &Product {
        &self.product
    }

    /// ID of the active variant.
    #[must_use]
    pub const fn active_variant_id(&self) -> &VariantId {
        &self.active_variant_id
    }

    /// The active variant record.
    #[must_use]
    pub fn active_variant(&self) -> Option<&Variant> {
        self.product.variant(&self.active_variant_id)
    }

    /// Quantity that "Add to Cart" will use.
    #[must_use]
    pub const fn quantity(&self) -> Quantity {
        self.quantity
    }

    /// The product's primary image, if it has any images.
    #[must_use]
    pub fn primary_image(&self) -> Option<&Image> {
        self.product.primary_image()
    }

    /// Whether the shopper has more than one variant to choose from.
    #[must_use]
    pub fn has_variant_choice(&self) -> bool {
        self.product.variants.len() > 1
    }

    /// The page address port.
    #[must_use]
    pub const fn location(&self) -> &L {
        &self.location
    }

    /// Build the line item for the current selection.
    ///
    /// The image is always the product's first image and the price is the
    /// product's base price.
    #[must_use]
    pub fn build_line_item(&self, locales: &[Locale]) -> CartLineItem {
        let localizations = locales
            .iter()
            .filter_map(|locale| {
                self.product
                    .localization(locale)
                    .map(|localization| (locale.clone(), localization.clone()))
            })
            .collect::<BTreeMap<_, _>>();

        CartLineItem {
            id: self.active_variant_id.clone(),
            product_id: self.product.id.clone(),
            image: self.product.primary_image().cloned(),
            price: self.product.price,
            localizations,
        }
    }
}
