//! Shopping cart store.
//!
//! The product page hands finished line items to a [`CartStore`]; it keeps no
//! reference to them afterwards. [`Cart`] is the in-memory store used by the
//! HTTP layer: adding an item that is already in the cart increases that
//! line's quantity instead of creating a second line.

use hygraph_storefront_core::{CartLineItem, CurrencyCode, Quantity, VariantId, format_currency_value};
use serde::Serialize;

/// Destination for "Add to Cart".
pub trait CartStore {
    /// Add `quantity` units of `item`.
    fn add_item(&mut self, item: CartLineItem, quantity: Quantity);
}

/// A line in the cart.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    #[serde(flatten)]
    pub item: CartLineItem,
    pub quantity: u32,
}

impl CartLine {
    /// Price of the line (unit price times quantity) in minor units.
    #[must_use]
    pub fn line_total(&self) -> i64 {
        self.item.price.saturating_mul(i64::from(self.quantity))
    }
}

/// An in-memory cart.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Look up the line for a variant.
    #[must_use]
    pub fn line(&self, id: &VariantId) -> Option<&CartLine> {
        self.lines.iter().find(|line| &line.item.id == id)
    }

    /// Remove the line for a variant. Returns whether a line was removed.
    pub fn remove_item(&mut self, id: &VariantId) -> bool {
        let before = self.lines.len();
        self.lines.retain(|line| &line.item.id != id);
        self.lines.len() != before
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn total_items(&self) -> u32 {
        self.lines
            .iter()
            .fold(0u32, |acc, line| acc.saturating_add(line.quantity))
    }

    /// Number of distinct lines.
    #[must_use]
    pub fn total_unique_items(&self) -> usize {
        self.lines.len()
    }

    /// Sum of all line totals in minor units.
    #[must_use]
    pub fn cart_total(&self) -> i64 {
        self.lines
            .iter()
            .fold(0i64, |acc, line| acc.saturating_add(line.line_total()))
    }

    /// Cart total formatted in `currency`.
    #[must_use]
    pub fn formatted_total(&self, currency: CurrencyCode) -> String {
        format_currency_value(currency, self.cart_total())
    }
}

impl CartStore for Cart {
    fn add_item(&mut self, item: CartLineItem, quantity: Quantity) {
        if let Some(line) = self.lines.iter_mut().find(|line| line.item.id == item.id) {
            line.quantity = line.quantity.saturating_add(quantity.get());
            return;
        }

        self.lines.push(CartLine {
            item,
            quantity: quantity.get(),
        });
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::BTreeMap;

    use hygraph_storefront_core::ProductId;

    use super::*;

    fn item(variant: &str, price: i64) -> CartLineItem {
        CartLineItem {
            id: VariantId::new(variant),
            product_id: ProductId::new("p1"),
            image: None,
            price,
            localizations: BTreeMap::new(),
        }
    }

    fn qty(n: u32) -> Quantity {
        Quantity::new(n).unwrap()
    }

    #[test]
    fn test_add_new_items() {
        let mut cart = Cart::new();
        cart.add_item(item("a", 2000), qty(2));
        cart.add_item(item("b", 500), qty(1));

        assert_eq!(cart.total_unique_items(), 2);
        assert_eq!(cart.total_items(), 3);
        assert_eq!(cart.cart_total(), 4500);
        assert_eq!(cart.formatted_total(CurrencyCode::USD), "$45.00");
    }

    #[test]
    fn test_add_existing_item_merges_quantity() {
        let mut cart = Cart::new();
        cart.add_item(item("a", 2000), qty(2));
        cart.add_item(item("a", 2000), qty(5));

        assert_eq!(cart.total_unique_items(), 1);
        assert_eq!(cart.line(&VariantId::new("a")).unwrap().quantity, 7);
        assert_eq!(cart.line(&VariantId::new("a")).unwrap().line_total(), 14_000);
    }

    #[test]
    fn test_remove_item() {
        let mut cart = Cart::new();
        cart.add_item(item("a", 100), qty(1));

        assert!(cart.remove_item(&VariantId::new("a")));
        assert!(!cart.remove_item(&VariantId::new("a")));
        assert!(cart.is_empty());
        assert_eq!(cart.cart_total(), 0);
    }

    #[test]
    fn test_line_serializes_item_fields_flat() {
        let mut cart = Cart::new();
        cart.add_item(item("a", 100), qty(3));

        let json = serde_json::to_value(&cart.lines()[0]).unwrap();
        assert_eq!(json["id"], "a");
        assert_eq!(json["productId"], "p1");
        assert_eq!(json["quantity"], 3);
    }
}
