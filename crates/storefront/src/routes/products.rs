//! Product route handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use hygraph_storefront_core::{CurrencyCode, Image, Product, Quantity, format_currency_value};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use super::{resolve_currency, resolve_locale};
use crate::error::Result;
use crate::product_card::{ProductCard, ProductCardTemplate};
use crate::product_page::{ProductPage, RecordedLocation};
use crate::state::AppState;

/// Query parameters for the product page.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductQuery {
    pub variant_id: Option<String>,
    pub locale: Option<String>,
    pub currency: Option<String>,
}

/// Variant option shown in the variant picker.
#[derive(Debug, Clone, Serialize)]
pub struct VariantView {
    pub id: String,
    pub name: String,
    pub selected: bool,
}

/// Product page display data.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPageView {
    pub id: String,
    pub slug: String,
    pub name: String,
    pub description: String,
    pub price: String,
    pub primary_image: Option<Image>,
    pub images: Vec<Image>,
    pub variants: Vec<VariantView>,
    pub has_variant_choice: bool,
    pub active_variant_id: String,
    pub quantity: u32,
    pub quantity_options: Vec<u32>,
    /// Address that deep-links the current selection.
    pub url: Option<String>,
}

impl ProductPageView {
    fn new(page: &ProductPage<RecordedLocation>, currency: CurrencyCode) -> Self {
        let product: &Product = page.product();
        let active = page.active_variant_id();

        Self {
            id: product.id.to_string(),
            slug: product.slug.clone(),
            name: product.name.clone(),
            description: product.description.clone(),
            price: format_currency_value(currency, product.price),
            primary_image: page.primary_image().cloned(),
            images: product.images.clone(),
            variants: product
                .variants
                .iter()
                .map(|variant| VariantView {
                    id: variant.id.to_string(),
                    name: variant.name.clone(),
                    selected: &variant.id == active,
                })
                .collect(),
            has_variant_choice: page.has_variant_choice(),
            active_variant_id: active.to_string(),
            quantity: page.quantity().get(),
            quantity_options: Quantity::options().map(Quantity::get).collect(),
            url: page.location().current().map(str::to_string),
        }
    }
}

/// Display a product page.
///
/// An unknown or missing `variantId` selects the first variant.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(query): Query<ProductQuery>,
) -> Result<Json<ProductPageView>> {
    let locale = resolve_locale(state.config(), query.locale.as_deref())?;
    let currency = resolve_currency(state.config(), query.currency.as_deref())?;

    let product = state.hygraph().get_product_by_slug(&slug, &locale).await?;
    let page = ProductPage::new(
        product,
        query.variant_id.as_deref(),
        RecordedLocation::default(),
    )?;

    Ok(Json(ProductPageView::new(&page, currency)))
}

/// Render the product card fragment.
#[instrument(skip(state))]
pub async fn card(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(query): Query<ProductQuery>,
) -> Result<ProductCardTemplate> {
    let locale = resolve_locale(state.config(), query.locale.as_deref())?;
    let currency = resolve_currency(state.config(), query.currency.as_deref())?;

    let product = state.hygraph().get_product_by_slug(&slug, &locale).await?;
    Ok(ProductCardTemplate {
        card: ProductCard::new(&product, currency),
    })
}
