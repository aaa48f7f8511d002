//! Cart route handlers.
//!
//! Carts live in memory and are addressed by a random ID handed out on
//! creation. Adding an item opens the product page for the requested slug,
//! applies the selection, and sends the resulting line item to the cart.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use hygraph_storefront_core::{CurrencyCode, Quantity, VariantId};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::instrument;
use uuid::Uuid;

use super::{resolve_currency, resolve_locale};
use crate::cart::{Cart, CartLine};
use crate::error::{AppError, Result, add_breadcrumb};
use crate::product_page::{ProductPage, RecordedLocation};
use crate::state::{AppState, SharedCart};

/// Query parameters for cart display.
#[derive(Debug, Default, Deserialize)]
pub struct CartQuery {
    pub currency: Option<String>,
}

/// Request body for adding an item.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartRequest {
    pub slug: String,
    pub variant_id: Option<String>,
    pub quantity: Option<u32>,
    pub locale: Option<String>,
    pub currency: Option<String>,
}

/// Cart display data.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartView {
    pub id: Uuid,
    pub lines: Vec<CartLine>,
    pub total_items: u32,
    pub total_unique_items: usize,
    pub cart_total: i64,
    pub formatted_total: String,
}

impl CartView {
    fn new(id: Uuid, cart: &Cart, currency: CurrencyCode) -> Self {
        Self {
            id,
            lines: cart.lines().to_vec(),
            total_items: cart.total_items(),
            total_unique_items: cart.total_unique_items(),
            cart_total: cart.cart_total(),
            formatted_total: cart.formatted_total(currency),
        }
    }
}

async fn find_cart(state: &AppState, id: Uuid) -> Result<SharedCart> {
    state
        .carts()
        .get(&id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("cart {id}")))
}

/// Create an empty cart.
#[instrument(skip(state))]
pub async fn create(
    State(state): State<AppState>,
    Query(query): Query<CartQuery>,
) -> Result<(StatusCode, Json<CartView>)> {
    let currency = resolve_currency(state.config(), query.currency.as_deref())?;
    let id = Uuid::new_v4();
    let cart = Cart::new();
    let view = CartView::new(id, &cart, currency);

    state.carts().insert(id, Arc::new(Mutex::new(cart))).await;
    tracing::info!(cart_id = %id, "Created cart");

    Ok((StatusCode::CREATED, Json(view)))
}

/// Display a cart.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<CartQuery>,
) -> Result<Json<CartView>> {
    let currency = resolve_currency(state.config(), query.currency.as_deref())?;
    let cart = find_cart(&state, id).await?;
    let cart = cart.lock().await;
    Ok(Json(CartView::new(id, &cart, currency)))
}

/// Add a product variant to a cart.
///
/// A missing variant selects the product's first variant; a missing
/// quantity adds one unit.
#[instrument(skip(state, request), fields(slug = %request.slug))]
pub async fn add(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<AddToCartRequest>,
) -> Result<Json<CartView>> {
    let locale = resolve_locale(state.config(), request.locale.as_deref())?;
    let currency = resolve_currency(state.config(), request.currency.as_deref())?;
    let quantity = request.quantity.map_or(Ok(Quantity::ONE), Quantity::new)?;
    let shared = find_cart(&state, id).await?;

    let product = state
        .hygraph()
        .get_product_by_slug(&request.slug, &locale)
        .await?;
    let mut page = ProductPage::new(product, None, RecordedLocation::default())?;
    if let Some(variant_id) = request.variant_id.filter(|v| !v.is_empty()) {
        page.select_variant(VariantId::from(variant_id))?;
    }
    page.select_quantity(quantity);

    let mut cart = shared.lock().await;
    page.add_to_cart(&state.config().locales, &mut *cart);

    let cart_id = id.to_string();
    add_breadcrumb(
        "cart",
        "Added item to cart",
        Some(&[
            ("cart_id", cart_id.as_str()),
            ("variant_id", page.active_variant_id().as_str()),
        ]),
    );

    Ok(Json(CartView::new(id, &cart, currency)))
}

/// Remove a variant's line from a cart.
#[instrument(skip(state))]
pub async fn remove(
    State(state): State<AppState>,
    Path((id, variant_id)): Path<(Uuid, String)>,
    Query(query): Query<CartQuery>,
) -> Result<Json<CartView>> {
    let currency = resolve_currency(state.config(), query.currency.as_deref())?;
    let shared = find_cart(&state, id).await?;
    let mut cart = shared.lock().await;

    let variant_id = VariantId::from(variant_id);
    if !cart.remove_item(&variant_id) {
        return Err(AppError::NotFound(format!("cart line {variant_id}")));
    }

    let cart_id = id.to_string();
    add_breadcrumb(
        "cart",
        "Removed item from cart",
        Some(&[
            ("cart_id", cart_id.as_str()),
            ("variant_id", variant_id.as_str()),
        ]),
    );

    Ok(Json(CartView::new(id, &cart, currency)))
}
