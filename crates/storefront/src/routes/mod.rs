//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! # Content
//! GET  /api/page-data/{locale}     - Footer and navigation content (JSON)
//!
//! # Products
//! GET  /products/{slug}            - Product page state (JSON, ?variantId=&locale=&currency=)
//! GET  /products/{slug}/card       - Product card fragment (HTML)
//!
//! # Cart
//! POST /cart                       - Create an empty cart
//! GET  /cart/{id}                  - Cart contents (JSON)
//! POST /cart/{id}/items            - Add a product variant to the cart
//! DELETE /cart/{id}/items/{variant} - Remove a variant's line from the cart
//! ```

pub mod cart;
pub mod page_data;
pub mod products;

use axum::{
    Router,
    routing::{delete, get, post},
};
use hygraph_storefront_core::{CurrencyCode, CurrencyError, Locale};

use crate::config::StorefrontConfig;
use crate::error::AppError;
use crate::state::AppState;

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/{slug}", get(products::show))
        .route("/{slug}/card", get(products::card))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(cart::create))
        .route("/{id}", get(cart::show))
        .route("/{id}/items", post(cart::add))
        .route("/{id}/items/{variant_id}", delete(cart::remove))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/page-data/{locale}", get(page_data::show))
        .nest("/products", product_routes())
        .nest("/cart", cart_routes())
}

/// Resolve an optional locale parameter against the site locales.
///
/// Missing locales resolve to the fallback locale.
pub(crate) fn resolve_locale(
    config: &StorefrontConfig,
    requested: Option<&str>,
) -> Result<Locale, AppError> {
    let Some(requested) = requested.filter(|s| !s.is_empty()) else {
        return Ok(Locale::fallback());
    };

    let locale = Locale::parse(requested).map_err(|e| AppError::BadRequest(e.to_string()))?;
    if !config.supports_locale(&locale) {
        return Err(AppError::NotFound(format!("locale {locale}")));
    }
    Ok(locale)
}

/// Resolve an optional currency parameter, defaulting to the configured one.
pub(crate) fn resolve_currency(
    config: &StorefrontConfig,
    requested: Option<&str>,
) -> Result<CurrencyCode, AppError> {
    requested
        .filter(|s| !s.is_empty())
        .map_or(Ok(config.currency), str::parse::<CurrencyCode>)
        .map_err(|e: CurrencyError| AppError::BadRequest(e.to_string()))
}
