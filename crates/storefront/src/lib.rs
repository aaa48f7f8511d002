//! Hygraph storefront library.
//!
//! Content comes from a Hygraph GraphQL endpoint: footer and navigation
//! links for every page, and products for product pages and cards. The
//! product page logic (variant and quantity selection, building cart line
//! items) lives in [`product_page`]; [`routes`] exposes it over HTTP.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod config;
pub mod error;
pub mod hygraph;
pub mod page_data;
pub mod product_card;
pub mod product_page;
pub mod routes;
pub mod state;

use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

use state::AppState;

/// Build the full application router.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .merge(routes::routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check Hygraph.
async fn health() -> &'static str {
    "ok"
}
