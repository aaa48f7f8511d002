//! Hygraph content API client.
//!
//! # Architecture
//!
//! - Uses `graphql_client` request/response envelopes with `reqwest` for HTTP
//! - Hygraph is the source of truth for navigation and product content
//! - Product records are cached via `moka` (5 minute TTL); page data is
//!   always fetched fresh
//!
//! # Example
//!
//! ```rust,ignore
//! use hygraph_storefront::hygraph::HygraphClient;
//!
//! let client = HygraphClient::new(&config.hygraph);
//! let product = client.get_product_by_slug("unisex-long-sleeve-tee", &locale).await?;
//! ```

mod client;
mod conversions;
pub mod queries;
pub mod types;

pub use client::{HygraphClient, PageLinks};
pub use types::*;

use hygraph_storefront_core::ProductError;
use thiserror::Error;

/// Errors that can occur when talking to the Hygraph API.
#[derive(Debug, Error)]
pub enum HygraphError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// GraphQL query returned errors.
    #[error("GraphQL errors: {}", format_graphql_errors(.0))]
    GraphQL(Vec<GraphQLError>),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Rate limited by Hygraph.
    #[error("Rate limited, retry after {0} seconds")]
    RateLimited(u64),

    /// A product record violated the data contract.
    #[error("Invalid product: {0}")]
    InvalidProduct(#[from] ProductError),
}

/// A GraphQL error returned by the Hygraph API.
#[derive(Debug, Clone)]
pub struct GraphQLError {
    /// Error message.
    pub message: String,
    /// Source locations in the query.
    pub locations: Vec<GraphQLErrorLocation>,
    /// Path to the error in the response.
    pub path: Vec<serde_json::Value>,
}

impl GraphQLError {
    /// An error carrying only a message.
    #[must_use]
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            locations: vec![],
            path: vec![],
        }
    }
}

/// Location in a GraphQL query where an error occurred.
#[derive(Debug, Clone)]
pub struct GraphQLErrorLocation {
    /// Line number (1-indexed).
    pub line: i64,
    /// Column number (1-indexed).
    pub column: i64,
}

fn format_graphql_errors(errors: &[GraphQLError]) -> String {
    if errors.is_empty() {
        return "(no error details provided)".to_string();
    }

    errors
        .iter()
        .enumerate()
        .map(|(i, e)| {
            let mut parts = Vec::new();

            if !e.message.is_empty() {
                parts.push(e.message.clone());
            }

            if !e.path.is_empty() {
                let path_str = e
                    .path
                    .iter()
                    .map(|p| match p {
                        serde_json::Value::String(s) => s.clone(),
                        other => other.to_string(),
                    })
                    .collect::<Vec<_>>()
                    .join(".");
                parts.push(format!("path: {path_str}"));
            }

            if let Some(loc) = e.locations.first() {
                parts.push(format!("at line {}:{}", loc.line, loc.column));
            }

            if parts.is_empty() {
                format!("[error {}]: (no details)", i + 1)
            } else {
                parts.join(" ")
            }
        })
        .collect::<Vec<_>>()
        .join("; ")
}
