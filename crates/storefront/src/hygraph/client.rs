//! Hygraph content API client implementation.
//!
//! Sends `graphql_client` query bodies with `reqwest`, authenticating with a
//! bearer token. Products are cached using `moka` (5-minute TTL).

use std::sync::Arc;
use std::time::Duration;

use graphql_client::{GraphQLQuery, Response};
use hygraph_storefront_core::{Locale, Product};
use moka::future::Cache;
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, instrument};

use crate::config::HygraphConfig;

use super::conversions::{convert_page_entries, convert_product};
use super::queries::{PageDataQuery, ProductPageQuery, page_data_query, product_page_query};
use super::types::NavigationLink;
use super::{GraphQLError, GraphQLErrorLocation, HygraphError};

/// Raw navigation content as returned by [`HygraphClient::get_page_links`].
#[derive(Debug, Clone)]
pub struct PageLinks {
    pub footer_categories: Vec<NavigationLink>,
    pub footer_collections: Vec<NavigationLink>,
    pub navigation_category: Vec<NavigationLink>,
    pub navigation_collection: Vec<NavigationLink>,
}

// =============================================================================
// HygraphClient
// =============================================================================

/// Client for the Hygraph content API.
///
/// Cheap to clone; all clones share the HTTP connection pool and cache.
#[derive(Clone)]
pub struct HygraphClient {
    inner: Arc<HygraphClientInner>,
}

struct HygraphClientInner {
    client: reqwest::Client,
    endpoint: String,
    token: SecretString,
    products: Cache<String, Product>,
}

impl HygraphClient {
    /// Create a new Hygraph client.
    ///
    /// Never fails on placeholder credentials; a misconfigured endpoint or
    /// token only surfaces when a query is sent.
    #[must_use]
    pub fn new(config: &HygraphConfig) -> Self {
        let products = Cache::builder()
            .max_capacity(1000)
            .time_to_live(Duration::from_secs(300)) // 5 minutes
            .support_invalidation_closures()
            .build();

        Self {
            inner: Arc::new(HygraphClientInner {
                client: reqwest::Client::new(),
                endpoint: config.endpoint.clone(),
                token: config.query_token.clone(),
                products,
            }),
        }
    }

    /// The GraphQL endpoint this client talks to.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.inner.endpoint
    }

    /// Execute a GraphQL query.
    async fn execute<Q: GraphQLQuery>(
        &self,
        variables: Q::Variables,
    ) -> Result<Q::ResponseData, HygraphError> {
        let request_body = Q::build_query(variables);

        let response = self
            .inner
            .client
            .post(&self.inner.endpoint)
            .bearer_auth(self.inner.token.expose_secret())
            .header("Content-Type", "application/json")
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(1);
            return Err(HygraphError::RateLimited(retry_after));
        }

        // Body as text first for better error diagnostics
        let response_text = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                body = %response_text.chars().take(500).collect::<String>(),
                "Hygraph API returned non-success status"
            );
            return Err(HygraphError::GraphQL(vec![GraphQLError::message(format!(
                "HTTP {status}: {}",
                response_text.chars().take(200).collect::<String>()
            ))]));
        }

        let response: Response<Q::ResponseData> = match serde_json::from_str(&response_text) {
            Ok(r) => r,
            Err(e) => {
                tracing::error!(
                    error = %e,
                    body = %response_text.chars().take(500).collect::<String>(),
                    "Failed to parse Hygraph GraphQL response"
                );
                return Err(HygraphError::Parse(e));
            }
        };

        if let Some(errors) = response.errors
            && !errors.is_empty()
        {
            debug!(errors = ?errors, "GraphQL errors in response");

            return Err(HygraphError::GraphQL(
                errors
                    .into_iter()
                    .map(|e| GraphQLError {
                        message: e.message,
                        locations: e.locations.map_or_else(Vec::new, |locs| {
                            locs.into_iter()
                                .map(|l| GraphQLErrorLocation {
                                    line: i64::from(l.line),
                                    column: i64::from(l.column),
                                })
                                .collect()
                        }),
                        path: e.path.map_or_else(Vec::new, |p| {
                            p.into_iter()
                                .map(|fragment| match fragment {
                                    graphql_client::PathFragment::Key(s) => {
                                        serde_json::Value::String(s)
                                    }
                                    graphql_client::PathFragment::Index(i) => {
                                        serde_json::Value::Number(i.into())
                                    }
                                })
                                .collect()
                        }),
                    })
                    .collect(),
            ));
        }

        response.data.ok_or_else(|| {
            tracing::error!(
                body = %response_text.chars().take(500).collect::<String>(),
                "Hygraph GraphQL response has no data and no errors"
            );
            HygraphError::GraphQL(vec![GraphQLError::message("No data in response")])
        })
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    /// Fetch footer and navigation entries for a locale in one request.
    ///
    /// Every selection also requests the `en` fallback locale.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the API reports GraphQL errors,
    /// or the response cannot be parsed.
    #[instrument(skip(self), fields(locale = %locale))]
    pub async fn get_page_links(&self, locale: &Locale) -> Result<PageLinks, HygraphError> {
        let variables = page_data_query::Variables {
            locale: locale.to_string(),
        };

        let data = self.execute::<PageDataQuery>(variables).await?;

        Ok(PageLinks {
            footer_categories: convert_page_entries(data.footer_categories)?,
            footer_collections: convert_page_entries(data.footer_collections)?,
            navigation_category: convert_page_entries(data.navigation_category)?,
            navigation_collection: convert_page_entries(data.navigation_collection)?,
        })
    }

    // =========================================================================
    // Products
    // =========================================================================

    /// Get a product by its slug.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no product has this slug, `InvalidProduct` if the
    /// record has no variants, or any transport/GraphQL error.
    #[instrument(skip(self), fields(slug = %slug, locale = %locale))]
    pub async fn get_product_by_slug(
        &self,
        slug: &str,
        locale: &Locale,
    ) -> Result<Product, HygraphError> {
        let cache_key = format!("product:{locale}:{slug}");

        if let Some(product) = self.inner.products.get(&cache_key).await {
            debug!("Cache hit for product");
            return Ok(product);
        }

        let variables = product_page_query::Variables {
            locale: locale.to_string(),
            slug: slug.to_string(),
        };

        let data = self.execute::<ProductPageQuery>(variables).await?;

        let product_data = data
            .product
            .ok_or_else(|| HygraphError::NotFound(format!("Product not found: {slug}")))?;

        let product = convert_product(product_data)?;

        self.inner.products.insert(cache_key, product.clone()).await;

        Ok(product)
    }

    // =========================================================================
    // Cache Management
    // =========================================================================

    /// Invalidate a cached product in every locale.
    pub async fn invalidate_product(&self, slug: &str) {
        let suffix = format!(":{slug}");
        if let Err(e) = self
            .inner
            .products
            .invalidate_entries_if(move |key, _| key.ends_with(&suffix))
        {
            tracing::warn!(error = %e, "Failed to invalidate product cache entries");
        }
        self.inner.products.run_pending_tasks().await;
    }

    /// Invalidate all cached data.
    pub async fn invalidate_all(&self) {
        self.inner.products.invalidate_all();
        self.inner.products.run_pending_tasks().await;
    }
}
