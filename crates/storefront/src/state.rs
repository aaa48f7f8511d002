//! Application state shared across handlers.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::cart::Cart;
use crate::config::StorefrontConfig;
use crate::hygraph::HygraphClient;

/// Carts untouched for this long are dropped.
const CART_IDLE_TIMEOUT: Duration = Duration::from_secs(60 * 60 * 24 * 7);

/// A cart shared between concurrent requests.
pub type SharedCart = Arc<Mutex<Cart>>;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like the Hygraph client and the cart store.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    hygraph: HygraphClient,
    carts: Cache<Uuid, SharedCart>,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(config: StorefrontConfig) -> Self {
        let hygraph = HygraphClient::new(&config.hygraph);
        let carts = Cache::builder()
            .max_capacity(100_000)
            .time_to_idle(CART_IDLE_TIMEOUT)
            .build();

        Self {
            inner: Arc::new(AppStateInner {
                config,
                hygraph,
                carts,
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the Hygraph client.
    #[must_use]
    pub fn hygraph(&self) -> &HygraphClient {
        &self.inner.hygraph
    }

    /// Get a reference to the cart store.
    #[must_use]
    pub fn carts(&self) -> &Cache<Uuid, SharedCart> {
        &self.inner.carts
    }
}
