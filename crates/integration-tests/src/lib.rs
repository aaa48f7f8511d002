//! Integration tests for the Hygraph storefront.
//!
//! Tests run the storefront router on an ephemeral port against
//! [`MockHygraph`], an in-process stand-in for the Hygraph content API that
//! records every request it receives.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p hygraph-storefront-integration-tests
//! ```

#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode},
    routing::post,
};
use hygraph_storefront::config::{HygraphConfig, StorefrontConfig, parse_locales};
use hygraph_storefront::hygraph::HygraphClient;
use hygraph_storefront::state::AppState;
use hygraph_storefront_core::CurrencyCode;
use secrecy::SecretString;
use serde_json::Value;

/// Bearer token the test configuration sends to the mock.
pub const TEST_TOKEN: &str = "test-query-token";

/// A GraphQL request received by [`MockHygraph`].
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub authorization: Option<String>,
    pub body: Value,
}

impl RecordedRequest {
    /// The `operationName` of the request body.
    #[must_use]
    pub fn operation_name(&self) -> Option<&str> {
        self.body["operationName"].as_str()
    }
}

type Responder = dyn Fn(&Value) -> (StatusCode, Value) + Send + Sync;

#[derive(Clone)]
struct MockState {
    responder: Arc<Responder>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

/// In-process mock of the Hygraph content API.
pub struct MockHygraph {
    addr: SocketAddr,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockHygraph {
    /// Start a mock that answers every request with `respond(body)`.
    pub async fn start(
        respond: impl Fn(&Value) -> (StatusCode, Value) + Send + Sync + 'static,
    ) -> Self {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let state = MockState {
            responder: Arc::new(respond),
            requests: Arc::clone(&requests),
        };

        let app = Router::new()
            .route("/graphql", post(handle_graphql))
            .with_state(state);
        let addr = serve(app).await;

        Self { addr, requests }
    }

    /// Start a mock that always returns `data` as a successful response.
    pub async fn with_data(data: Value) -> Self {
        Self::start(move |_| (StatusCode::OK, serde_json::json!({ "data": data }))).await
    }

    /// GraphQL endpoint URL of the mock.
    #[must_use]
    pub fn endpoint(&self) -> String {
        format!("http://{}/graphql", self.addr)
    }

    /// Requests received so far.
    #[must_use]
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Number of requests received with the given operation name.
    #[must_use]
    pub fn count(&self, operation_name: &str) -> usize {
        self.requests()
            .iter()
            .filter(|r| r.operation_name() == Some(operation_name))
            .count()
    }

    /// Storefront configuration pointing at this mock.
    #[must_use]
    pub fn config(&self) -> StorefrontConfig {
        StorefrontConfig {
            host: "127.0.0.1".parse().unwrap(),
            port: 0,
            locales: parse_locales("en,de").unwrap(),
            currency: CurrencyCode::USD,
            hygraph: HygraphConfig {
                endpoint: self.endpoint(),
                query_token: SecretString::from(TEST_TOKEN),
            },
            sentry_dsn: None,
            sentry_environment: None,
        }
    }

    /// A Hygraph client pointing at this mock.
    #[must_use]
    pub fn client(&self) -> HygraphClient {
        HygraphClient::new(&self.config().hygraph)
    }

    /// Run the storefront against this mock and return its base URL.
    pub async fn spawn_storefront(&self) -> String {
        let app = hygraph_storefront::app(AppState::new(self.config()));
        let addr = serve(app).await;
        format!("http://{addr}")
    }
}

async fn handle_graphql(
    State(state): State<MockState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let authorization = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    state.requests.lock().unwrap().push(RecordedRequest {
        authorization,
        body: body.clone(),
    });

    let (status, response) = (state.responder)(&body);
    (status, Json(response))
}

async fn serve(app: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

// =============================================================================
// Fixtures
// =============================================================================

/// A page data response: four footer categories, two footer collections and
/// one navigation entry of each type.
#[must_use]
pub fn page_data_fixture() -> Value {
    let category = |n: u32| {
        serde_json::json!({
            "id": format!("cat{n}"),
            "description": null,
            "name": format!("Category {n}"),
            "slug": format!("category-{n}"),
            "type": "Category",
        })
    };
    let collection = |n: u32| {
        serde_json::json!({
            "id": format!("col{n}"),
            "description": format!("Collection {n} description"),
            "name": format!("Collection {n}"),
            "slug": format!("collection-{n}"),
            "type": "Collection",
        })
    };

    serde_json::json!({
        "footerCategories": (1..=4).map(category).collect::<Vec<_>>(),
        "footerCollections": (1..=2).map(collection).collect::<Vec<_>>(),
        "navigationCategory": [category(9)],
        "navigationCollection": [collection(9)],
    })
}

/// A product with two variants, one image and English and German
/// localizations.
#[must_use]
pub fn product_fixture() -> Value {
    serde_json::json!({
        "product": {
            "id": "prod1",
            "slug": "unisex-tee",
            "name": "Unisex Tee",
            "description": "Soft cotton tee",
            "price": 2500,
            "images": [
                { "url": "https://media.graphassets.com/tee-front", "height": 800, "width": 600 },
                { "url": "https://media.graphassets.com/tee-back" }
            ],
            "variants": [
                { "id": "var-s", "name": "Small" },
                { "id": "var-l", "name": "Large" },
                {}
            ],
            "localizations": [
                { "locale": "en", "name": "Unisex Tee", "slug": "unisex-tee" },
                { "locale": "de", "name": "Unisex T-Shirt", "slug": "unisex-t-shirt" }
            ]
        }
    })
}
