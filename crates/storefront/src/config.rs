//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional:
//! - `STOREFRONT_HOST` - Bind address (default: 127.0.0.1)
//! - `STOREFRONT_PORT` - Listen port (default: 3000)
//! - `STOREFRONT_LOCALES` - Comma-separated site locales (default: en,de); `en` is always included
//! - `STOREFRONT_CURRENCY` - Default display currency (default: USD)
//! - `HYGRAPH_ENDPOINT` - Hygraph content API endpoint
//! - `HYGRAPH_QUERY_TOKEN` - Hygraph permanent auth token
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//!
//! Missing Hygraph settings fall back to placeholder values so the server
//! still starts; queries fail until real values are supplied.

use std::net::{IpAddr, SocketAddr};

use hygraph_storefront_core::{CartLineItem, CurrencyCode, Locale};
use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

/// Endpoint used when `HYGRAPH_ENDPOINT` is unset.
pub const PLACEHOLDER_ENDPOINT: &str =
    "https://api-eu-central-1.hygraph.com/v2/YOUR_PROJECT_ID/master";

/// Token used when `HYGRAPH_QUERY_TOKEN` is unset.
pub const PLACEHOLDER_TOKEN: &str = "your_default_token";

/// Blocklist of common placeholder patterns (case-insensitive)
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "your_",
    "changeme",
    "replace",
    "placeholder",
    "example",
    "xxx",
    "todo",
    "fixme",
    "insert",
    "enter-",
    "put-your",
    "add-your",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Site locales, fallback locale first
    pub locales: Vec<Locale>,
    /// Currency used when a request does not name one
    pub currency: CurrencyCode,
    /// Hygraph content API configuration
    pub hygraph: HygraphConfig,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g. production, staging)
    pub sentry_environment: Option<String>,
}

/// Hygraph content API configuration.
///
/// Implements `Debug` manually to redact the token.
#[derive(Clone)]
pub struct HygraphConfig {
    /// GraphQL endpoint URL
    pub endpoint: String,
    /// Bearer token for content queries
    pub query_token: SecretString,
}

impl std::fmt::Debug for HygraphConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HygraphConfig")
            .field("endpoint", &self.endpoint)
            .field("query_token", &"[REDACTED]")
            .finish()
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("STOREFRONT_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("STOREFRONT_HOST".to_string(), e.to_string())
            })?;
        let port = get_env_or_default("STOREFRONT_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("STOREFRONT_PORT".to_string(), e.to_string())
            })?;
        let locales = parse_locales(&get_env_or_default("STOREFRONT_LOCALES", "en,de"))
            .map_err(|e| ConfigError::InvalidEnvVar("STOREFRONT_LOCALES".to_string(), e))?;
        let currency = get_env_or_default("STOREFRONT_CURRENCY", "USD")
            .parse::<CurrencyCode>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("STOREFRONT_CURRENCY".to_string(), e.to_string())
            })?;

        let hygraph = HygraphConfig::from_values(
            get_optional_env("HYGRAPH_ENDPOINT"),
            get_optional_env("HYGRAPH_QUERY_TOKEN"),
        );

        Ok(Self {
            host,
            port,
            locales,
            currency,
            hygraph,
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether `locale` is one of the site locales.
    #[must_use]
    pub fn supports_locale(&self, locale: &Locale) -> bool {
        self.locales.contains(locale)
    }
}

impl HygraphConfig {
    /// Build from optional settings, substituting placeholders for missing
    /// values.
    ///
    /// Runs before logging is set up; report problems with
    /// [`HygraphConfig::warnings`] once a subscriber is installed.
    #[must_use]
    pub fn from_values(endpoint: Option<String>, query_token: Option<String>) -> Self {
        Self {
            endpoint: endpoint.unwrap_or_else(|| PLACEHOLDER_ENDPOINT.to_string()),
            query_token: SecretString::from(
                query_token.unwrap_or_else(|| PLACEHOLDER_TOKEN.to_string()),
            ),
        }
    }

    /// Problems with this configuration worth a startup warning.
    #[must_use]
    pub fn warnings(&self) -> Vec<&'static str> {
        let mut warnings = Vec::new();
        if self.endpoint == PLACEHOLDER_ENDPOINT {
            warnings.push("HYGRAPH_ENDPOINT not set, using placeholder endpoint");
        }
        if self.query_token.expose_secret() == PLACEHOLDER_TOKEN {
            warnings.push("HYGRAPH_QUERY_TOKEN not set, using placeholder token");
        }
        if self.is_placeholder() {
            warnings.push("Hygraph configuration looks like a placeholder; content queries will fail");
        }
        warnings
    }

    /// Whether the endpoint or token still looks like a placeholder.
    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        looks_like_placeholder(&self.endpoint)
            || looks_like_placeholder(self.query_token.expose_secret())
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable, treating empty values as unset.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    get_optional_env(key).unwrap_or_else(|| default.to_string())
}

/// Whether a configured value contains a common placeholder pattern.
fn looks_like_placeholder(value: &str) -> bool {
    let lower = value.to_lowercase();
    PLACEHOLDER_PATTERNS
        .iter()
        .any(|pattern| lower.contains(pattern))
}

/// Parse a comma-separated locale list.
///
/// Blank entries and duplicates are skipped. The fallback locale is always
/// present and always first.
///
/// # Errors
///
/// Returns a description of the first entry that is not a valid locale, or
/// that would collide with a fixed cart line item field (such as `id`).
pub fn parse_locales(value: &str) -> Result<Vec<Locale>, String> {
    let mut locales = vec![Locale::fallback()];

    for part in value.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        let locale = Locale::parse(part).map_err(|e| e.to_string())?;
        if CartLineItem::is_reserved_key(locale.as_str()) {
            return Err(format!("locale '{locale}' collides with a cart line item field"));
        }
        if !locales.contains(&locale) {
            locales.push(locale);
        }
    }

    Ok(locales)
}
