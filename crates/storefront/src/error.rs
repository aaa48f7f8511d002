//! Unified error handling with Sentry integration.
//!
//! Route handlers return `Result<T, AppError>`. Upstream failures are
//! captured to Sentry before the response is sent; clients only ever see a
//! generic message for them.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use hygraph_storefront_core::{ProductError, QuantityError};
use thiserror::Error;

use crate::hygraph::HygraphError;
use crate::page_data::DataFetchError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Hygraph API operation failed.
    #[error("Hygraph error: {0}")]
    Hygraph(#[from] HygraphError),

    /// Page data could not be fetched.
    #[error(transparent)]
    DataFetch(#[from] DataFetchError),

    /// Product data or selection is invalid.
    #[error("Product error: {0}")]
    Product(#[from] ProductError),

    /// Quantity outside the allowed range.
    #[error("Bad request: {0}")]
    Quantity(#[from] QuantityError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            Self::Hygraph(HygraphError::NotFound(_)) | Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Hygraph(HygraphError::RateLimited(_)) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Hygraph(_)
            | Self::DataFetch(_)
            | Self::Product(ProductError::NoVariants(_) | ProductError::DuplicateVariant { .. }) => {
                StatusCode::BAD_GATEWAY
            }
            Self::Product(ProductError::VariantNotFound(_))
            | Self::Quantity(_)
            | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Capture server errors to Sentry
        if status.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        // Don't expose upstream error details to clients
        let message = match &self {
            Self::Internal(_) => "Internal server error".to_string(),
            _ if status.is_server_error() => "External service error".to_string(),
            Self::Hygraph(HygraphError::NotFound(what)) => format!("Not found: {what}"),
            _ => self.to_string(),
        };

        (status, message).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Add a breadcrumb for user actions.
///
/// Breadcrumbs appear in Sentry error reports to show the trail of user actions
/// leading up to an error.
///
/// # Example
///
/// ```rust,ignore
/// add_breadcrumb("cart", "Added item to cart", Some(&[("variant_id", "ckv1")]));
/// ```
pub fn add_breadcrumb(category: &str, message: &str, data: Option<&[(&str, &str)]>) {
    let mut breadcrumb = sentry::Breadcrumb {
        category: Some(category.to_string()),
        message: Some(message.to_string()),
        level: sentry::Level::Info,
        ..Default::default()
    };

    if let Some(pairs) = data {
        for (key, value) in pairs {
            breadcrumb.data.insert(
                (*key).to_string(),
                serde_json::Value::String((*value).to_string()),
            );
        }
    }

    sentry::add_breadcrumb(breadcrumb);
}

#[cfg(test)]
mod tests {
    use hygraph_storefront_core::{Locale, VariantId};

    use super::*;

    fn get_status(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_app_error_display() {
        let err = AppError::NotFound("locale fr".to_string());
        assert_eq!(err.to_string(), "Not found: locale fr");

        let err = AppError::BadRequest("invalid input".to_string());
        assert_eq!(err.to_string(), "Bad request: invalid input");
    }

    #[test]
    fn test_app_error_status_codes() {
        assert_eq!(
            get_status(AppError::NotFound("test".to_string())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get_status(AppError::BadRequest("test".to_string())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(AppError::Internal("test".to_string())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            get_status(AppError::Quantity(QuantityError(9))),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_upstream_status_codes() {
        assert_eq!(
            get_status(AppError::Hygraph(HygraphError::NotFound("tee".to_string()))),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get_status(AppError::Hygraph(HygraphError::RateLimited(2))),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            get_status(AppError::DataFetch(DataFetchError {
                locale: Locale::fallback(),
                source: HygraphError::NotFound("x".to_string()),
            })),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            get_status(AppError::Product(ProductError::NoVariants("p1".into()))),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            get_status(AppError::Product(ProductError::VariantNotFound(
                VariantId::new("v9")
            ))),
            StatusCode::BAD_REQUEST
        );
    }
}
