//! Page data route handler.

use axum::{
    Json,
    extract::{Path, State},
};
use hygraph_storefront_core::Locale;
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::page_data::{PageData, get_page_data};
use crate::state::AppState;

/// Footer and navigation content for a locale.
///
/// Locales outside the site locale list are not found.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(requested): Path<String>,
) -> Result<Json<PageData>> {
    let locale = Locale::parse(&requested)
        .ok()
        .filter(|locale| state.config().supports_locale(locale))
        .ok_or_else(|| AppError::NotFound(format!("locale {requested}")))?;

    let data = get_page_data(state.hygraph(), &locale).await?;
    Ok(Json(data))
}
