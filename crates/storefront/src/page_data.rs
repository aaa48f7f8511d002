//! Footer and navigation content shared by every page.
//!
//! [`get_page_data`] issues a single composite query and reshapes it. It is
//! all-or-nothing: there is no retry, no cache and no partial result. Callers
//! decide how to degrade when it fails.

use hygraph_storefront_core::Locale;
use serde::Serialize;
use thiserror::Error;

use crate::hygraph::{HygraphClient, HygraphError, NavigationLink, PageLinks};

/// The content source could not deliver page data.
#[derive(Debug, Error)]
#[error("failed to fetch page data for locale {locale}: {source}")]
pub struct DataFetchError {
    /// Locale that was requested.
    pub locale: Locale,
    /// Underlying client failure.
    #[source]
    pub source: HygraphError,
}

/// Navigation and footer view model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageData {
    pub footer: Footer,
    pub navigation: Navigation,
}

/// Footer link lists (up to four of each).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Footer {
    pub categories: Vec<NavigationLink>,
    pub collections: Vec<NavigationLink>,
}

/// Primary navigation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Navigation {
    /// At most one category followed by at most one collection.
    pub pages: Vec<NavigationLink>,
}

impl From<PageLinks> for PageData {
    fn from(links: PageLinks) -> Self {
        let mut pages = links.navigation_category;
        pages.extend(links.navigation_collection);

        Self {
            footer: Footer {
                categories: links.footer_categories,
                collections: links.footer_collections,
            },
            navigation: Navigation { pages },
        }
    }
}

/// Fetch the footer and navigation content for `locale`.
///
/// # Errors
///
/// Returns [`DataFetchError`] if the content source call fails for any
/// reason. The failure is logged before it is returned.
pub async fn get_page_data(
    client: &HygraphClient,
    locale: &Locale,
) -> Result<PageData, DataFetchError> {
    match client.get_page_links(locale).await {
        Ok(links) => Ok(PageData::from(links)),
        Err(source) => {
            tracing::error!(
                locale = %locale,
                endpoint = %client.endpoint(),
                error = %source,
                "Error fetching page data"
            );
            Err(DataFetchError {
                locale: locale.clone(),
                source,
            })
        }
    }
}
