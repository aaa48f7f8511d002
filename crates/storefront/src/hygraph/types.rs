//! Domain types for Hygraph content.
//!
//! These types provide a clean API separate from the raw response shapes in
//! [`super::queries`].

use serde::{Deserialize, Serialize};

/// Concrete content type of a navigation entry, taken from `__typename`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContentType {
    Category,
    Collection,
}

/// A category or collection linked from the footer or primary navigation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationLink {
    pub id: String,
    pub name: String,
    pub slug: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Origin of the entry, so callers can tell categories from collections.
    #[serde(rename = "type")]
    pub kind: ContentType,
}
