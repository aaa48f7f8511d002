//! Conversions from raw Hygraph responses into domain types.

use hygraph_storefront_core::{Product, ProductId, Variant, VariantId};

use super::queries::{page_data_query, product_page_query};
use super::types::{ContentType, NavigationLink};
use super::{GraphQLError, HygraphError};

// =============================================================================
// PageDataQuery conversions
// =============================================================================

fn convert_content_type(typename: &str) -> Result<ContentType, HygraphError> {
    match typename {
        "Category" => Ok(ContentType::Category),
        "Collection" => Ok(ContentType::Collection),
        other => Err(HygraphError::GraphQL(vec![GraphQLError::message(format!(
            "unexpected __typename '{other}' in navigation entry"
        ))])),
    }
}

pub fn convert_page_entry(entry: page_data_query::PageEntry) -> Result<NavigationLink, HygraphError> {
    Ok(NavigationLink {
        kind: convert_content_type(&entry.typename)?,
        id: entry.id,
        name: entry.name,
        slug: entry.slug,
        description: entry.description,
    })
}

pub fn convert_page_entries(
    entries: Vec<page_data_query::PageEntry>,
) -> Result<Vec<NavigationLink>, HygraphError> {
    entries.into_iter().map(convert_page_entry).collect()
}

// =============================================================================
// ProductPageQuery conversions
// =============================================================================

/// Convert a product and enforce its data contract.
///
/// Variant union members that did not match an inline fragment carry no ID
/// and are dropped before validation.
pub fn convert_product(
    product: product_page_query::ProductPageQueryProduct,
) -> Result<Product, HygraphError> {
    let variants = product
        .variants
        .into_iter()
        .filter_map(|variant| {
            let id = variant.id?;
            Some(Variant {
                name: variant.name.unwrap_or_else(|| id.clone()),
                id: VariantId::new(id),
            })
        })
        .collect();

    let product = Product {
        id: ProductId::new(product.id),
        slug: product.slug,
        name: product.name,
        description: product.description.unwrap_or_default(),
        price: product.price,
        images: product.images,
        variants,
        localizations: product.localizations,
    };

    product.validate()?;
    Ok(product)
}
