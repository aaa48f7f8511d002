//! GraphQL operations against the Hygraph content API.
//!
//! Hygraph schemas are project specific, so the operations are written by
//! hand instead of generated from a schema dump. Each operation follows the
//! layout `graphql_client` codegen produces: a unit struct implementing
//! [`GraphQLQuery`] plus a snake_case module holding `Variables` and
//! `ResponseData`.

use graphql_client::{GraphQLQuery, QueryBody};

// =============================================================================
// PageDataQuery
// =============================================================================

/// Footer and navigation entries for one locale, with `en` as fallback.
pub struct PageDataQuery;

pub mod page_data_query {
    use serde::{Deserialize, Serialize};

    pub const OPERATION_NAME: &str = "PageDataQuery";

    pub const QUERY: &str = "query PageDataQuery($locale: Locale!) {
  footerCategories: categories(first: 4, locales: [$locale, en]) {
    ...CategoryFragment
    type: __typename
  }
  footerCollections: collections(first: 4, locales: [$locale, en]) {
    ...CollectionFragment
    type: __typename
  }
  navigationCategory: categories(first: 1, locales: [$locale, en]) {
    ...CategoryFragment
    type: __typename
  }
  navigationCollection: collections(first: 1, locales: [$locale, en]) {
    ...CollectionFragment
    type: __typename
  }
}

fragment CategoryFragment on Category {
  id
  description
  name
  slug
}

fragment CollectionFragment on Collection {
  id
  description
  name
  slug
}
";

    #[derive(Debug, Clone, Serialize)]
    pub struct Variables {
        pub locale: String,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ResponseData {
        pub footer_categories: Vec<PageEntry>,
        pub footer_collections: Vec<PageEntry>,
        pub navigation_category: Vec<PageEntry>,
        pub navigation_collection: Vec<PageEntry>,
    }

    /// A category or collection as selected by the fragments.
    #[derive(Debug, Clone, Deserialize)]
    pub struct PageEntry {
        pub id: String,
        pub description: Option<String>,
        pub name: String,
        pub slug: String,
        #[serde(rename = "type")]
        pub typename: String,
    }
}

impl GraphQLQuery for PageDataQuery {
    type Variables = page_data_query::Variables;
    type ResponseData = page_data_query::ResponseData;

    fn build_query(variables: Self::Variables) -> QueryBody<Self::Variables> {
        QueryBody {
            variables,
            query: page_data_query::QUERY,
            operation_name: page_data_query::OPERATION_NAME,
        }
    }
}

// =============================================================================
// ProductPageQuery
// =============================================================================

/// A single product by slug, with every localization.
pub struct ProductPageQuery;

pub mod product_page_query {
    use hygraph_storefront_core::{Image, Localization};
    use serde::{Deserialize, Serialize};

    pub const OPERATION_NAME: &str = "ProductPageQuery";

    pub const QUERY: &str = "query ProductPageQuery($locale: Locale!, $slug: String!) {
  product(where: { slug: $slug }, locales: [$locale, en]) {
    id
    slug
    name
    description
    price
    images {
      url
      height
      width
    }
    variants {
      ... on ProductColorVariant {
        id
        name
      }
      ... on ProductSizeVariant {
        id
        name
      }
      ... on ProductSizeColorVariant {
        id
        name
      }
    }
    localizations(includeCurrent: true) {
      locale
      name
      description
      slug
    }
  }
}
";

    #[derive(Debug, Clone, Serialize)]
    pub struct Variables {
        pub locale: String,
        pub slug: String,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct ResponseData {
        pub product: Option<ProductPageQueryProduct>,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct ProductPageQueryProduct {
        pub id: String,
        pub slug: String,
        pub name: String,
        pub description: Option<String>,
        pub price: i64,
        #[serde(default)]
        pub images: Vec<Image>,
        #[serde(default)]
        pub variants: Vec<ProductPageQueryVariant>,
        #[serde(default)]
        pub localizations: Vec<Localization>,
    }

    /// A member of the variants union. Union members without a matching
    /// inline fragment come back as an empty object.
    #[derive(Debug, Clone, Deserialize)]
    pub struct ProductPageQueryVariant {
        pub id: Option<String>,
        pub name: Option<String>,
    }
}

impl GraphQLQuery for ProductPageQuery {
    type Variables = product_page_query::Variables;
    type ResponseData = product_page_query::ResponseData;

    fn build_query(variables: Self::Variables) -> QueryBody<Self::Variables> {
        QueryBody {
            variables,
            query: product_page_query::QUERY,
            operation_name: product_page_query::OPERATION_NAME,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_page_data_query_requests_fallback_locale() {
        let body = PageDataQuery::build_query(page_data_query::Variables {
            locale: "de".to_string(),
        });

        assert_eq!(body.operation_name, "PageDataQuery");
        assert_eq!(body.query.matches("locales: [$locale, en]").count(), 4);
        assert_eq!(body.query.matches("type: __typename").count(), 4);
        assert!(body.query.contains("footerCategories: categories(first: 4"));
        assert!(body.query.contains("footerCollections: collections(first: 4"));
        assert!(body.query.contains("navigationCategory: categories(first: 1"));
        assert!(body.query.contains("navigationCollection: collections(first: 1"));
        assert!(body.query.contains("fragment CategoryFragment on Category {\n  id\n  description\n  name\n  slug\n}"));
        assert!(body.query.contains("fragment CollectionFragment on Collection {\n  id\n  description\n  name\n  slug\n}"));
    }

    #[test]
    fn test_query_body_serialization() {
        let body = ProductPageQuery::build_query(product_page_query::Variables {
            locale: "en".to_string(),
            slug: "tee".to_string(),
        });
        let json = serde_json::to_value(&body).unwrap();

        assert_eq!(json["operationName"], "ProductPageQuery");
        assert_eq!(json["variables"]["slug"], "tee");
        assert_eq!(json["variables"]["locale"], "en");
    }

    #[test]
    fn test_page_data_response_parses() {
        let json = serde_json::json!({
            "footerCategories": [
                { "id": "c1", "description": null, "name": "Shirts", "slug": "shirts", "type": "Category" }
            ],
            "footerCollections": [],
            "navigationCategory": [],
            "navigationCollection": [
                { "id": "k1", "description": "Summer", "name": "Summer", "slug": "summer", "type": "Collection" }
            ]
        });

        let data: page_data_query::ResponseData = serde_json::from_value(json).unwrap();
        assert_eq!(data.footer_categories.len(), 1);
        assert_eq!(data.navigation_collection[0].typename, "Collection");
    }
}
