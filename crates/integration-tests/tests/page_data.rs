//! Integration tests for footer and navigation page data.

#![allow(clippy::unwrap_used)]

use hygraph_storefront::hygraph::{ContentType, HygraphError};
use hygraph_storefront::page_data::get_page_data;
use hygraph_storefront_core::Locale;
use hygraph_storefront_integration_tests::{MockHygraph, TEST_TOKEN, page_data_fixture};
use reqwest::StatusCode;
use serde_json::json;

fn de() -> Locale {
    Locale::parse("de").unwrap()
}

#[tokio::test]
async fn test_page_data_shapes_response() {
    let mock = MockHygraph::with_data(page_data_fixture()).await;

    let data = get_page_data(&mock.client(), &de()).await.unwrap();

    assert_eq!(data.footer.categories.len(), 4);
    assert_eq!(data.footer.collections.len(), 2);
    assert!(
        data.footer
            .categories
            .iter()
            .all(|link| link.kind == ContentType::Category)
    );

    let pages: Vec<(&str, ContentType)> = data
        .navigation
        .pages
        .iter()
        .map(|link| (link.id.as_str(), link.kind))
        .collect();
    assert_eq!(
        pages,
        vec![("cat9", ContentType::Category), ("col9", ContentType::Collection)]
    );
}

#[tokio::test]
async fn test_page_data_sends_locale_and_token() {
    let mock = MockHygraph::with_data(page_data_fixture()).await;

    get_page_data(&mock.client(), &de()).await.unwrap();

    let requests = mock.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].operation_name(), Some("PageDataQuery"));
    assert_eq!(requests[0].body["variables"], json!({ "locale": "de" }));
    assert_eq!(
        requests[0].authorization.as_deref(),
        Some(format!("Bearer {TEST_TOKEN}").as_str())
    );
}

#[tokio::test]
async fn test_page_data_is_not_cached() {
    let mock = MockHygraph::with_data(page_data_fixture()).await;
    let client = mock.client();

    get_page_data(&client, &de()).await.unwrap();
    get_page_data(&client, &de()).await.unwrap();

    assert_eq!(mock.count("PageDataQuery"), 2);
}

#[tokio::test]
async fn test_page_data_http_error_is_data_fetch_error() {
    let mock = MockHygraph::start(|_| {
        (
            axum::http::StatusCode::INTERNAL_SERVER_ERROR,
            json!({ "message": "boom" }),
        )
    })
    .await;

    let err = get_page_data(&mock.client(), &de()).await.unwrap_err();

    assert_eq!(err.locale, de());
    match err.source {
        HygraphError::GraphQL(errors) => assert!(errors[0].message.starts_with("HTTP 500")),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_page_data_graphql_errors_fail_the_whole_call() {
    let mock = MockHygraph::start(|_| {
        (
            axum::http::StatusCode::OK,
            json!({
                "data": null,
                "errors": [{ "message": "variable 'locale' has an invalid value" }]
            }),
        )
    })
    .await;

    let err = get_page_data(&mock.client(), &de()).await.unwrap_err();
    assert!(matches!(err.source, HygraphError::GraphQL(_)));
}

#[tokio::test]
async fn test_page_data_route() {
    let mock = MockHygraph::with_data(page_data_fixture()).await;
    let base = mock.spawn_storefront().await;

    let response = reqwest::get(format!("{base}/api/page-data/de")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["footer"]["categories"].as_array().unwrap().len(), 4);
    assert_eq!(body["navigation"]["pages"][0]["type"], "Category");
    assert_eq!(body["navigation"]["pages"][1]["type"], "Collection");
    assert_eq!(
        body["navigation"]["pages"][1]["description"],
        "Collection 9 description"
    );
    assert!(body["navigation"]["pages"][0].get("description").is_none());
}

#[tokio::test]
async fn test_page_data_route_upstream_failure() {
    let mock = MockHygraph::start(|_| {
        (axum::http::StatusCode::INTERNAL_SERVER_ERROR, json!({}))
    })
    .await;
    let base = mock.spawn_storefront().await;

    let response = reqwest::get(format!("{base}/api/page-data/en")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    assert_eq!(response.text().await.unwrap(), "External service error");
}

#[tokio::test]
async fn test_page_data_malformed_body_is_parse_error() {
    let mock = MockHygraph::start(|_| {
        (
            axum::http::StatusCode::OK,
            json!({ "data": { "footerCategories": 5 } }),
        )
    })
    .await;

    let err = get_page_data(&mock.client(), &de()).await.unwrap_err();
    assert!(matches!(err.source, HygraphError::Parse(_)));
}

#[tokio::test]
async fn test_page_data_without_data_is_graphql_error() {
    let mock = MockHygraph::start(|_| (axum::http::StatusCode::OK, json!({}))).await;

    let err = get_page_data(&mock.client(), &de()).await.unwrap_err();
    match err.source {
        HygraphError::GraphQL(errors) => assert_eq!(errors[0].message, "No data in response"),
        other => panic!("unexpected error: {other:?}"),
    }
}
