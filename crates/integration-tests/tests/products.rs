//! Integration tests for product pages and cards.

#![allow(clippy::unwrap_used)]

use hygraph_storefront::hygraph::HygraphError;
use hygraph_storefront_core::Locale;
use hygraph_storefront_integration_tests::{MockHygraph, product_fixture};
use reqwest::StatusCode;
use serde_json::{Value, json};

async fn get_json(url: &str) -> (StatusCode, Value) {
    let response = reqwest::get(url).await.unwrap();
    let status = response.status();
    let body = response.json().await.unwrap_or(Value::Null);
    (status, body)
}

#[tokio::test]
async fn test_product_page_defaults_to_first_variant() {
    let mock = MockHygraph::with_data(product_fixture()).await;
    let base = mock.spawn_storefront().await;

    let (status, page) = get_json(&format!("{base}/products/unisex-tee")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["activeVariantId"], "var-s");
    assert_eq!(page["url"], "/products/unisex-tee?variantId=var-s");
    assert_eq!(page["price"], "$25.00");
    assert_eq!(page["quantity"], 1);
    assert_eq!(page["quantityOptions"], json!([1, 2, 3, 4, 5]));
    assert_eq!(page["hasVariantChoice"], true);
    assert_eq!(page["variants"].as_array().unwrap().len(), 2);
    assert_eq!(
        page["primaryImage"]["url"],
        "https://media.graphassets.com/tee-front"
    );
}

#[tokio::test]
async fn test_product_page_uses_requested_variant() {
    let mock = MockHygraph::with_data(product_fixture()).await;
    let base = mock.spawn_storefront().await;

    let (_, page) = get_json(&format!(
        "{base}/products/unisex-tee?variantId=var-l&currency=EUR&locale=de"
    ))
    .await;

    assert_eq!(page["activeVariantId"], "var-l");
    assert_eq!(page["url"], "/products/unisex-tee?variantId=var-l");
    assert_eq!(page["price"], "€25.00");
    assert_eq!(page["variants"][1]["selected"], true);
    assert_eq!(page["variants"][0]["selected"], false);

    let request = &mock.requests()[0];
    assert_eq!(request.operation_name(), Some("ProductPageQuery"));
    assert_eq!(
        request.body["variables"],
        json!({ "locale": "de", "slug": "unisex-tee" })
    );
}

#[tokio::test]
async fn test_product_page_unknown_variant_falls_back() {
    let mock = MockHygraph::with_data(product_fixture()).await;
    let base = mock.spawn_storefront().await;

    let (status, page) =
        get_json(&format!("{base}/products/unisex-tee?variantId=missing")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["activeVariantId"], "var-s");
}

#[tokio::test]
async fn test_missing_product_is_not_found() {
    let mock = MockHygraph::with_data(json!({ "product": null })).await;
    let base = mock.spawn_storefront().await;

    let (status, _) = get_json(&format!("{base}/products/nope")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_product_without_variants_is_rejected() {
    let mut fixture = product_fixture();
    fixture["product"]["variants"] = json!([{}]);
    let mock = MockHygraph::with_data(fixture).await;

    let err = mock
        .client()
        .get_product_by_slug("unisex-tee", &Locale::fallback())
        .await
        .unwrap_err();
    assert!(matches!(err, HygraphError::InvalidProduct(_)));

    let base = mock.spawn_storefront().await;
    let (status, _) = get_json(&format!("{base}/products/unisex-tee")).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn test_products_are_cached_per_locale() {
    let mock = MockHygraph::with_data(product_fixture()).await;
    let client = mock.client();
    let en = Locale::fallback();
    let de = Locale::parse("de").unwrap();

    client.get_product_by_slug("unisex-tee", &en).await.unwrap();
    client.get_product_by_slug("unisex-tee", &en).await.unwrap();
    assert_eq!(mock.count("ProductPageQuery"), 1);

    client.get_product_by_slug("unisex-tee", &de).await.unwrap();
    assert_eq!(mock.count("ProductPageQuery"), 2);

    client.invalidate_product("unisex-tee").await;
    client.get_product_by_slug("unisex-tee", &en).await.unwrap();
    assert_eq!(mock.count("ProductPageQuery"), 3);

    client.invalidate_all().await;
    client.get_product_by_slug("unisex-tee", &de).await.unwrap();
    assert_eq!(mock.count("ProductPageQuery"), 4);
}

#[tokio::test]
async fn test_product_card_fragment() {
    let mock = MockHygraph::with_data(product_fixture()).await;
    let base = mock.spawn_storefront().await;

    let response = reqwest::get(format!("{base}/products/unisex-tee/card?currency=GBP"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(
        response.headers()["content-type"]
            .to_str()
            .unwrap()
            .starts_with("text/html")
    );

    let html = response.text().await.unwrap();
    assert!(html.contains(r#"href="/products/unisex-tee""#));
    assert!(html.contains(r#"src="https://media.graphassets.com/tee-front""#));
    assert!(html.contains(r#"height="800""#));
    assert!(html.contains("£25.00"));
}
