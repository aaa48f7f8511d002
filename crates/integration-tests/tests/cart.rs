//! Integration tests for the cart flow.

#![allow(clippy::unwrap_used)]

use hygraph_storefront_integration_tests::{MockHygraph, product_fixture};
use reqwest::{Client, StatusCode};
use serde_json::{Value, json};

async fn create_cart(client: &Client, base: &str) -> String {
    let response = client.post(format!("{base}/cart")).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let body: Value = response.json().await.unwrap();
    body["id"].as_str().unwrap().to_string()
}

async fn add_item(client: &Client, base: &str, cart: &str, body: &Value) -> (StatusCode, Value) {
    let response = client
        .post(format!("{base}/cart/{cart}/items"))
        .json(body)
        .send()
        .await
        .unwrap();
    let status = response.status();
    let body = response.json().await.unwrap_or(Value::Null);
    (status, body)
}

#[tokio::test]
async fn test_add_selected_variant_to_cart() {
    let mock = MockHygraph::with_data(product_fixture()).await;
    let base = mock.spawn_storefront().await;
    let client = Client::new();
    let cart = create_cart(&client, &base).await;

    let (status, body) = add_item(
        &client,
        &base,
        &cart,
        &json!({ "slug": "unisex-tee", "variantId": "var-l", "quantity": 2, "locale": "de" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["totalItems"], 2);
    assert_eq!(body["totalUniqueItems"], 1);
    assert_eq!(body["cartTotal"], 5000);
    assert_eq!(body["formattedTotal"], "$50.00");

    let line = &body["lines"][0];
    assert_eq!(line["id"], "var-l");
    assert_eq!(line["productId"], "prod1");
    assert_eq!(line["price"], 2500);
    assert_eq!(line["quantity"], 2);
    assert_eq!(line["image"]["url"], "https://media.graphassets.com/tee-front");
    assert_eq!(line["en"]["name"], "Unisex Tee");
    assert_eq!(line["de"]["name"], "Unisex T-Shirt");
}

#[tokio::test]
async fn test_adding_same_variant_merges_lines() {
    let mock = MockHygraph::with_data(product_fixture()).await;
    let base = mock.spawn_storefront().await;
    let client = Client::new();
    let cart = create_cart(&client, &base).await;

    add_item(&client, &base, &cart, &json!({ "slug": "unisex-tee" })).await;
    let (_, body) = add_item(
        &client,
        &base,
        &cart,
        &json!({ "slug": "unisex-tee", "variantId": "var-s", "quantity": 3 }),
    )
    .await;

    assert_eq!(body["totalUniqueItems"], 1);
    assert_eq!(body["lines"][0]["quantity"], 4);

    let shown: Value = client
        .get(format!("{base}/cart/{cart}?currency=EUR"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(shown["formattedTotal"], "€100.00");
}

#[tokio::test]
async fn test_unknown_variant_is_rejected() {
    let mock = MockHygraph::with_data(product_fixture()).await;
    let base = mock.spawn_storefront().await;
    let client = Client::new();
    let cart = create_cart(&client, &base).await;

    let (status, _) = add_item(
        &client,
        &base,
        &cart,
        &json!({ "slug": "unisex-tee", "variantId": "var-xl" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let shown: Value = client
        .get(format!("{base}/cart/{cart}"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(shown["lines"], json!([]));
}

#[tokio::test]
async fn test_concurrent_adds_are_not_lost() {
    let mock = MockHygraph::with_data(product_fixture()).await;
    let base = mock.spawn_storefront().await;
    let client = Client::new();
    let cart = create_cart(&client, &base).await;

    let adds = (0..8).map(|_| {
        let client = client.clone();
        let base = base.clone();
        let cart = cart.clone();
        tokio::spawn(async move {
            add_item(&client, &base, &cart, &json!({ "slug": "unisex-tee" })).await
        })
    });
    for add in adds.collect::<Vec<_>>() {
        let (status, _) = add.await.unwrap();
        assert_eq!(status, StatusCode::OK);
    }

    let shown: Value = client
        .get(format!("{base}/cart/{cart}"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(shown["totalItems"], 8);
}

#[tokio::test]
async fn test_remove_line_from_cart() {
    let mock = MockHygraph::with_data(product_fixture()).await;
    let base = mock.spawn_storefront().await;
    let client = Client::new();
    let cart = create_cart(&client, &base).await;

    add_item(&client, &base, &cart, &json!({ "slug": "unisex-tee", "quantity": 2 })).await;
    add_item(
        &client,
        &base,
        &cart,
        &json!({ "slug": "unisex-tee", "variantId": "var-l" }),
    )
    .await;

    let response = client
        .delete(format!("{base}/cart/{cart}/items/var-s"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["totalUniqueItems"], 1);
    assert_eq!(body["lines"][0]["id"], "var-l");
    assert_eq!(body["formattedTotal"], "$25.00");

    let response = client
        .delete(format!("{base}/cart/{cart}/items/var-s"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
