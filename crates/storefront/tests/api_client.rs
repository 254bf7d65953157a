//! Integration tests for `ShopClient` using wiremock HTTP mocks.

use std::time::Duration;

use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use bosanoga_core::{OrderOwner, OrderRequest, Phone, Price, ProductId};
use bosanoga_storefront::api::{ApiError, ItemsQuery, ShopClient};

fn test_client(base_url: &str) -> ShopClient {
    ShopClient::with_base_url(base_url, Duration::from_secs(5))
        .expect("client construction should not fail")
}

#[tokio::test]
async fn top_sales_returns_parsed_items() {
    let server = MockServer::start().await;

    let body = serde_json::json!([
        { "id": 1, "title": "Босоножки 'MYER'", "price": 34000, "images": ["https://shop.example/1.jpg"] },
        { "id": 2, "title": "Босоножки 'Keira'", "price": 7600, "images": [] }
    ]);

    Mock::given(method("GET"))
        .and(path("/api/top-sales"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let items = test_client(&server.uri())
        .top_sales()
        .await
        .expect("should parse top sales");

    assert_eq!(items.len(), 2);
    assert_eq!(items[0].id, ProductId::new(1));
    assert_eq!(items[0].price, Price::new(34000));
    assert!(items[1].images.is_empty());
}

#[tokio::test]
async fn items_sends_both_filters_and_the_offset() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/items"))
        .and(query_param("categoryId", "3"))
        .and(query_param("offset", "6"))
        .and(query_param("q", "кеды"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&server)
        .await;

    let query = ItemsQuery {
        category: Some(3.into()),
        offset: 6,
        search: Some("кеды".to_string()),
    };
    let page = test_client(&server.uri())
        .items(&query)
        .await
        .expect("should parse empty page");
    assert!(page.is_empty());
}

#[tokio::test]
async fn items_always_sends_offset_even_when_zero() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/items"))
        .and(query_param("offset", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .expect(1)
        .mount(&server)
        .await;

    test_client(&server.uri())
        .items(&ItemsQuery::default())
        .await
        .expect("should succeed");
}

#[tokio::test]
async fn item_parses_the_full_product_card() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "id": 22,
        "category": 4,
        "title": "Туфли женские 'Glamour'",
        "price": 16700,
        "images": ["https://shop.example/22.jpg"],
        "sku": "GL22",
        "manufacturer": "Glamour",
        "color": "Белый",
        "sizes": [
            { "size": "36 US", "available": true },
            { "size": "37 US", "available": false }
        ]
    });

    Mock::given(method("GET"))
        .and(path("/api/items/22"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let detail = test_client(&server.uri())
        .item(ProductId::new(22))
        .await
        .expect("should parse product detail");

    assert_eq!(detail.title, "Туфли женские 'Glamour'");
    assert_eq!(detail.sku.as_deref(), Some("GL22"));
    assert_eq!(detail.material, None);
    assert_eq!(detail.available_sizes().count(), 1);
}

#[tokio::test]
async fn item_404_maps_to_the_specific_not_found_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/items/99"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = test_client(&server.uri())
        .item(ProductId::new(99))
        .await
        .expect_err("should be an error");

    assert!(matches!(err, ApiError::NotFound(id) if id == ProductId::new(99)));
    assert_eq!(err.to_string(), "item 99 not found");
}

#[tokio::test]
async fn non_success_status_is_a_display_ready_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/categories"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let err = test_client(&server.uri())
        .categories()
        .await
        .expect_err("should be an error");

    assert_eq!(err.to_string(), "loading categories failed: HTTP 502");
}

fn sample_order() -> OrderRequest {
    let owner = OrderOwner {
        phone: Phone::parse("+79991234567").expect("valid phone"),
        address: "Москва, ул. Ленина, 1".to_string(),
    };
    OrderRequest::from_lines(owner, &[])
}

#[tokio::test]
async fn submit_order_posts_the_wire_shape() {
    let server = MockServer::start().await;
    let order = sample_order();

    Mock::given(method("POST"))
        .and(path("/api/order"))
        .and(body_json(&order))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let response = test_client(&server.uri())
        .submit_order(&order)
        .await
        .expect("204 is a success");
    assert!(response.is_none());
}

#[tokio::test]
async fn submit_order_success_is_decided_by_status_not_body() {
    let server = MockServer::start().await;
    let client = test_client(&server.uri());
    let order = sample_order();

    // Empty body on a 200.
    Mock::given(method("POST"))
        .and(path("/api/order"))
        .respond_with(ResponseTemplate::new(200))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    assert!(client.submit_order(&order).await.expect("success").is_none());

    // Non-JSON body on a 200 is still a success.
    Mock::given(method("POST"))
        .and(path("/api/order"))
        .respond_with(ResponseTemplate::new(200).set_body_string("created"))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    assert!(client.submit_order(&order).await.expect("success").is_none());

    // A JSON body is parsed when present.
    Mock::given(method("POST"))
        .and(path("/api/order"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "id": 981 })))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    let response = client.submit_order(&order).await.expect("success");
    assert_eq!(response.and_then(|r| r.id), Some(981));
}

#[tokio::test]
async fn submit_order_surfaces_server_failures() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/order"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = test_client(&server.uri())
        .submit_order(&sample_order())
        .await
        .expect_err("should be an error");
    assert_eq!(err.to_string(), "submitting order failed: HTTP 500");
}
