//! Integration tests for `CatalogClient` using wiremock HTTP mocks.

use adboard_catalog::{CatalogClient, CatalogError};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> CatalogClient {
    CatalogClient::with_base_url(30, "adboard-test/0.1", 0, 0, base_url)
        .expect("client construction should not fail")
}

fn item_json(id: i64, title: &str, price: f64, brand: Option<&str>) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "title": title,
        "description": format!("{title} description"),
        "price": price,
        "discountPercentage": 5.5,
        "rating": 4.2,
        "stock": 20,
        "brand": brand,
        "category": "electronics",
        "thumbnail": "https://cdn.example/thumb.jpg",
        "images": ["https://cdn.example/1.jpg"],
        "availabilityStatus": "In Stock"
    })
}

#[tokio::test]
async fn fetch_page_passes_limit_and_skip() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "products": [item_json(10, "Monitor", 199.0, Some("Viewix"))],
        "total": 100,
        "skip": 18,
        "limit": 9
    });

    Mock::given(method("GET"))
        .and(path("/products"))
        .and(query_param("limit", "9"))
        .and(query_param("skip", "18"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let envelope = client.fetch_page(9, 18).await.expect("should parse page");

    assert_eq!(envelope.products.len(), 1);
    assert_eq!(envelope.products[0].id, 10);
    assert_eq!(envelope.total, 100);
    assert_eq!(envelope.skip, 18);
}

#[tokio::test]
async fn fetch_by_category_uses_category_path() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "products": [item_json(3, "Desk", 80.0, Some("Oakly"))],
        "total": 12,
        "skip": 0,
        "limit": 9
    });

    Mock::given(method("GET"))
        .and(path("/products/category/furniture"))
        .and(query_param("limit", "9"))
        .and(query_param("skip", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let envelope = client
        .fetch_by_category("furniture", 9, 0)
        .await
        .expect("should parse category page");

    assert_eq!(envelope.total, 12);
    assert_eq!(envelope.products[0].title, "Desk");
}

#[tokio::test]
async fn fetch_search_sends_query_param() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "products": [item_json(7, "Desk Lamp", 25.0, Some("Lumo"))],
        "total": 4,
        "skip": 0,
        "limit": 9
    });

    Mock::given(method("GET"))
        .and(path("/products/search"))
        .and(query_param("q", "lamp"))
        .and(query_param("limit", "9"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let envelope = client
        .fetch_search("lamp", 9, 0)
        .await
        .expect("should parse search page");

    assert_eq!(envelope.total, 4);
}

#[tokio::test]
async fn fetch_all_uses_limit_zero_sentinel() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "products": [
            item_json(1, "A", 1.0, Some("X")),
            item_json(2, "B", 2.0, Some("Y"))
        ],
        "total": 2,
        "skip": 0,
        "limit": 2
    });

    Mock::given(method("GET"))
        .and(path("/products"))
        .and(query_param("limit", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let envelope = client.fetch_all().await.expect("should parse full catalog");
    assert_eq!(envelope.products.len(), 2);
}

#[tokio::test]
async fn get_item_parses_bare_object() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/products/42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(item_json(
            42,
            "Keyboard",
            49.0,
            Some("Clacky"),
        )))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let item = client.get_item(42).await.expect("should parse item");
    assert_eq!(item.id, 42);
    assert_eq!(item.brand.as_deref(), Some("Clacky"));
}

#[tokio::test]
async fn categories_parses_bare_array() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/products/category-list"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!(["electronics", "furniture", "groceries"])),
        )
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let categories = client.categories().await.expect("should parse categories");
    assert_eq!(categories, vec!["electronics", "furniture", "groceries"]);
}

#[tokio::test]
async fn brands_are_unique_sorted_and_skip_unbranded() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "products": [
            item_json(1, "A", 1.0, Some("Lumo")),
            item_json(2, "B", 2.0, Some("Acme")),
            item_json(3, "C", 3.0, None),
            item_json(4, "D", 4.0, Some("Lumo")),
            item_json(5, "E", 5.0, Some(""))
        ],
        "total": 5,
        "skip": 0,
        "limit": 5
    });

    Mock::given(method("GET"))
        .and(path("/products"))
        .and(query_param("limit", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let brands = client.brands().await.expect("should derive brands");
    assert_eq!(brands, vec!["Acme", "Lumo"]);
}

#[tokio::test]
async fn non_success_status_is_an_http_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/products/999"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let result = client.get_item(999).await;
    assert!(matches!(result, Err(CatalogError::Http(_))));
}

#[tokio::test]
async fn malformed_body_is_a_deserialize_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/products"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let result = client.fetch_page(9, 0).await;
    let err = result.expect_err("malformed body must fail");
    assert!(matches!(err, CatalogError::Deserialize { .. }), "got: {err}");
}

#[tokio::test]
async fn server_errors_are_retried() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/products"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(1)
        .mount(&server)
        .await;

    let body = serde_json::json!({
        "products": [item_json(1, "A", 1.0, Some("X"))],
        "total": 1,
        "skip": 0,
        "limit": 9
    });
    Mock::given(method("GET"))
        .and(path("/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    // 2 retries, zero backoff base so the test does not sleep.
    let client = CatalogClient::with_base_url(30, "adboard-test/0.1", 2, 0, &server.uri())
        .expect("client construction should not fail");
    let envelope = client
        .fetch_page(9, 0)
        .await
        .expect("should succeed after retry");
    assert_eq!(envelope.total, 1);
}
