//! HTTP-level tests for the catalog routes
//!
//! Every test builds a router over an in-memory record store and drives it
//! through `axum-test`: JSON → HTTP request → handler → CatalogService →
//! HTTP response → JSON.

use axum::http::StatusCode;
use axum_test::TestServer;
use catalog::prelude::*;
use serde_json::{Value, json};

fn record(id: &str, category: &str, price: f64, rating: f64, created_at: &str) -> Record {
    let mut r = Record::new(id);
    r.name = Some(format!("Item {id}"));
    r.category = Some(category.to_string());
    r.vendor = Some("Globex".to_string());
    r.price = Some(price);
    r.rating = Some(rating);
    r.created_at = Some(created_at.to_string());
    r
}

fn make_server(records: Vec<Record>) -> (TestServer, Arc<InMemorySnapshotStore>) {
    let snapshots = Arc::new(InMemorySnapshotStore::new());
    let store = Arc::new(RecordStore::with_records(records, snapshots.clone()));
    let app = ServerBuilder::new().with_store(store).build().unwrap();
    (TestServer::new(app).unwrap(), snapshots)
}

fn three_priced() -> Vec<Record> {
    vec![
        record("a", "toys", 10.0, 3.0, "2024-01-01T00:00:00Z"),
        record("b", "toys", 20.0, 4.0, "2024-01-02T00:00:00Z"),
        record("c", "home", 30.0, 5.0, "2024-01-03T00:00:00Z"),
    ]
}

fn ids(body: &Value, key: &str) -> Vec<String> {
    body[key]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v["id"].as_str().unwrap().to_string())
        .collect()
}

// =============================================================================
// Create
// =============================================================================

#[tokio::test]
async fn test_create_luxury_item() {
    let (server, snapshots) = make_server(Vec::new());

    let response = server
        .post("/items")
        .json(&json!({"name": "A", "category": "luxury", "price": 1200}))
        .await;

    response.assert_status(StatusCode::CREATED);
    let body: Value = response.json();
    assert_eq!(body["price"], 1200.0);
    assert!(body["rating"].as_f64().unwrap() >= 4.0);
    assert!(body["tags"].as_array().unwrap().contains(&json!("luxury")));

    let id = body["id"].as_str().unwrap();
    uuid::Uuid::parse_str(id).unwrap();
    assert_eq!(
        response.header("location").to_str().unwrap(),
        format!("/items/{id}")
    );
    assert_eq!(snapshots.persist_count(), 1);
}

#[tokio::test]
async fn test_create_duplicate_id_conflicts() {
    let (server, snapshots) = make_server(three_priced());

    let response = server
        .post("/items")
        .json(&json!({"id": "a", "name": "Dup", "category": "toys", "price": 1}))
        .await;

    response.assert_status(StatusCode::CONFLICT);
    let body: Value = response.json();
    assert_eq!(body["error"]["status"], 409);
    assert_eq!(snapshots.persist_count(), 0);

    let list: Value = server.get("/items").await.json();
    assert_eq!(list["meta"]["total"], 3);
}

#[tokio::test]
async fn test_create_rejects_invalid_bodies() {
    let (server, snapshots) = make_server(Vec::new());

    let response = server.post("/items").text("not json").await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"]["message"], "Invalid or missing JSON body.");

    let response = server
        .post("/items")
        .json(&json!({"name": "A", "category": "toys"}))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");

    assert_eq!(snapshots.persist_count(), 0);
}

// =============================================================================
// Get
// =============================================================================

#[tokio::test]
async fn test_get_with_projection() {
    let (server, _) = make_server(three_priced());

    let response = server
        .get("/items/b")
        .add_query_param("fields", "name,price,password")
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body, json!({"name": "Item b", "price": 20.0}));
}

#[tokio::test]
async fn test_get_unknown_is_404() {
    let (server, _) = make_server(three_priced());

    let response = server.get("/items/nope").await;
    response.assert_status(StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "NOT_FOUND");
    assert!(body["error"]["timestamp"].is_string());
}

// =============================================================================
// List
// =============================================================================

#[tokio::test]
async fn test_list_min_price_with_stats() {
    let (server, _) = make_server(three_priced());

    let response = server
        .get("/items")
        .add_query_param("min_price", "15")
        .add_query_param("include_stats", "true")
        .await;

    response.assert_status_ok();
    assert_eq!(response.header("x-total-count").to_str().unwrap(), "2");
    let body: Value = response.json();
    assert_eq!(body["meta"]["mode"], "page");
    assert_eq!(body["meta"]["total"], 2);
    assert_eq!(body["meta"]["stats_over_filtered"]["avg_price"], 25.0);
    assert_eq!(body["meta"]["stats_over_page"]["count"], 2);
}

#[tokio::test]
async fn test_list_default_order_is_newest_first() {
    let (server, _) = make_server(three_priced());

    let body: Value = server.get("/items").await.json();
    assert_eq!(ids(&body, "data"), vec!["c", "b", "a"]);
    assert!(body["meta"].get("stats_over_page").is_none());
}

#[tokio::test]
async fn test_list_page_mode() {
    let records = (0..5)
        .map(|i| record(&format!("r{i}"), "toys", 1.0, 1.0, "2024-01-01T00:00:00Z"))
        .collect();
    let (server, _) = make_server(records);

    let body: Value = server
        .get("/items")
        .add_query_param("page", "2")
        .add_query_param("page_size", "2")
        .await
        .json();

    assert_eq!(body["meta"]["returned"], 2);
    assert_eq!(body["meta"]["pages"], 3);
    assert_eq!(body["meta"]["has_next"], true);
    assert_eq!(body["meta"]["has_prev"], true);
}

#[tokio::test]
async fn test_list_offset_mode_and_malformed_values() {
    let (server, _) = make_server(three_priced());

    let body: Value = server
        .get("/items")
        .add_query_param("offset", "2")
        .add_query_param("limit", "5")
        .add_query_param("sort_by", "price")
        .await
        .json();
    assert_eq!(body["meta"]["mode"], "offset");
    assert_eq!(body["meta"]["returned"], 1);
    assert_eq!(body["meta"]["has_more"], false);
    assert_eq!(ids(&body, "data"), vec!["c"]);

    let response = server
        .get("/items")
        .add_query_param("offset", "two")
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["meta"]["offset"], 0);
    assert_eq!(body["meta"]["limit"], 50);
}

#[tokio::test]
async fn test_list_repeated_tags_and_free_text() {
    let mut tagged = record("t", "toys", 5.0, 2.0, "2024-01-01T00:00:00Z");
    tagged.tags = vec!["pro".to_string(), "lite".to_string()];
    let mut half = record("h", "toys", 5.0, 2.0, "2024-01-01T00:00:00Z");
    half.tags = vec!["pro".to_string()];
    let (server, _) = make_server(vec![tagged, half]);

    let body: Value = server
        .get("/items")
        .add_query_param("tag", "pro")
        .add_query_param("tag", "lite")
        .await
        .json();
    assert_eq!(ids(&body, "data"), vec!["t"]);

    let body: Value = server.get("/items").add_query_param("q", "LIT").await.json();
    assert_eq!(ids(&body, "data"), vec!["t"]);
}

#[tokio::test]
async fn test_list_vendor_and_min_rating() {
    let mut records = three_priced();
    records[2].vendor = Some("Initech".to_string());
    let (server, _) = make_server(records);

    let body: Value = server
        .get("/items")
        .add_query_param("vendor", "Globex")
        .add_query_param("min_rating", "4")
        .await
        .json();
    assert_eq!(ids(&body, "data"), vec!["b"]);
}

#[tokio::test]
async fn test_list_huge_offset_is_empty() {
    let (server, _) = make_server(three_priced());

    let body: Value = server
        .get("/items")
        .add_query_param("offset", "99999999999999999999")
        .await
        .json();
    assert_eq!(body["meta"]["total"], 3);
    assert_eq!(body["meta"]["returned"], 0);
    assert_eq!(body["data"], json!([]));
}

#[tokio::test]
async fn test_list_by_category() {
    let (server, _) = make_server(three_priced());

    let response = server
        .get("/categories/toys/items")
        .add_query_param("category", "home")
        .add_query_param("sort_by", "-price")
        .await;

    response.assert_status_ok();
    assert_eq!(response.header("x-total-count").to_str().unwrap(), "2");
    let body: Value = response.json();
    assert_eq!(ids(&body, "data"), vec!["b", "a"]);
}

#[tokio::test]
async fn test_list_by_price_range() {
    let (server, _) = make_server(three_priced());

    let body: Value = server
        .get("/items/price/15/30")
        .add_query_param("fields", "id")
        .await
        .json();
    assert_eq!(body["meta"]["total"], 2);
    assert_eq!(body["data"], json!([{"id": "c"}, {"id": "b"}]));

    let response = server.get("/items/price/low/30").await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

// =============================================================================
// Related
// =============================================================================

#[tokio::test]
async fn test_related_items() {
    let mut records = three_priced();
    records.push(record("d", "toys", 15.0, 4.0, "2024-01-04T00:00:00Z"));
    let (server, _) = make_server(records);

    let body: Value = server.get("/items/a/related").await.json();
    assert_eq!(body["base_item"], json!({"id": "a", "category": "toys"}));
    // rating desc, then price asc
    assert_eq!(ids(&body, "related"), vec!["d", "b"]);

    let body: Value = server
        .get("/items/a/related")
        .add_query_param("limit", "1")
        .add_query_param("sort_by", "-price")
        .await
        .json();
    assert_eq!(ids(&body, "related"), vec!["b"]);
}

#[tokio::test]
async fn test_related_unknown_is_404() {
    let (server, _) = make_server(three_priced());
    server
        .get("/items/nope/related")
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

// =============================================================================
// Health
// =============================================================================

#[tokio::test]
async fn test_health() {
    let (server, _) = make_server(Vec::new());
    let body: Value = server.get("/health").await.json();
    assert_eq!(body["status"], "ok");
    server.get("/healthz").await.assert_status_ok();
}
