//! Handler tests for the Products domain
//!
//! These drive `handlers::router` with in-memory stores:
//! - request deserialization and defaults
//! - response bodies and status codes
//! - error bodies for missing products and malformed input

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use domain_products::*;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt; // For oneshot()

async fn json_body<T: serde::de::DeserializeOwned>(body: Body) -> T {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn test_app() -> (Router, Arc<InMemoryProductQueue>) {
    let queue = Arc::new(InMemoryProductQueue::new());
    let service = ProductService::new(InMemoryProductRepository::new(), queue.clone());
    (handlers::router(service), queue)
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn test_widget_lifecycle() {
    let (app, _queue) = test_app();

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/products/",
            json!({"name": "Widget", "price": 9.99}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let created: Product = json_body(response.into_body()).await;
    assert_eq!(created.name, "Widget");
    assert_eq!(created.price, 9.99);
    assert_eq!(created.quantity, Some(1));
    assert_eq!(created.description, "blah blah blah");

    let uri = format!("/products/{}", created.id);

    let response = app.clone().oneshot(empty_request("GET", &uri)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let fetched: Product = json_body(response.into_body()).await;
    assert_eq!(fetched, created);

    let response = app.clone().oneshot(empty_request("DELETE", &uri)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let deleted: Product = json_body(response.into_body()).await;
    assert_eq!(deleted, created);

    let response = app.oneshot(empty_request("GET", &uri)).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["message"], "Product not found");
    assert_eq!(body["error"], "NOT_FOUND");
}

#[tokio::test]
async fn test_create_with_empty_body_uses_defaults() {
    let (app, _queue) = test_app();

    let response = app
        .oneshot(json_request("POST", "/products", json!({})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let created: Product = json_body(response.into_body()).await;
    assert_eq!(created.name, "test item");
    assert_eq!(created.price, 0.0);
    assert_eq!(created.sku, None);
    assert_eq!(
        created.image.as_deref(),
        Some("https://i1.wp.com/gelatologia.com/wp-content/uploads/2020/07/placeholder.png")
    );
}

#[tokio::test]
async fn test_create_enqueues_product_id() {
    let (app, queue) = test_app();

    let response = app
        .oneshot(json_request("POST", "/products/", json!({"name": "Queued"})))
        .await
        .unwrap();
    let created: Product = json_body(response.into_body()).await;

    let popped = queue.pop(Duration::from_secs(1)).await.unwrap();
    assert_eq!(popped, Some(created.id));
}

#[tokio::test]
async fn test_update_changes_only_supplied_fields() {
    let (app, _queue) = test_app();

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/products/",
            json!({"name": "Test Product", "price": 10.99, "sku": 555}),
        ))
        .await
        .unwrap();
    let created: Product = json_body(response.into_body()).await;

    let response = app
        .oneshot(json_request(
            "PUT",
            &format!("/products/{}", created.id),
            json!({"name": "Updated Product", "sku": null}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let updated: Product = json_body(response.into_body()).await;
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.name, "Updated Product");
    assert_eq!(updated.sku, None);
    assert_eq!(updated.price, 10.99);
    assert_eq!(updated.quantity, created.quantity);
    assert_eq!(updated.created_at, created.created_at);
}

#[tokio::test]
async fn test_update_and_delete_missing_return_404() {
    let (app, _queue) = test_app();

    let response = app
        .clone()
        .oneshot(json_request("PUT", "/products/404", json!({"name": "x"})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app.oneshot(empty_request("DELETE", "/products/404")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_get_ignores_q_parameter() {
    let (app, _queue) = test_app();

    let response = app
        .clone()
        .oneshot(json_request("POST", "/products/", json!({})))
        .await
        .unwrap();
    let created: Product = json_body(response.into_body()).await;

    let response = app
        .oneshot(empty_request(
            "GET",
            &format!("/products/{}?q=anything", created.id),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_list_filters_by_created_at() {
    let (app, _queue) = test_app();

    for (name, created_at) in [
        ("old", "2023-06-01T00:00:00Z"),
        ("mid", "2024-01-15T12:00:00Z"),
        ("new", "2025-03-01T00:00:00Z"),
    ] {
        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/products/",
                json!({"name": name, "created_at": created_at}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = app
        .clone()
        .oneshot(empty_request("GET", "/products/"))
        .await
        .unwrap();
    let all: Vec<Product> = json_body(response.into_body()).await;
    let names: Vec<&str> = all.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["old", "mid", "new"]);

    let response = app
        .clone()
        .oneshot(empty_request(
            "GET",
            "/products/?start_date=2024-01-01&end_date=2024-12-31T23:59:59Z",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let filtered: Vec<Product> = json_body(response.into_body()).await;
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].name, "mid");

    let response = app
        .oneshot(empty_request("GET", "/products?end_date=2024-01-15T12:00:00"))
        .await
        .unwrap();
    let until_mid: Vec<Product> = json_body(response.into_body()).await;
    assert_eq!(until_mid.len(), 2);
}

#[tokio::test]
async fn test_list_rejects_unparsable_date() {
    let (app, _queue) = test_app();

    let response = app
        .oneshot(empty_request("GET", "/products/?start_date=last-week"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["error"], "INVALID_QUERY");
}

#[tokio::test]
async fn test_non_integer_id_is_bad_request() {
    let (app, _queue) = test_app();

    let response = app.oneshot(empty_request("GET", "/products/abc")).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["error"], "INVALID_PATH_PARAM");
}

#[tokio::test]
async fn test_create_with_wrong_field_type_is_unprocessable() {
    let (app, _queue) = test_app();

    let response = app
        .oneshot(json_request("POST", "/products/", json!({"price": "free"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}
