//! Handler tests for Products domain
//!
//! These run against the in-memory repository, exercising the full
//! handler → service → repository path without a database.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use domain_products::*;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt; // For oneshot()

fn app() -> Router {
    let repository = InMemoryProductRepository::new();
    let service = ProductService::new(repository);
    handlers::router(service)
}

async fn json_body(body: Body) -> Value {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn post_product(body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/")
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

#[tokio::test]
async fn test_create_product_returns_201_with_envelope() {
    let app = app();

    let response = app
        .oneshot(post_product(json!({
            "name": "Widget",
            "description": "A fine widget",
            "price": 9.99,
            "stock": 5
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);

    let body = json_body(response.into_body()).await;
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["message"], json!("Product created successfully"));
    assert_eq!(body["data"]["id"], json!(1));
    assert_eq!(body["data"]["name"], json!("Widget"));
    assert_eq!(body["data"]["price"], json!(9.99));
    assert_eq!(body["data"]["stock"], json!(5));
}

#[tokio::test]
async fn test_create_product_defaults_stock_to_zero() {
    let app = app();

    let response = app
        .oneshot(post_product(json!({
            "name": "Widget",
            "price": 9.99
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);

    let body = json_body(response.into_body()).await;
    assert_eq!(body["data"]["stock"], json!(0));
    assert_eq!(body["data"]["description"], json!(null));
}

#[tokio::test]
async fn test_create_product_accepts_zero_price() {
    let app = app();

    let response = app
        .oneshot(post_product(json!({
            "name": "Freebie",
            "price": 0.0
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn test_create_product_rejects_negative_price() {
    let app = app();

    let response = app
        .oneshot(post_product(json!({
            "name": "Widget",
            "price": -1.0
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = json_body(response.into_body()).await;
    assert_eq!(body["success"], json!(false));
    assert!(body["message"].as_str().unwrap().contains("price"));
}

#[tokio::test]
async fn test_create_product_rejects_negative_stock() {
    let app = app();

    let response = app
        .oneshot(post_product(json!({
            "name": "Widget",
            "price": 9.99,
            "stock": -1
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_product_rejects_missing_price_with_400() {
    let app = app();

    let response = app
        .oneshot(post_product(json!({
            "name": "Widget"
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = json_body(response.into_body()).await;
    assert_eq!(body["success"], json!(false));
    assert!(body["message"].as_str().unwrap().contains("price"));
}

#[tokio::test]
async fn test_create_product_rejects_missing_name_with_400() {
    let app = app();

    let response = app
        .oneshot(post_product(json!({
            "price": 9.99
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_products_returns_count() {
    let app = app();

    for name in ["First", "Second", "Third"] {
        let response = app
            .clone()
            .oneshot(post_product(json!({"name": name, "price": 1.0})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response.into_body()).await;
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["count"], json!(3));
    assert_eq!(body["data"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_get_product_returns_200() {
    let app = app();

    let response = app
        .clone()
        .oneshot(post_product(json!({"name": "Widget", "price": 9.99})))
        .await
        .unwrap();
    let created = json_body(response.into_body()).await;
    let id = created["data"]["id"].as_i64().unwrap();

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri(format!("/{}", id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response.into_body()).await;
    assert_eq!(body["data"]["name"], json!("Widget"));
    assert!(body.get("message").is_none());
}

#[tokio::test]
async fn test_get_missing_product_returns_404() {
    let app = app();

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/999")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = json_body(response.into_body()).await;
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["message"], json!("Product not found"));
}

#[tokio::test]
async fn test_malformed_id_returns_400() {
    let app = app();

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/abc")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_product_is_full_replace() {
    let app = app();

    let response = app
        .clone()
        .oneshot(post_product(json!({
            "name": "Widget",
            "description": "Original",
            "price": 9.99,
            "stock": 5
        })))
        .await
        .unwrap();
    let created = json_body(response.into_body()).await;
    let id = created["data"]["id"].as_i64().unwrap();

    // Omitting description and stock replaces them with null / 0
    let response = app
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri(format!("/{}", id))
                .header("content-type", "application/json")
                .body(Body::from(
                    serde_json::to_string(&json!({
                        "name": "Gadget",
                        "price": 19.99
                    }))
                    .unwrap(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response.into_body()).await;
    assert_eq!(body["message"], json!("Product updated successfully"));
    assert_eq!(body["data"]["name"], json!("Gadget"));
    assert_eq!(body["data"]["description"], json!(null));
    assert_eq!(body["data"]["stock"], json!(0));
}

#[tokio::test]
async fn test_update_missing_product_returns_404() {
    let app = app();

    let response = app
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri("/999")
                .header("content-type", "application/json")
                .body(Body::from(
                    serde_json::to_string(&json!({
                        "name": "Widget",
                        "price": 9.99
                    }))
                    .unwrap(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_then_get_returns_404() {
    let app = app();

    let response = app
        .clone()
        .oneshot(post_product(json!({"name": "Widget", "price": 9.99})))
        .await
        .unwrap();
    let created = json_body(response.into_body()).await;
    let id = created["data"]["id"].as_i64().unwrap();

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/{}", id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response.into_body()).await;
    assert_eq!(body["message"], json!("Product deleted successfully"));
    assert_eq!(body["data"]["name"], json!("Widget"));

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri(format!("/{}", id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
