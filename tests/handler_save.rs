mod common;

use axum::{Router, routing::post};
use axum_test::TestServer;
use serde_json::json;
use shortener::api::handlers::save_url_handler;

async fn server() -> (tempfile::TempDir, TestServer) {
    let (dir, state, _rx) = common::create_test_state().await;
    let app = Router::new()
        .route("/url", post(save_url_handler))
        .with_state(state);

    (dir, TestServer::new(app).unwrap())
}

#[tokio::test]
async fn test_save_generates_alias() {
    let (_dir, server) = server().await;

    let response = server
        .post("/url")
        .json(&json!({ "url": "https://example.com" }))
        .await;

    assert_eq!(response.status_code(), 201);

    let json = response.json::<serde_json::Value>();
    let alias = json["alias"].as_str().unwrap();
    assert_eq!(alias.len(), 8);
}

#[tokio::test]
async fn test_save_with_custom_alias() {
    let (_dir, server) = server().await;

    let response = server
        .post("/url")
        .json(&json!({ "url": "https://example.com", "alias": "my_link-1" }))
        .await;

    assert_eq!(response.status_code(), 201);
    assert_eq!(response.json::<serde_json::Value>()["alias"], "my_link-1");
}

#[tokio::test]
async fn test_save_empty_alias_is_generated() {
    let (_dir, server) = server().await;

    let response = server
        .post("/url")
        .json(&json!({ "url": "https://example.com", "alias": "" }))
        .await;

    assert_eq!(response.status_code(), 201);
    assert!(!response.json::<serde_json::Value>()["alias"]
        .as_str()
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn test_save_duplicate_alias_conflicts() {
    let (_dir, server) = server().await;

    server
        .post("/url")
        .json(&json!({ "url": "https://one.example", "alias": "taken" }))
        .await;

    let response = server
        .post("/url")
        .json(&json!({ "url": "https://two.example", "alias": "taken" }))
        .await;

    assert_eq!(response.status_code(), 409);

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "conflict");
    assert_eq!(json["error"]["details"]["alias"], "taken");
}

#[tokio::test]
async fn test_save_invalid_url() {
    let (_dir, server) = server().await;

    let response = server
        .post("/url")
        .json(&json!({ "url": "not-a-url" }))
        .await;

    assert_eq!(response.status_code(), 400);
    assert_eq!(
        response.json::<serde_json::Value>()["error"]["code"],
        "validation_error"
    );
}

#[tokio::test]
async fn test_save_invalid_alias() {
    let (_dir, server) = server().await;

    for alias in ["with space", "health", "a/b"] {
        let response = server
            .post("/url")
            .json(&json!({ "url": "https://example.com", "alias": alias }))
            .await;

        assert_eq!(response.status_code(), 400, "accepted {alias}");
    }
}

#[tokio::test]
async fn test_save_malformed_body() {
    let (_dir, server) = server().await;

    let response = server.post("/url").text("url=https://example.com").await;

    assert_eq!(response.status_code(), 400);
    assert_eq!(
        response.json::<serde_json::Value>()["error"]["code"],
        "validation_error"
    );
}
