//! Store proxy integration tests.

mod common;

use axum::http::StatusCode;
use common::*;
use httpmock::Method::POST;
use serde_json::json;

const MACAROON: &str = "MDAxY2xvY2F0aW9uIG15YXBwcy5kZXZlbG9wZXIudWJ1bnR1LmNvbQ";

#[tokio::test]
async fn test_register_name_success_passes_through() {
    let server = TestServer::new().await;
    let store_mock = server
        .store
        .mock_async(|when, then| {
            when.method(POST)
                .path("/register-name/")
                .header("authorization", format!("Macaroon root=\"{MACAROON}\""))
                .json_body(json!({ "snap_name": "test-snap" }));
            then.status(201)
                .header("content-type", "application/json")
                .json_body(json!({ "snap_id": "test-snap-id" }));
        })
        .await;

    let response = server
        .request(
            "POST",
            "/store/register-name",
            Some(json!({ "snap_name": "test-snap", "macaroon": MACAROON })),
            None,
        )
        .await;

    store_mock.assert_async().await;
    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(
        response.headers.get("content-type").unwrap(),
        "application/json"
    );
    assert_eq!(response.json(), json!({ "snap_id": "test-snap-id" }));
}

#[tokio::test]
async fn test_register_name_error_passes_through() {
    let server = TestServer::new().await;
    let upstream_error = json!({
        "status": 403,
        "code": "user-not-ready",
        "detail": "Developer has not signed agreement."
    });
    server
        .store
        .mock_async(|when, then| {
            when.method(POST).path("/register-name/");
            then.status(403)
                .header("content-type", "application/json")
                .json_body(upstream_error.clone());
        })
        .await;

    let response = server
        .request(
            "POST",
            "/store/register-name",
            Some(json!({ "snap_name": "test-snap", "macaroon": MACAROON })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.json(), upstream_error);
}

#[tokio::test]
async fn test_register_name_non_json_body_passes_through() {
    let server = TestServer::new().await;
    server
        .store
        .mock_async(|when, then| {
            when.method(POST).path("/register-name/");
            then.status(502)
                .header("content-type", "text/html")
                .body("<html>Bad Gateway</html>");
        })
        .await;

    let response = server
        .request(
            "POST",
            "/store/register-name",
            Some(json!({ "snap_name": "test-snap", "macaroon": MACAROON })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_GATEWAY);
    assert_eq!(response.headers.get("content-type").unwrap(), "text/html");
    assert_eq!(response.body, b"<html>Bad Gateway</html>");
}

#[tokio::test]
async fn test_register_name_store_unreachable() {
    let server = TestServer::with_config(|config| {
        config.store.api_url = "http://127.0.0.1:1".to_string();
    })
    .await;

    let (status, body) = server
        .json_request(
            "POST",
            "/store/register-name",
            Some(json!({ "snap_name": "test-snap", "macaroon": MACAROON })),
            None,
        )
        .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["status"], "error");
    assert_eq!(body["payload"]["code"], "store-request-failed");
}

#[tokio::test]
async fn test_register_name_malformed_body() {
    let server = TestServer::new().await;
    let store_mock = server
        .store
        .mock_async(|when, then| {
            when.method(POST).path("/register-name/");
            then.status(201);
        })
        .await;

    let (status, body) = server
        .json_request(
            "POST",
            "/store/register-name",
            Some(json!({ "snap_name": "test-snap" })),
            None,
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["payload"]["code"], "bad-request");
    store_mock.assert_hits_async(0).await;
}
