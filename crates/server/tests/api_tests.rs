//! Service-level endpoint tests: health, metrics and routing.

mod common;

use axum::http::StatusCode;
use common::*;
use httpmock::Method::GET;

#[tokio::test]
async fn test_health_check() {
    let server = TestServer::new().await;

    let (status, body) = server.json_request("GET", "/health", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");
    assert_eq!(body["payload"]["code"], "ok");
    assert_eq!(body["payload"]["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_metrics_endpoint_reports_upstream_traffic() {
    let server = TestServer::new().await;
    server
        .github
        .mock_async(|when, then| {
            when.method(GET).path("/user");
            then.status(200).json_body(github_user());
        })
        .await;
    server
        .json_request("GET", "/github/user", None, Some(SESSION_TOKEN))
        .await;

    let response = server.request("GET", "/metrics", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    let text = String::from_utf8(response.body).unwrap();
    assert!(text.contains("snapbridge_upstream_requests_total"));
}

#[tokio::test]
async fn test_metrics_endpoint_can_be_disabled() {
    let server = TestServer::with_config(|config| {
        config.server.metrics_enabled = false;
    })
    .await;

    let response = server.request("GET", "/metrics", None, None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unknown_route() {
    let server = TestServer::new().await;

    let response = server.request("GET", "/github/unknown", None, Some(SESSION_TOKEN)).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}
