//! Server test utilities.

use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode};
use httpmock::MockServer;
use serde_json::Value;
use snapbridge_core::{AppConfig, GitHubConfig, ServerConfig, StoreConfig};
use snapbridge_server::{AppState, SnapNameCache, create_router};
use std::sync::Arc;
use tower::ServiceExt;

/// Webhook key used by every test server.
#[allow(dead_code)]
pub const WEBHOOK_SECRET: &str = "dummy-webhook-secret";

/// Public base URL used by every test server.
#[allow(dead_code)]
pub const BASE_URL: &str = "http://localhost:8000";

/// A test server wired to mocked GitHub and store upstreams.
/// Note: #[allow(dead_code)] because each test file compiles common/ separately.
#[allow(dead_code)]
pub struct TestServer {
    pub router: axum::Router,
    pub state: AppState,
    pub github: MockServer,
    pub store: MockServer,
}

/// A response as the caller sees it.
#[allow(dead_code)]
pub struct RawResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

#[allow(dead_code)]
impl RawResponse {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).expect("response body is not JSON")
    }
}

#[allow(dead_code)]
impl TestServer {
    /// Create a new test server with fresh upstream mocks and an empty cache.
    pub async fn new() -> Self {
        Self::with_config(|_| {}).await
    }

    /// Create a test server with custom config modifications.
    pub async fn with_config<F>(modifier: F) -> Self
    where
        F: FnOnce(&mut AppConfig),
    {
        let github = MockServer::start_async().await;
        let store = MockServer::start_async().await;

        let mut config = AppConfig {
            server: ServerConfig {
                base_url: BASE_URL.to_string(),
                ..Default::default()
            },
            github: GitHubConfig::new(github.base_url(), WEBHOOK_SECRET),
            store: StoreConfig {
                api_url: store.base_url(),
            },
        };
        modifier(&mut config);

        snapbridge_server::metrics::register_metrics();
        let state = AppState::new(config, Arc::new(SnapNameCache::new()))
            .expect("Failed to create app state");
        let router = create_router(state.clone());

        Self {
            router,
            state,
            github,
            store,
        }
    }

    /// Send a request and return the raw response.
    pub async fn request(
        &self,
        method: &str,
        uri: &str,
        body: Option<Value>,
        session_token: Option<&str>,
    ) -> RawResponse {
        let mut builder = Request::builder().method(method).uri(uri);

        if let Some(token) = session_token {
            builder = builder.header("Authorization", format!("Bearer {}", token));
        }

        let body = match body {
            Some(v) => {
                builder = builder.header("Content-Type", "application/json");
                Body::from(serde_json::to_vec(&v).unwrap())
            }
            None => Body::empty(),
        };

        self.send(builder.body(body).unwrap()).await
    }

    /// Send a prepared request and return the raw response.
    pub async fn send(&self, request: Request<Body>) -> RawResponse {
        let response = self.router.clone().oneshot(request).await.unwrap();

        let status = response.status();
        let headers = response.headers().clone();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap()
            .to_vec();

        RawResponse {
            status,
            headers,
            body,
        }
    }

    /// Send a request and decode the envelope.
    pub async fn json_request(
        &self,
        method: &str,
        uri: &str,
        body: Option<Value>,
        session_token: Option<&str>,
    ) -> (StatusCode, Value) {
        let response = self.request(method, uri, body, session_token).await;
        let json = if response.body.is_empty() {
            Value::Null
        } else {
            response.json()
        };
        (response.status, json)
    }
}
