//! Prometheus metrics for the gateway.
//!
//! # Security Note
//!
//! The `/metrics` endpoint is unauthenticated to allow Prometheus scraping.
//! Metrics carry no user data (no tokens, repository names, or snap names),
//! but the endpoint should still be network-restricted to authorized
//! scrapers. Disable it with `server.metrics_enabled = false`.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use prometheus::{Encoder, IntCounter, IntCounterVec, Opts, Registry, TextEncoder};
use std::sync::{LazyLock, Once};

/// Global Prometheus registry for all metrics.
pub static REGISTRY: LazyLock<Registry> = LazyLock::new(Registry::new);

// Upstream traffic
pub static UPSTREAM_REQUESTS: LazyLock<IntCounterVec> = LazyLock::new(|| {
    IntCounterVec::new(
        Opts::new(
            "snapbridge_upstream_requests_total",
            "Upstream API requests by upstream, operation and response status",
        ),
        &["upstream", "operation", "status"],
    )
    .expect("metric creation failed")
});

// Enrichment cache
pub static SNAP_NAME_CACHE_HITS: LazyLock<IntCounter> = LazyLock::new(|| {
    IntCounter::new(
        "snapbridge_snap_name_cache_hits_total",
        "Repository snap name lookups served from cache",
    )
    .expect("metric creation failed")
});

pub static SNAP_NAME_CACHE_MISSES: LazyLock<IntCounter> = LazyLock::new(|| {
    IntCounter::new(
        "snapbridge_snap_name_cache_misses_total",
        "Repository snap name lookups that went to GitHub",
    )
    .expect("metric creation failed")
});

// Webhooks
pub static WEBHOOK_REGISTRATIONS: LazyLock<IntCounterVec> = LazyLock::new(|| {
    IntCounterVec::new(
        Opts::new(
            "snapbridge_webhook_registrations_total",
            "Webhook registration attempts by outcome code",
        ),
        &["code"],
    )
    .expect("metric creation failed")
});

static REGISTER: Once = Once::new();

/// Register all metrics with the global registry. Safe to call more than once.
pub fn register_metrics() {
    REGISTER.call_once(|| {
        REGISTRY
            .register(Box::new(UPSTREAM_REQUESTS.clone()))
            .expect("metric registration failed");
        REGISTRY
            .register(Box::new(SNAP_NAME_CACHE_HITS.clone()))
            .expect("metric registration failed");
        REGISTRY
            .register(Box::new(SNAP_NAME_CACHE_MISSES.clone()))
            .expect("metric registration failed");
        REGISTRY
            .register(Box::new(WEBHOOK_REGISTRATIONS.clone()))
            .expect("metric registration failed");
    });
}

/// GET /metrics - Prometheus metrics endpoint.
pub async fn metrics_handler() -> impl IntoResponse {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();

    let mut buffer = Vec::new();
    match encoder.encode(&metric_families, &mut buffer) {
        Ok(()) => (
            StatusCode::OK,
            [("content-type", "text/plain; version=0.0.4; charset=utf-8")],
            buffer,
        ),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            [("content-type", "text/plain; charset=utf-8")],
            format!("Failed to encode metrics: {e}").into_bytes(),
        ),
    }
}

/// Record one upstream response. `status` is `None` when no response arrived.
pub fn record_upstream(upstream: &str, operation: &str, status: Option<StatusCode>) {
    let status = status.map_or_else(|| "error".to_string(), |s| s.as_u16().to_string());
    UPSTREAM_REQUESTS
        .with_label_values(&[upstream, operation, status.as_str()])
        .inc();
}

/// Record the outcome of a webhook registration.
pub fn record_webhook_registration(code: &str) {
    WEBHOOK_REGISTRATIONS.with_label_values(&[code]).inc();
}
