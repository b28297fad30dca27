use axum::Json;
use snapbridge_core::Envelope;

/// GET /health - Liveness check.
///
/// Unauthenticated and never touches an upstream.
pub async fn health_check() -> Json<Envelope> {
    Json(Envelope::success("ok").with_field("version", env!("CARGO_PKG_VERSION").into()))
}
