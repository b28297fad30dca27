//! Route configuration.

use crate::auth::session_middleware;
use crate::handlers;
use crate::metrics::metrics_handler;
use crate::state::AppState;
use axum::Router;
use axum::middleware;
use axum::routing::{get, post};
use tower_http::trace::TraceLayer;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    let github_routes = Router::new()
        .route("/github/user", get(handlers::get_user))
        .route("/github/repos", get(handlers::list_repositories))
        .route("/github/webhook", post(handlers::create_webhook));

    let store_routes = Router::new().route("/store/register-name", post(handlers::register_name));

    let mut router = Router::new()
        // Health check (unauthenticated for load balancers/k8s probes)
        .route("/health", get(handlers::health_check))
        .merge(github_routes)
        .merge(store_routes);

    // SECURITY: When enabled, this endpoint MUST be network-restricted
    // to authorized Prometheus scraper IPs only.
    if state.config.server.metrics_enabled {
        router = router.route("/metrics", get(metrics_handler));
    }

    // Order of execution: TraceLayer -> session -> Handler
    router
        .layer(middleware::from_fn(session_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
