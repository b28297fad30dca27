//! HTTP gateway between a snap build front-end, GitHub and the snap store.
//!
//! This crate provides:
//! - GitHub user and repository lookups, with repositories enriched by the
//!   snap name declared in their build manifest
//! - Push webhook registration with per-repository signing secrets
//! - Snap name registration relayed to the store

pub mod auth;
pub mod cache;
pub mod classify;
pub mod error;
pub mod github;
pub mod handlers;
pub mod metrics;
pub mod routes;
pub mod state;
pub mod store;
pub mod webhook;

pub use auth::{SessionToken, TraceId};
pub use cache::SnapNameCache;
pub use error::ApiError;
pub use routes::create_router;
pub use state::AppState;
