//! Snap store endpoints.

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use crate::store::{RegisterNameRequest, UpstreamResponse};
use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;

/// POST /store/register-name - Register a snap name with the store.
///
/// The store's status, body and content type are relayed unchanged.
pub async fn register_name(
    State(state): State<AppState>,
    body: Result<Json<RegisterNameRequest>, JsonRejection>,
) -> ApiResult<UpstreamResponse> {
    let Json(req) = body.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    if req.snap_name.is_empty() {
        return Err(ApiError::BadRequest("snap_name must not be empty".into()));
    }

    state.store.register_name(&req.snap_name, &req.macaroon).await
}
