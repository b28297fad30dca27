//! API error types.

use crate::classify::GitHubFailure;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use snapbridge_core::Envelope;

/// API error type.
///
/// Every variant renders as an error [`Envelope`] with a stable code.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    GitHub(#[from] GitHubFailure),

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("store request failed")]
    StoreUnavailable(#[source] reqwest::Error),

    #[error("core error: {0}")]
    Core(#[from] snapbridge_core::Error),
}

impl ApiError {
    /// Get the error code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            Self::GitHub(failure) => failure.kind.code(),
            Self::BadRequest(_) => "bad-request",
            Self::StoreUnavailable(_) => "store-request-failed",
            Self::Core(_) => "internal-error",
        }
    }

    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::GitHub(failure) => failure.status,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::StoreUnavailable(_) | Self::Core(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message shown to the caller.
    fn message(&self) -> String {
        match self {
            Self::GitHub(failure) => failure.message.clone(),
            Self::Core(_) => "internal server error".to_string(),
            _ => self.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(code = self.code(), error = %self, "Request failed");
        } else {
            tracing::debug!(code = self.code(), error = %self, "Request rejected");
        }

        let body = Envelope::error(self.code(), self.message());
        (status, Json(body)).into_response()
    }
}

/// Result type for API handlers.
pub type ApiResult<T> = std::result::Result<T, ApiError>;
