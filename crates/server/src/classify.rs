//! Classification of GitHub responses into canonical outcomes.
//!
//! Each GitHub call made by the gateway is classified exactly once, right
//! where the response is received. The result is either a [`GitHubSuccess`]
//! (canonical code and local status) or a [`GitHubFailure`] carrying the
//! canonical error kind, the local status to respond with, and the message to
//! show the caller.

use axum::http::StatusCode;
use serde::Deserialize;

/// Message used when upstream detail is logged but not exposed.
pub const GENERIC_FAILURE_MESSAGE: &str = "GitHub request failed";

/// The GitHub call being classified.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GitHubOperation {
    /// `GET /user`
    User,
    /// `GET /user/repos`
    ListRepositories,
    /// `POST /repos/{owner}/{name}/hooks`
    CreateWebhook,
}

impl GitHubOperation {
    /// Canonical code for a successful call.
    pub fn success_code(self) -> &'static str {
        match self {
            Self::User => "github-user",
            Self::ListRepositories => "github-list-repositories",
            Self::CreateWebhook => "github-webhook-created",
        }
    }

    /// Local status for a successful call.
    pub fn success_status(self) -> StatusCode {
        match self {
            Self::User | Self::ListRepositories => StatusCode::OK,
            Self::CreateWebhook => StatusCode::CREATED,
        }
    }

    /// Error kind used for responses no other rule matches.
    pub fn generic_failure(self) -> FailureKind {
        match self {
            Self::User => FailureKind::UserError,
            Self::ListRepositories => FailureKind::ListRepositoriesError,
            Self::CreateWebhook => FailureKind::Other,
        }
    }

    /// Short label for logs and metrics.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::ListRepositories => "list_repositories",
            Self::CreateWebhook => "create_webhook",
        }
    }
}

/// Canonical GitHub error kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FailureKind {
    AuthenticationFailed,
    UserError,
    ListRepositoriesError,
    RepositoryNotFound,
    AlreadyCreated,
    Other,
}

impl FailureKind {
    pub fn code(self) -> &'static str {
        match self {
            Self::AuthenticationFailed => "github-authentication-failed",
            Self::UserError => "github-user-error",
            Self::ListRepositoriesError => "github-list-repositories-error",
            Self::RepositoryNotFound => "github-repository-not-found",
            Self::AlreadyCreated => "github-already-created",
            Self::Other => "github-error-other",
        }
    }
}

/// A successfully classified GitHub response.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GitHubSuccess {
    pub code: &'static str,
    pub status: StatusCode,
}

/// A classified GitHub failure, ready to be rendered as an error envelope.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{}: {message}", kind.code())]
pub struct GitHubFailure {
    pub kind: FailureKind,
    pub status: StatusCode,
    pub message: String,
}

impl GitHubFailure {
    /// The caller has no session token, or GitHub rejected it.
    pub fn authentication_failed() -> Self {
        Self {
            kind: FailureKind::AuthenticationFailed,
            status: StatusCode::UNAUTHORIZED,
            message: "Authentication with GitHub failed".to_string(),
        }
    }

    /// The request never produced a usable GitHub response (connection error,
    /// unreadable or unexpected body).
    pub fn unusable_response(operation: GitHubOperation, detail: impl std::fmt::Display) -> Self {
        tracing::warn!(
            operation = operation.as_str(),
            error = %detail,
            "GitHub request did not produce a usable response"
        );
        Self {
            kind: operation.generic_failure(),
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: GENERIC_FAILURE_MESSAGE.to_string(),
        }
    }
}

#[derive(Deserialize)]
struct UpstreamErrorBody {
    message: Option<String>,
}

/// Pull GitHub's `message` out of an error body, if there is one.
fn upstream_message(body: &[u8]) -> Option<String> {
    serde_json::from_slice::<UpstreamErrorBody>(body)
        .ok()
        .and_then(|b| b.message)
}

/// Classify a GitHub response for `operation`.
pub fn classify(
    operation: GitHubOperation,
    status: StatusCode,
    body: &[u8],
) -> Result<GitHubSuccess, GitHubFailure> {
    use GitHubOperation::*;

    if status.is_success() {
        return Ok(GitHubSuccess {
            code: operation.success_code(),
            status: operation.success_status(),
        });
    }

    let message = upstream_message(body).unwrap_or_else(|| {
        status
            .canonical_reason()
            .unwrap_or(GENERIC_FAILURE_MESSAGE)
            .to_string()
    });

    let failure = match (operation, status) {
        (_, StatusCode::UNAUTHORIZED) => GitHubFailure {
            message,
            ..GitHubFailure::authentication_failed()
        },
        (CreateWebhook, StatusCode::NOT_FOUND) => GitHubFailure {
            kind: FailureKind::RepositoryNotFound,
            status: StatusCode::NOT_FOUND,
            message,
        },
        (CreateWebhook, StatusCode::UNPROCESSABLE_ENTITY) => GitHubFailure {
            kind: FailureKind::AlreadyCreated,
            status: StatusCode::UNPROCESSABLE_ENTITY,
            message,
        },
        (CreateWebhook, _) => {
            tracing::warn!(
                operation = operation.as_str(),
                status = status.as_u16(),
                upstream_message = %message,
                "Unexpected GitHub response"
            );
            GitHubFailure {
                kind: FailureKind::Other,
                status: StatusCode::INTERNAL_SERVER_ERROR,
                message: GENERIC_FAILURE_MESSAGE.to_string(),
            }
        }
        (User | ListRepositories, _) => GitHubFailure {
            kind: operation.generic_failure(),
            status,
            message,
        },
    };

    Err(failure)
}
