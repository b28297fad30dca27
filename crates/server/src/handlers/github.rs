//! GitHub integration endpoints.

use crate::auth::SessionToken;
use crate::error::{ApiError, ApiResult};
use crate::github::{EnrichedRepository, RepositorySummary};
use crate::state::AppState;
use crate::webhook::{self, CreateWebhookRequest, HookRegistration};
use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use futures::future::join_all;
use snapbridge_core::Envelope;
use std::collections::HashMap;

/// GET /github/user - The authenticated GitHub user.
pub async fn get_user(
    State(state): State<AppState>,
    token: SessionToken,
) -> ApiResult<(StatusCode, Json<Envelope>)> {
    let user = state.github.get_user(token.as_str()).await?;
    tracing::debug!("Fetched GitHub user");

    let body = Envelope::success("github-user").with_field("user", user);
    Ok((StatusCode::OK, Json(body)))
}

/// GET /github/repos - Owned repositories, each with its snap name.
pub async fn list_repositories(
    State(state): State<AppState>,
    token: SessionToken,
) -> ApiResult<(StatusCode, Json<Envelope>)> {
    let page = state.github.list_repositories(token.as_str()).await?;
    let repos = enrich(&state, &token, page.repositories).await;
    tracing::debug!(count = repos.len(), "Listed GitHub repositories");

    let page_links = serde_json::to_value(page.links).map_err(snapbridge_core::Error::from)?;
    let body = Envelope::success("github-list-repositories")
        .with_serialized("repos", &repos)?
        .with_top_level("pageLinks", page_links);
    Ok((StatusCode::OK, Json(body)))
}

/// Attach snap names to every repository.
///
/// Lookups run concurrently and may finish in any order; results are
/// matched back by repository URL so the upstream ordering is kept.
async fn enrich(
    state: &AppState,
    token: &SessionToken,
    repositories: Vec<RepositorySummary>,
) -> Vec<EnrichedRepository> {
    let lookups = repositories.iter().map(|repo| async move {
        let snap_name = state
            .snap_names
            .get_or_fetch(&repo.url, || {
                state
                    .github
                    .fetch_snap_name(token.as_str(), &repo.full_name)
            })
            .await;
        (repo.url.clone(), snap_name)
    });

    let snap_names: HashMap<String, Option<String>> =
        join_all(lookups).await.into_iter().collect();

    repositories
        .into_iter()
        .map(|repo| {
            let snap_name = snap_names.get(&repo.url).cloned().flatten();
            EnrichedRepository::new(repo, snap_name)
        })
        .collect()
}

/// POST /github/webhook - Register the push webhook on a repository.
pub async fn create_webhook(
    State(state): State<AppState>,
    token: SessionToken,
    body: Result<Json<CreateWebhookRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Envelope>)> {
    let Json(req) = body.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    req.validate()?;

    let secret = webhook::signing_secret(&state.config.github.webhook_secret, &req.owner, &req.name);
    let url = webhook::callback_url(&state.config.server.base_url, &req.owner, &req.name);
    let registration = HookRegistration::push(url, secret);

    let result = state
        .github
        .create_webhook(token.as_str(), &req.owner, &req.name, &registration)
        .await;

    match result {
        Ok(created) => {
            crate::metrics::record_webhook_registration(created.code);
            tracing::info!(owner = %req.owner, name = %req.name, "Webhook registered");
            Ok((created.status, Json(Envelope::success(created.code))))
        }
        Err(failure) => {
            crate::metrics::record_webhook_registration(failure.kind.code());
            tracing::info!(
                owner = %req.owner,
                name = %req.name,
                code = failure.kind.code(),
                "Webhook registration failed"
            );
            Err(failure.into())
        }
    }
}
