//! Webhook registration payloads and signing secrets.

use crate::error::ApiError;
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha1::Sha1;

type HmacSha1 = Hmac<Sha1>;

/// Derive the per-repository webhook signing secret.
///
/// The secret is `hex(HMAC-SHA1(key, owner ++ name))`. It is sent to GitHub
/// once and never returned to the caller.
pub fn signing_secret(key: &str, owner: &str, name: &str) -> String {
    let mut mac = HmacSha1::new_from_slice(key.as_bytes()).expect("HMAC accepts any key length");
    mac.update(owner.as_bytes());
    mac.update(name.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

/// URL GitHub should deliver push events to.
pub fn callback_url(base_url: &str, owner: &str, name: &str) -> String {
    format!(
        "{}/{owner}/{name}/webhook/notify",
        base_url.trim_end_matches('/')
    )
}

/// Body of `POST /github/webhook`.
#[derive(Clone, Debug, Deserialize)]
pub struct CreateWebhookRequest {
    pub owner: String,
    pub name: String,
}

impl CreateWebhookRequest {
    /// Reject owners and names that could not be a GitHub path segment.
    pub fn validate(&self) -> Result<(), ApiError> {
        validate_segment("owner", &self.owner)?;
        validate_segment("name", &self.name)
    }
}

fn validate_segment(field: &str, value: &str) -> Result<(), ApiError> {
    if value.is_empty() {
        return Err(ApiError::BadRequest(format!("{field} must not be empty")));
    }
    let valid = value
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
    if !valid || value == "." || value == ".." {
        return Err(ApiError::BadRequest(format!(
            "{field} contains invalid characters"
        )));
    }
    Ok(())
}

/// Hook creation body sent to GitHub.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HookRegistration {
    pub name: &'static str,
    pub active: bool,
    pub events: Vec<&'static str>,
    pub config: HookConfig,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HookConfig {
    pub url: String,
    pub content_type: &'static str,
    pub secret: String,
}

impl HookRegistration {
    /// An active `web` hook subscribed to push events.
    pub fn push(url: String, secret: String) -> Self {
        Self {
            name: "web",
            active: true,
            events: vec!["push"],
            config: HookConfig {
                url,
                content_type: "json",
                secret,
            },
        }
    }
}
