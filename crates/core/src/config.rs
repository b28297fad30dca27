//! Configuration types shared across crates.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use url::Url;

/// Server configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address (e.g., "0.0.0.0:8000").
    #[serde(default = "default_bind")]
    pub bind: String,
    /// Public base URL of this service. Used to build webhook callback targets.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Enable the /metrics endpoint for Prometheus scraping (default: true).
    /// SECURITY: When enabled, ensure this endpoint is network-restricted
    /// to authorized scraper IPs at the infrastructure level.
    #[serde(default = "default_metrics_enabled")]
    pub metrics_enabled: bool,
}

/// GitHub upstream configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GitHubConfig {
    /// GitHub REST API base URL.
    #[serde(default = "default_github_api_url")]
    pub api_url: String,
    /// Shared key used to derive per-repository webhook signing secrets.
    /// WARNING: Prefer SNAPBRIDGE_GITHUB__WEBHOOK_SECRET over storing in config.
    pub webhook_secret: String,
    /// Repository path of the build manifest used to enrich repo listings.
    #[serde(default = "default_manifest_path")]
    pub manifest_path: String,
    /// User-Agent sent on every GitHub request (GitHub rejects requests without one).
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

/// Store API configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Store API base URL.
    #[serde(default = "default_store_api_url")]
    pub api_url: String,
}

fn default_bind() -> String {
    "127.0.0.1:8000".to_string()
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_metrics_enabled() -> bool {
    true
}

fn default_github_api_url() -> String {
    "https://api.github.com".to_string()
}

fn default_manifest_path() -> String {
    "snapcraft.yaml".to_string()
}

fn default_user_agent() -> String {
    concat!("snapbridge/", env!("CARGO_PKG_VERSION")).to_string()
}

fn default_store_api_url() -> String {
    "https://myapps.developer.ubuntu.com/dev/api".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            base_url: default_base_url(),
            metrics_enabled: default_metrics_enabled(),
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            api_url: default_store_api_url(),
        }
    }
}

impl GitHubConfig {
    /// Create a GitHub configuration pointing at `api_url` with the given secret.
    pub fn new(api_url: impl Into<String>, webhook_secret: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            webhook_secret: webhook_secret.into(),
            manifest_path: default_manifest_path(),
            user_agent: default_user_agent(),
        }
    }
}

/// Complete application configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AppConfig {
    /// Listener and public URL settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// GitHub upstream.
    pub github: GitHubConfig,
    /// Store upstream.
    #[serde(default)]
    pub store: StoreConfig,
}

impl AppConfig {
    /// Validate configuration invariants.
    pub fn validate(&self) -> Result<()> {
        if self.github.webhook_secret.trim().is_empty() {
            return Err(Error::InvalidConfig(
                "github.webhook_secret must not be empty".to_string(),
            ));
        }

        if self.github.manifest_path.trim_matches('/').is_empty() {
            return Err(Error::InvalidConfig(
                "github.manifest_path must not be empty".to_string(),
            ));
        }

        for (field, value) in [
            ("server.base_url", &self.server.base_url),
            ("github.api_url", &self.github.api_url),
            ("store.api_url", &self.store.api_url),
        ] {
            Url::parse(value)
                .map_err(|e| Error::InvalidConfig(format!("{field} is not a valid URL: {e}")))?;
        }

        Ok(())
    }

    /// Create a configuration suitable for tests.
    ///
    /// **For testing only.** Upstream URLs point at unroutable defaults and
    /// should be overridden with mock server addresses.
    pub fn for_testing() -> Self {
        Self {
            server: ServerConfig::default(),
            github: GitHubConfig::new("http://127.0.0.1:1", "dummy-webhook-secret"),
            store: StoreConfig {
                api_url: "http://127.0.0.1:1".to_string(),
            },
        }
    }
}
