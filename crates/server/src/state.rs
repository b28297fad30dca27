//! Application state shared across handlers.

use crate::cache::SnapNameCache;
use crate::github::GitHubClient;
use crate::store::StoreClient;
use snapbridge_core::AppConfig;
use std::sync::Arc;

/// Errors raised while assembling [`AppState`].
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error(transparent)]
    Config(#[from] snapbridge_core::Error),

    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// GitHub upstream client.
    pub github: GitHubClient,
    /// Store upstream client.
    pub store: StoreClient,
    /// Memoized repository snap names.
    pub snap_names: Arc<SnapNameCache>,
}

impl AppState {
    /// Create a new application state.
    ///
    /// The configuration is validated first; the cache is supplied by the
    /// caller so tests and operators can pre-seed or inspect it.
    pub fn new(config: AppConfig, snap_names: Arc<SnapNameCache>) -> Result<Self, StateError> {
        config.validate()?;

        let github = GitHubClient::new(&config.github)?;
        let store = StoreClient::new(&config.store)?;

        Ok(Self {
            config: Arc::new(config),
            github,
            store,
            snap_names,
        })
    }
}
