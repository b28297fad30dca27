//! Snapbridge gateway binary.

use anyhow::{Context, Result};
use clap::Parser;
use figment::Figment;
use figment::providers::{Env, Format, Toml};
use snapbridge_core::AppConfig;
use snapbridge_server::{AppState, SnapNameCache, create_router};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Snapbridge - GitHub and snap store gateway
#[derive(Parser, Debug)]
#[command(name = "snapbridged")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(
        short,
        long,
        env = "SNAPBRIDGE_CONFIG",
        default_value = "config/server.toml"
    )]
    config: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Snapbridge v{}", env!("CARGO_PKG_VERSION"));

    // The file is optional; env vars can provide/override everything.
    let mut figment = Figment::new();
    if std::path::Path::new(&args.config).exists() {
        tracing::info!(config_path = %args.config, "Loading configuration from file");
        figment = figment.merge(Toml::file(&args.config));
    } else {
        tracing::debug!("No config file found at {}", args.config);
    }

    let config: AppConfig = figment
        .merge(Env::prefixed("SNAPBRIDGE_").split("__"))
        .extract()
        .context(
            "failed to load configuration \
             (github.webhook_secret is required, e.g. SNAPBRIDGE_GITHUB__WEBHOOK_SECRET)",
        )?;

    if config.server.metrics_enabled {
        snapbridge_server::metrics::register_metrics();
        tracing::info!("Prometheus metrics registered");
    }

    let addr: SocketAddr = config.server.bind.parse().context("invalid bind address")?;
    tracing::info!(
        github = %config.github.api_url,
        store = %config.store.api_url,
        base_url = %config.server.base_url,
        "Upstreams configured"
    );

    let state = AppState::new(config, Arc::new(SnapNameCache::new()))
        .context("failed to initialize application state")?;
    let app = create_router(state);

    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind to {}", addr))?;
    axum::serve(listener, app).await?;

    Ok(())
}
