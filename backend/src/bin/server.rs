//! Event Portal HTTP Server Binary
//!
//! Loads configuration, builds the repository, and serves the REST API.
//!
//! # Usage
//!
//! ```bash
//! # Defaults: 0.0.0.0:8080, empty in-memory repository
//! cargo run --bin event-portal-server
//!
//! # With a config file
//! PORTAL_CONFIG=portal.toml cargo run --bin event-portal-server
//! ```
//!
//! # Environment Variables
//!
//! - `PORTAL_CONFIG`: TOML configuration file (optional)
//! - `HOST`: Server host (default: 0.0.0.0)
//! - `PORT`: Server port (default: 8080)
//! - `RUST_LOG`: Log filter directives, e.g. `info` or `event_portal=debug,tower_http=warn` (default: info)
//! - `REPOSITORY_TYPE`: Repository backend (default: local)

use std::sync::Arc;

use anyhow::Context;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use event_portal::clock::SystemClock;
use event_portal::config::AppConfig;
use event_portal::db::RepositoryFactory;
use event_portal::http::{create_router, AppState};

/// Parse the configured logging level as `EnvFilter` directives.
fn log_filter(directives: &str) -> anyhow::Result<EnvFilter> {
    EnvFilter::try_new(directives)
        .with_context(|| format!("Invalid logging level {:?}", directives))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load()?;

    FmtSubscriber::builder()
        .with_env_filter(log_filter(&config.logging.level)?)
        .with_target(true)
        .with_thread_ids(true)
        .init();

    info!("Starting event portal server");

    let repository = RepositoryFactory::create(&config.repository)?;
    info!(
        "Repository initialized ({})",
        config.repository.repo_type
    );

    let state = AppState::with_clock(repository, Arc::new(SystemClock));
    let app = create_router(state);

    let addr = config.bind_addr()?;
    info!("Server listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
