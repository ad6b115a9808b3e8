//! Maintlog Dashboard Server
//!
//! Run with: cargo run --bin maintlog
//!
//! # Configuration
//!
//! A TOML config file (see `maintlog-cli config`) plus environment overrides:
//! - `MAINTLOG_BACKEND_URL`: Spreadsheet web-app URL (default: memory:)
//! - `MAINTLOG_HOST` / `MAINTLOG_PORT`: Bind address (default: 0.0.0.0:8501)
//! - `MAINTLOG_LOG_LEVEL` / `MAINTLOG_LOG_FORMAT`: Logging
//! - `RUST_LOG`: Full filter override

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;

use maintlog::config::Config;
use maintlog::logging::init_tracing;
use maintlog::sheets;
use maintlog::web::{serve, AppState};

#[derive(Parser)]
#[command(name = "maintlog")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Machine maintenance log dashboard")]
struct Args {
    /// Config file (default: search standard locations)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Host to bind to
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on
    #[arg(short, long)]
    port: Option<u16>,

    /// Spreadsheet web-app URL
    #[arg(long)]
    backend_url: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let (mut config, source) = Config::resolve(args.config.as_deref())?;
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(url) = args.backend_url {
        config.backend.url = url;
    }

    init_tracing(&config.logging).context("failed to initialize logging")?;

    tracing::info!("Starting Maintlog dashboard v{}", env!("CARGO_PKG_VERSION"));
    match &source {
        Some(path) => tracing::info!("Loaded config from {:?}", path),
        None => tracing::info!("No config file found, using defaults with environment overrides"),
    }
    tracing::info!(backend = %config.backend.url, "Backend configured");

    let store = sheets::connect(config.backend.sheets_config())?;

    match store.health_check().await {
        Ok(()) => tracing::info!("Backend connection verified"),
        Err(e) => tracing::warn!("Backend not reachable: {} (pages will show errors)", e),
    }

    let state = AppState::new(store, config.dashboard.clone());
    serve(state, &config.server).await?;

    tracing::info!("Maintlog dashboard stopped");
    Ok(())
}
