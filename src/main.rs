//! Parkwatch Dashboard Server
//!
//! Run with: cargo run --bin parkwatch
//!
//! Configuration comes from `--config`, the default config locations, and
//! `PARKWATCH_*` environment variables (see `parkwatch-cli config`).

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;

use parkwatch::client::HttpParkingApi;
use parkwatch::config::Config;
use parkwatch::renderer::DashboardRenderer;
use parkwatch::scheduler::RefreshScheduler;
use parkwatch::server::{serve, AppState};
use parkwatch::telemetry::init_logging;
use parkwatch::theme::{FileThemeStore, ThemeController};

#[derive(Parser)]
#[command(name = "parkwatch")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Live parking occupancy dashboard")]
struct Args {
    /// Config file (default: search the standard locations)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Host to bind to
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = Config::resolve(args.config.as_deref())?;
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }

    init_logging(&config.logging);

    tracing::info!("Starting Parkwatch v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Upstream: {}", config.upstream.base_url);
    tracing::info!("Theme state file: {:?}", config.theme.state_file);

    let api = HttpParkingApi::new(config.upstream.client_config())
        .context("Failed to build upstream client")?;

    let theme = ThemeController::new(
        Box::new(FileThemeStore::new(&config.theme.state_file)),
        config.theme.system_preference(),
    );

    let renderer = Arc::new(DashboardRenderer::new(Arc::new(api), theme));

    let intervals = config.polling.intervals();
    let scheduler = Arc::new(RefreshScheduler::new(renderer.clone(), intervals));
    let scheduler_handle = scheduler.clone().start();

    let state = AppState::new(renderer, intervals.snapshot.as_secs());
    let result = serve(state, &config.server).await;

    scheduler.stop();
    scheduler_handle.abort();

    result?;
    tracing::info!("Parkwatch shutdown complete");
    Ok(())
}
