//! NAV Dashboard Server
//!
//! Run with: cargo run --bin nav-dashboard
//!
//! # Configuration
//!
//! Reads `config.toml` from the user config directory or the working
//! directory (see `nav-dashboard-cli init-config`), then applies
//! `NAV_DASHBOARD_*` environment overrides. Pass a path as the first
//! argument to use a specific file.

use anyhow::Context;
use nav_dashboard::api::{serve, AppState};
use nav_dashboard::config::Config;
use std::path::PathBuf;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = match std::env::args_os().nth(1).map(PathBuf::from) {
        Some(path) => Config::load_with_env(&path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => Config::load_default(),
    };

    nav_dashboard::logging::init(&config.logging);

    tracing::info!("Starting NAV dashboard v{}", env!("CARGO_PKG_VERSION"));

    config.validate().context("invalid configuration")?;

    tracing::info!(
        rpc_url = %config.chain.rpc_url,
        contract = %config.chain.contract_address,
        pin_block = config.chain.pin_block,
        "Chain endpoint"
    );
    tracing::info!(
        path = %config.history.path.display(),
        undated_rows = ?config.history.undated_rows,
        "NAV log"
    );

    let state = AppState::from_config(&config).context("creating chain endpoint")?;

    serve(state, &config.server.addr()).await?;

    tracing::info!("NAV dashboard stopped");
    Ok(())
}
