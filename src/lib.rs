//! # NAV Dashboard
//!
//! A single-page dashboard for a tokenised fund: the live on-chain NAV and
//! supply of the fund's token, next to its historical NAV log.
//!
//! ## Modules
//!
//! - [`chain`]: JSON-RPC reader for the token contract
//! - [`history`]: NAV log loader with explicit handling of undated rows
//! - [`presenter`]: Overview model, SVG chart and HTML page
//! - [`api`]: HTTP server with Axum
//! - [`config`]: TOML configuration with environment overrides
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use nav_dashboard::chain::{ChainEndpoint, ChainSource, ContractAddress};
//! use nav_dashboard::history::{HistoryLoader, UndatedPolicy};
//! use nav_dashboard::presenter::{Overview, PresenterConfig};
//! use std::path::Path;
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let contract = ContractAddress::parse("0xfD5a2488f3ea1F61FF462730B14f57a108a7f9eC")?;
//!     let endpoint = ChainEndpoint::new(
//!         "https://polygon-rpc.com",
//!         contract,
//!         Duration::from_secs(30),
//!         true,
//!     )?;
//!
//!     let view = endpoint.fetch_view().await?;
//!     let history = HistoryLoader::new().load(Path::new("nav_log.csv"))?;
//!     let (history, excluded) = history.apply_policy(UndatedPolicy::Exclude)?;
//!
//!     let overview =
//!         Overview::build(&view, &history, &contract, excluded, &PresenterConfig::default())?;
//!     println!("NAV {} / supply {}", overview.nav_display, overview.total_supply_display);
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod chain;
pub mod config;
pub mod history;
pub mod logging;
pub mod presenter;

// Re-export top-level types for convenience
pub use chain::{
    ChainEndpoint, ChainError, ChainReader, ChainResult, ChainSource, ContractAddress,
    ContractView,
};

pub use history::{
    HistoryError, HistoryLoader, HistoryResult, NavHistory, NavRecord, ParsedDate, UndatedPolicy,
};

pub use presenter::{HistoryRow, Overview, PresenterConfig};

pub use api::{build_router, serve, ApiError, AppState};

pub use config::{Config, ConfigError};
