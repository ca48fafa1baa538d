//! Application State
//!
//! Shared state accessible by all handlers. It carries configuration and the
//! chain source only; no render result is kept between requests.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use crate::chain::{ChainEndpoint, ChainResult, ChainSource, ContractAddress};
use crate::config::Config;
use crate::history::UndatedPolicy;
use crate::presenter::PresenterConfig;

/// Shared application state for all handlers
#[derive(Clone)]
pub struct AppState {
    /// Source of fresh contract snapshots
    pub chain: Arc<dyn ChainSource>,
    /// NAV log location
    pub history_path: PathBuf,
    /// Handling of rows with unparseable dates
    pub undated_policy: UndatedPolicy,
    /// Page layout
    pub presenter: Arc<PresenterConfig>,
    /// Server start time for uptime tracking
    pub start_time: Instant,
}

impl AppState {
    pub fn new(
        chain: Arc<dyn ChainSource>,
        history_path: impl Into<PathBuf>,
        undated_policy: UndatedPolicy,
        presenter: PresenterConfig,
    ) -> Self {
        Self {
            chain,
            history_path: history_path.into(),
            undated_policy,
            presenter: Arc::new(presenter),
            start_time: Instant::now(),
        }
    }

    /// Build state backed by the configured JSON-RPC endpoint
    pub fn from_config(config: &Config) -> ChainResult<Self> {
        let contract = ContractAddress::parse(&config.chain.contract_address)?;
        let endpoint = ChainEndpoint::new(
            config.chain.rpc_url.clone(),
            contract,
            config.chain.request_timeout(),
            config.chain.pin_block,
        )?;

        Ok(Self::new(
            Arc::new(endpoint),
            config.history.path.clone(),
            config.history.undated_rows,
            PresenterConfig::from_config(&config.dashboard, &config.chain),
        ))
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
