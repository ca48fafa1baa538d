//! Chain Reader
//!
//! Reads the live state of the fund's token contract: NAV, total supply,
//! name and symbol. All reads are view calls; nothing here sends a
//! transaction.
//!
//! ## Modules
//!
//! - [`abi`]: Selectors and return-data decoding for the four view functions
//! - [`client`]: JSON-RPC endpoint and the per-render reader
//! - [`types`]: Contract address and the [`ContractView`] snapshot

pub mod abi;
pub mod client;
pub mod error;
pub mod types;

pub use abi::ViewFunction;
pub use client::{BlockTag, ChainEndpoint, ChainReader};
pub use error::{ChainError, ChainResult};
pub use types::{ContractAddress, ContractView, TOKEN_DECIMALS};

use async_trait::async_trait;

/// Source of contract snapshots.
///
/// The server holds one of these and asks it for a fresh [`ContractView`]
/// on every render.
#[async_trait]
pub trait ChainSource: Send + Sync {
    /// Read the current contract state
    async fn fetch_view(&self) -> ChainResult<ContractView>;

    /// Address of the contract being read
    fn contract_address(&self) -> ContractAddress;
}
