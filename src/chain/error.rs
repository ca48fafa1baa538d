//! Chain reader error types

use thiserror::Error;

/// Errors that can occur while reading contract state from the RPC node
#[derive(Error, Debug)]
pub enum ChainError {
    /// Node unreachable or the connection dropped
    #[error("RPC transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Node did not answer within the configured timeout
    #[error("RPC request timed out")]
    Timeout,

    /// Node answered with a non-success HTTP status
    #[error("RPC endpoint returned HTTP {status}")]
    Http { status: u16 },

    /// JSON-RPC error object (includes contract reverts)
    #[error("RPC error {code}: {message}")]
    Rpc { code: i64, message: String },

    /// Result could not be decoded against the expected ABI type
    #[error("Malformed RPC result: {0}")]
    Decode(String),

    /// Contract address is not a valid 20-byte hex address
    #[error("Invalid contract address: {0}")]
    InvalidAddress(String),

    /// A fixed-point amount does not fit in a decimal
    #[error("Amount {0} is too large to represent as a decimal")]
    AmountOverflow(String),
}

impl ChainError {
    /// Classify a reqwest failure the way the node client reports it
    pub fn from_request(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ChainError::Timeout
        } else if err.is_decode() {
            ChainError::Decode(format!("response is not a JSON-RPC envelope: {}", err))
        } else {
            ChainError::Transport(err)
        }
    }
}

/// Result type alias for chain operations
pub type ChainResult<T> = Result<T, ChainError>;
