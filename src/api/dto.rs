//! Data Transfer Objects
//!
//! Response types for the health endpoints. The overview endpoint
//! serializes [`crate::presenter::Overview`] directly.

use serde::Serialize;

/// Full health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Overall status: healthy or degraded
    pub status: String,
    /// NAV log status: ok or missing
    pub history: String,
    /// Contract being read
    pub contract: String,
    /// Server uptime in seconds
    pub uptime_seconds: u64,
    /// Application version
    pub version: String,
}
