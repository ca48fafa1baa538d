//! Chain data types
//!
//! Contract address handling and the per-render snapshot of contract state.

use alloy_primitives::{Address, U256};
use rust_decimal::Decimal;
use std::fmt;
use std::str::FromStr;

use super::error::{ChainError, ChainResult};

/// Decimals of the token's fixed-point values (NAV and supply)
pub const TOKEN_DECIMALS: u32 = 18;

/// 10^18
const UNIT: U256 = U256::from_limbs([1_000_000_000_000_000_000, 0, 0, 0]);
const HALF_UNIT: U256 = U256::from_limbs([500_000_000_000_000_000, 0, 0, 0]);

/// Validated contract address
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContractAddress(Address);

impl ContractAddress {
    /// Parse a `0x`-prefixed hex address.
    ///
    /// All-lowercase and all-uppercase inputs are accepted as-is. Mixed-case
    /// input is treated as EIP-55 and must carry a valid checksum.
    pub fn parse(input: &str) -> ChainResult<Self> {
        let trimmed = input.trim();
        let digits = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .ok_or_else(|| ChainError::InvalidAddress(format!("{} (missing 0x prefix)", input)))?;

        if digits.len() != 40 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ChainError::InvalidAddress(format!(
                "{} (expected 40 hex digits)",
                input
            )));
        }

        let normalized = format!("0x{}", digits);
        let has_lower = digits.chars().any(|c| c.is_ascii_lowercase());
        let has_upper = digits.chars().any(|c| c.is_ascii_uppercase());

        let address = if has_lower && has_upper {
            Address::parse_checksummed(&normalized, None)
                .map_err(|e| ChainError::InvalidAddress(format!("{} ({})", input, e)))?
        } else {
            Address::from_str(&normalized)
                .map_err(|e| ChainError::InvalidAddress(format!("{} ({})", input, e)))?
        };

        Ok(Self(address))
    }

    /// EIP-55 checksummed representation
    pub fn checksummed(&self) -> String {
        self.0.to_checksum(None)
    }
}

impl fmt::Display for ContractAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.checksummed())
    }
}

/// Snapshot of contract state taken during a single render
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractView {
    /// NAV per token, 18-decimal fixed point
    pub nav_raw: U256,
    /// Total supply, 18-decimal fixed point
    pub total_supply_raw: U256,
    pub name: String,
    pub symbol: String,
    /// Block the four reads were pinned to, if pinning was enabled
    pub block: Option<u64>,
}

impl ContractView {
    /// nav_raw / 10^18
    pub fn nav(&self) -> ChainResult<Decimal> {
        fixed_point_to_decimal(self.nav_raw)
    }

    /// total_supply_raw / 10^18
    pub fn total_supply(&self) -> ChainResult<Decimal> {
        fixed_point_to_decimal(self.total_supply_raw)
    }

    /// Total supply in whole tokens, rounded half-up
    pub fn total_supply_whole(&self) -> U256 {
        round_to_whole_units(self.total_supply_raw)
    }
}

/// Convert an 18-decimal fixed-point integer to a decimal.
///
/// Decimal mantissas are 96 bits wide, which covers values up to roughly
/// 7.9 * 10^10 whole tokens.
pub fn fixed_point_to_decimal(raw: U256) -> ChainResult<Decimal> {
    if raw.bit_len() > 96 {
        return Err(ChainError::AmountOverflow(raw.to_string()));
    }

    let limbs = raw.as_limbs();
    let mantissa = i128::from(limbs[0]) | (i128::from(limbs[1]) << 64);

    Decimal::try_from_i128_with_scale(mantissa, TOKEN_DECIMALS)
        .map_err(|_| ChainError::AmountOverflow(raw.to_string()))
}

/// Whole units of an 18-decimal fixed-point integer, rounded half-up
pub fn round_to_whole_units(raw: U256) -> U256 {
    let whole = raw / UNIT;
    if raw % UNIT >= HALF_UNIT {
        whole + U256::from(1u64)
    } else {
        whole
    }
}
