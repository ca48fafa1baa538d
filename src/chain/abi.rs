//! Contract ABI
//!
//! The token contract exposes four zero-argument view functions. Call data is
//! just the 4-byte selector; return data is either a single `uint256` word or
//! a dynamically encoded `string`.

use alloy_primitives::{hex, keccak256, U256};

use super::error::{ChainError, ChainResult};

const WORD: usize = 32;

/// A read-only contract function with no arguments
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewFunction {
    GetNav,
    TotalSupply,
    Name,
    Symbol,
}

impl ViewFunction {
    /// All functions the dashboard calls
    pub const ALL: [ViewFunction; 4] = [
        ViewFunction::GetNav,
        ViewFunction::TotalSupply,
        ViewFunction::Name,
        ViewFunction::Symbol,
    ];

    /// Canonical Solidity signature
    pub fn signature(&self) -> &'static str {
        match self {
            ViewFunction::GetNav => "getNAV()",
            ViewFunction::TotalSupply => "totalSupply()",
            ViewFunction::Name => "name()",
            ViewFunction::Symbol => "symbol()",
        }
    }

    /// First four bytes of keccak256(signature)
    pub fn selector(&self) -> [u8; 4] {
        let hash = keccak256(self.signature().as_bytes());
        [hash[0], hash[1], hash[2], hash[3]]
    }

    /// `0x`-prefixed call data for `eth_call`
    pub fn call_data(&self) -> String {
        format!("0x{}", hex::encode(self.selector()))
    }
}

/// Decode a `0x`-prefixed hex result string into raw bytes
pub fn decode_hex_result(result: &str) -> ChainResult<Vec<u8>> {
    let digits = result
        .strip_prefix("0x")
        .ok_or_else(|| ChainError::Decode(format!("result is not 0x-prefixed: {}", result)))?;

    let bytes =
        hex::decode(digits).map_err(|e| ChainError::Decode(format!("invalid hex: {}", e)))?;

    if bytes.is_empty() {
        // Calls to an address without the function return no data at all
        return Err(ChainError::Decode(
            "empty return data (function missing or not a contract)".to_string(),
        ));
    }

    Ok(bytes)
}

/// Decode a single `uint256` return value
pub fn decode_uint256(data: &[u8]) -> ChainResult<U256> {
    let word = data
        .get(..WORD)
        .ok_or_else(|| ChainError::Decode(format!("uint256 needs 32 bytes, got {}", data.len())))?;
    Ok(U256::from_be_slice(word))
}

/// Decode a dynamically encoded `string` return value
pub fn decode_string(data: &[u8]) -> ChainResult<String> {
    let offset = word_as_usize(data, 0)?;
    let len = word_as_usize(data, offset)?;

    let start = offset
        .checked_add(WORD)
        .ok_or_else(|| ChainError::Decode("string offset overflows".to_string()))?;
    let end = start
        .checked_add(len)
        .ok_or_else(|| ChainError::Decode("string length overflows".to_string()))?;

    let bytes = data.get(start..end).ok_or_else(|| {
        ChainError::Decode(format!(
            "string of {} bytes at offset {} exceeds {} bytes of return data",
            len,
            offset,
            data.len()
        ))
    })?;

    String::from_utf8(bytes.to_vec())
        .map_err(|e| ChainError::Decode(format!("string is not UTF-8: {}", e)))
}

/// Read the 32-byte word at `at` as an offset or length
fn word_as_usize(data: &[u8], at: usize) -> ChainResult<usize> {
    let end = at
        .checked_add(WORD)
        .ok_or_else(|| ChainError::Decode("word position overflows".to_string()))?;
    let word = data
        .get(at..end)
        .ok_or_else(|| ChainError::Decode(format!("no 32-byte word at offset {}", at)))?;

    let (high, low) = word.split_at(WORD - 8);
    if high.iter().any(|b| *b != 0) {
        return Err(ChainError::Decode(format!("word at offset {} is too large", at)));
    }

    let mut buf = [0u8; 8];
    buf.copy_from_slice(low);
    usize::try_from(u64::from_be_bytes(buf))
        .map_err(|_| ChainError::Decode(format!("word at offset {} is too large", at)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode_string(s: &str) -> Vec<u8> {
        let mut out = vec![0u8; 64];
        out[31] = 0x20;
        out[63] = s.len() as u8;
        out.extend_from_slice(s.as_bytes());
        let padded = (s.len() + 31) / 32 * 32;
        out.resize(64 + padded, 0);
        out
    }

    #[test]
    fn test_selectors() {
        assert_eq!(ViewFunction::TotalSupply.call_data(), "0x18160ddd");
        assert_eq!(ViewFunction::Name.call_data(), "0x06fdde03");
        assert_eq!(ViewFunction::Symbol.call_data(), "0x95d89b41");
        assert_eq!(ViewFunction::GetNav.call_data(), "0x0126c606");

        for function in ViewFunction::ALL {
            assert_eq!(function.call_data().len(), 10);
        }
    }

    #[test]
    fn test_decode_uint256() {
        let mut data = vec![0u8; 32];
        data[31] = 0x2a;
        assert_eq!(decode_uint256(&data).unwrap(), U256::from(42u64));

        let short = vec![0u8; 31];
        assert!(matches!(decode_uint256(&short), Err(ChainError::Decode(_))));
    }

    #[test]
    fn test_decode_nav_from_hex() {
        // 1.2345 * 10^18
        let hex_result = format!("0x{:064x}", 1_234_500_000_000_000_000u64);
        let bytes = decode_hex_result(&hex_result).unwrap();
        assert_eq!(
            decode_uint256(&bytes).unwrap(),
            U256::from(1_234_500_000_000_000_000u64)
        );
    }

    #[test]
    fn test_decode_string() {
        let data = encode_string("Fund NAV Token");
        assert_eq!(decode_string(&data).unwrap(), "Fund NAV Token");

        let empty = encode_string("");
        assert_eq!(decode_string(&empty).unwrap(), "");
    }

    #[test]
    fn test_decode_string_truncated() {
        let mut data = encode_string("FNQT");
        data.truncate(64 + 2);
        assert!(matches!(decode_string(&data), Err(ChainError::Decode(_))));
    }

    #[test]
    fn test_decode_string_huge_offset() {
        let mut data = encode_string("FNQT");
        data[0] = 0xff;
        assert!(matches!(decode_string(&data), Err(ChainError::Decode(_))));
    }

    #[test]
    fn test_empty_result_is_error() {
        assert!(matches!(decode_hex_result("0x"), Err(ChainError::Decode(_))));
        assert!(matches!(decode_hex_result("deadbeef"), Err(ChainError::Decode(_))));
    }
}
