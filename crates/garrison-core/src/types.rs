//! Core type definitions for Garrison

use std::fmt;

use serde::{Deserialize, Serialize};

/// Transaction hash (32 bytes, 0x-prefixed hex)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TxHash(pub String);

impl TxHash {
    pub fn new(hash: impl Into<String>) -> Self {
        Self(hash.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check that this looks like a 32-byte transaction hash
    pub fn is_well_formed(&self) -> bool {
        let Some(hex_part) = self.0.strip_prefix("0x") else {
            return false;
        };
        hex_part.len() == 64 && hex_part.chars().all(|c| c.is_ascii_hexdigit())
    }
}

impl fmt::Display for TxHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// EVM chain identifier (from eth_chainId)
pub type ChainId = u64;

/// Block number
pub type BlockNumber = u64;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tx_hash_well_formed() {
        let hash = TxHash::new(
            "0x88df016429689c079f3b2f6ad39fa052532c56795b733da78a91ebe6a713944b",
        );
        assert!(hash.is_well_formed());

        assert!(!TxHash::new("88df016429689c079f3b2f6ad39fa052532c56795b733da78a91ebe6a713944b")
            .is_well_formed());
        assert!(!TxHash::new("0x1234").is_well_formed());
        assert!(!TxHash::new("0xzz").is_well_formed());
    }

    #[test]
    fn test_tx_hash_display() {
        let hash = TxHash::new("0xabc");
        assert_eq!(hash.to_string(), "0xabc");
        assert_eq!(hash.as_str(), "0xabc");
    }
}
