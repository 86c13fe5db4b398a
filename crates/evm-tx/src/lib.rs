//! evm-tx: Transaction request types and the wallet provider seam
//!
//! A `TxRequest` is a fully-encoded contract call (target + calldata) ready
//! to hand to whatever wallet capability signs and broadcasts it. The wallet
//! itself is external; this crate only defines the seam.

pub mod wallet;

use std::fmt;

use alloy_primitives::Address;
use serde::{Deserialize, Serialize};

pub use wallet::{WalletError, WalletProvider};

/// An encoded contract call awaiting signature and broadcast.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TxRequest {
    /// Target contract address
    pub to: Address,
    /// ABI-encoded calldata (selector + arguments)
    #[serde(with = "calldata_hex")]
    pub data: Vec<u8>,
    /// Human-readable summary, e.g. "Stake 500 MST"
    pub description: String,
}

impl TxRequest {
    pub fn new(to: Address, data: Vec<u8>, description: impl Into<String>) -> Self {
        Self {
            to,
            data,
            description: description.into(),
        }
    }

    /// Calldata as 0x-prefixed hex, the form JSON-RPC expects
    pub fn data_hex(&self) -> String {
        format!("0x{}", hex::encode(&self.data))
    }
}

impl fmt::Display for TxRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.description, self.to)
    }
}

mod calldata_hex {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(data: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format!("0x{}", hex::encode(data)))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let s = String::deserialize(deserializer)?;
        let stripped = s.strip_prefix("0x").unwrap_or(&s);
        hex::decode(stripped).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::address;

    #[test]
    fn test_data_hex() {
        let req = TxRequest::new(
            address!("5FbDB2315678afecb367f032d93F642f64180aa3"),
            vec![0xa6, 0x94, 0xfc, 0x3a],
            "Stake 1 MST",
        );
        assert_eq!(req.data_hex(), "0xa694fc3a");
    }

    #[test]
    fn test_serde_roundtrip() {
        let req = TxRequest::new(
            address!("e7f1725E7734CE288F8367e1Bb143E90bb3F0512"),
            vec![0x37, 0x25, 0x00, 0xab],
            "Claim rewards",
        );
        let json = serde_json::to_string(&req).unwrap();
        assert!(json.contains("0x372500ab"));

        let parsed: TxRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.to, req.to);
        assert_eq!(parsed.data, req.data);
    }
}
