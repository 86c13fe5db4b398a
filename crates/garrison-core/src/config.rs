//! Configuration types for Garrison

use std::collections::BTreeMap;

use alloy_primitives::Address;
use serde::{Deserialize, Serialize};

use crate::ChainId;

/// EVM node connection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcConfig {
    /// JSON-RPC endpoint (e.g., "http://127.0.0.1:8545")
    pub url: String,
}

impl Default for RpcConfig {
    fn default() -> Self {
        Self {
            url: "http://127.0.0.1:8545".to_string(),
        }
    }
}

/// Token and staking contract addresses for one chain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractAddresses {
    pub token: Address,
    pub staking: Address,
}

/// Chain id -> contract addresses, supplied by configuration.
///
/// A chain id with no entry (and no built-in default) is unsupported:
/// no reads are issued and all actions are refused for it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContractRegistry {
    entries: BTreeMap<ChainId, ContractAddresses>,
}

impl ContractRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, chain_id: ChainId) -> Option<&ContractAddresses> {
        self.entries.get(&chain_id)
    }

    pub fn register(&mut self, chain_id: ChainId, contracts: ContractAddresses) {
        self.entries.insert(chain_id, contracts);
    }

    pub fn chain_ids(&self) -> impl Iterator<Item = ChainId> + '_ {
        self.entries.keys().copied()
    }
}

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Node connection settings
    pub rpc: RpcConfig,

    /// Configured contract addresses per chain
    #[serde(default)]
    pub contracts: ContractRegistry,

    /// API server port
    #[serde(default = "default_api_port")]
    pub api_port: u16,
}

fn default_api_port() -> u16 {
    18545
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            rpc: RpcConfig::default(),
            contracts: ContractRegistry::default(),
            api_port: default_api_port(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::address;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.rpc.url, "http://127.0.0.1:8545");
        assert_eq!(config.api_port, 18545);
        assert!(config.contracts.get(31337).is_none());
    }

    #[test]
    fn test_registry_register_and_lookup() {
        let mut registry = ContractRegistry::new();
        let contracts = ContractAddresses {
            token: address!("5FbDB2315678afecb367f032d93F642f64180aa3"),
            staking: address!("e7f1725E7734CE288F8367e1Bb143E90bb3F0512"),
        };
        registry.register(31337, contracts);

        assert_eq!(registry.get(31337), Some(&contracts));
        assert!(registry.get(1).is_none());
        assert_eq!(registry.chain_ids().collect::<Vec<_>>(), vec![31337]);
    }

    #[test]
    fn test_config_serialization() {
        let mut config = AppConfig::default();
        config.contracts.register(
            31337,
            ContractAddresses {
                token: address!("5FbDB2315678afecb367f032d93F642f64180aa3"),
                staking: address!("e7f1725E7734CE288F8367e1Bb143E90bb3F0512"),
            },
        );

        let json = serde_json::to_string(&config).unwrap();
        let parsed: AppConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.rpc.url, config.rpc.url);
        assert_eq!(parsed.contracts.get(31337), config.contracts.get(31337));
    }
}
