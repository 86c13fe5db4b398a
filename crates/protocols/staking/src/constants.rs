//! Chain and contract constants

use alloy_primitives::address;
use garrison_core::{ChainId, ContractAddresses, ContractRegistry};

/// The token's fixed decimal scaling
pub const TOKEN_DECIMALS: u32 = 18;

/// Display symbol for the test token
pub const TOKEN_SYMBOL: &str = "MST";

/// The staking contract publishes its annual reward rate scaled such that
/// dividing by 100 yields a percentage (500 -> 5%). Fixed by the deployed
/// contract; must not drift from it.
pub const REWARD_RATE_DIVISOR: f64 = 100.0;

/// Hardhat/anvil local chain
pub const HARDHAT_CHAIN_ID: ChainId = 31337;

/// Sepolia testnet
pub const SEPOLIA_CHAIN_ID: ChainId = 11_155_111;

/// Built-in contract addresses for chains with deterministic deployments.
///
/// On a fresh hardhat node the deploy script creates the token first and the
/// staking pool second from the default deployer account, which pins both
/// addresses. Other chains must be registered through configuration.
pub fn builtin_contracts(chain_id: ChainId) -> Option<ContractAddresses> {
    match chain_id {
        HARDHAT_CHAIN_ID => Some(ContractAddresses {
            token: address!("5FbDB2315678afecb367f032d93F642f64180aa3"),
            staking: address!("e7f1725E7734CE288F8367e1Bb143E90bb3F0512"),
        }),
        _ => None,
    }
}

/// Human-readable chain name for known ids
pub fn chain_name(chain_id: ChainId) -> Option<&'static str> {
    match chain_id {
        HARDHAT_CHAIN_ID => Some("hardhat"),
        SEPOLIA_CHAIN_ID => Some("sepolia"),
        1 => Some("mainnet"),
        _ => None,
    }
}

/// Resolve contract addresses for a chain: configured entries win over
/// built-ins. None means the chain is unsupported — callers must surface
/// that explicitly, never fall back to another chain's addresses.
pub fn resolve_contracts(
    registry: &ContractRegistry,
    chain_id: ChainId,
) -> Option<ContractAddresses> {
    registry
        .get(chain_id)
        .copied()
        .or_else(|| builtin_contracts(chain_id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_hardhat() {
        let contracts = builtin_contracts(HARDHAT_CHAIN_ID).unwrap();
        assert_ne!(contracts.token, contracts.staking);
        assert!(builtin_contracts(SEPOLIA_CHAIN_ID).is_none());
        assert!(builtin_contracts(999).is_none());
    }

    #[test]
    fn test_resolve_prefers_registry() {
        let mut registry = ContractRegistry::new();
        let override_set = ContractAddresses {
            token: address!("0000000000000000000000000000000000000001"),
            staking: address!("0000000000000000000000000000000000000002"),
        };
        registry.register(HARDHAT_CHAIN_ID, override_set);

        assert_eq!(
            resolve_contracts(&registry, HARDHAT_CHAIN_ID),
            Some(override_set)
        );

        // Built-in still reachable with an empty registry
        let empty = ContractRegistry::new();
        assert_eq!(
            resolve_contracts(&empty, HARDHAT_CHAIN_ID),
            builtin_contracts(HARDHAT_CHAIN_ID)
        );

        // Unknown chain resolves to nothing
        assert!(resolve_contracts(&empty, 424242).is_none());
    }

    #[test]
    fn test_chain_names() {
        assert_eq!(chain_name(HARDHAT_CHAIN_ID), Some("hardhat"));
        assert_eq!(chain_name(SEPOLIA_CHAIN_ID), Some("sepolia"));
        assert_eq!(chain_name(5), None);
    }
}
