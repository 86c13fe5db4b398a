//! Staking Transaction Builder
//!
//! Encodes calldata for the five mutating operations. Amount validation
//! happens here on smallest-unit integers; anything non-positive is refused
//! before a request exists.

use alloy_primitives::{Address, U256};
use alloy_sol_types::SolCall;
use evm_tx::TxRequest;
use garrison_core::ContractAddresses;

use crate::abi::{StakingPool, TestToken};
use crate::calculator::format_units;
use crate::constants::TOKEN_SYMBOL;
use crate::state::StakingError;

fn require_positive(amount: U256, what: &str) -> Result<(), StakingError> {
    if amount.is_zero() {
        return Err(StakingError::InvalidAmount(format!(
            "{} amount must be positive",
            what
        )));
    }
    Ok(())
}

/// Mint test tokens to the caller
pub fn mint_call(contracts: &ContractAddresses, amount: U256) -> Result<TxRequest, StakingError> {
    require_positive(amount, "mint")?;
    Ok(TxRequest::new(
        contracts.token,
        TestToken::mintCall { amount }.abi_encode(),
        format!("Mint {} {}", format_units(amount), TOKEN_SYMBOL),
    ))
}

/// Approve the staking pool to pull exactly `amount` from the caller.
///
/// Always the exact typed amount, never an unlimited allowance; staking more
/// than was previously approved requires a fresh approval.
pub fn approve_call(
    contracts: &ContractAddresses,
    amount: U256,
) -> Result<TxRequest, StakingError> {
    require_positive(amount, "approve")?;
    Ok(TxRequest::new(
        contracts.token,
        TestToken::approveCall {
            spender: contracts.staking,
            amount,
        }
        .abi_encode(),
        format!("Approve {} {}", format_units(amount), TOKEN_SYMBOL),
    ))
}

/// Stake tokens into the pool
pub fn stake_call(contracts: &ContractAddresses, amount: U256) -> Result<TxRequest, StakingError> {
    require_positive(amount, "stake")?;
    Ok(TxRequest::new(
        contracts.staking,
        StakingPool::stakeCall { amount }.abi_encode(),
        format!("Stake {} {}", format_units(amount), TOKEN_SYMBOL),
    ))
}

/// Withdraw staked tokens. No client-side cap against the current stake;
/// the contract is the source of truth and may reject.
pub fn unstake_call(
    contracts: &ContractAddresses,
    amount: U256,
) -> Result<TxRequest, StakingError> {
    require_positive(amount, "unstake")?;
    Ok(TxRequest::new(
        contracts.staking,
        StakingPool::unstakeCall { amount }.abi_encode(),
        format!("Unstake {} {}", format_units(amount), TOKEN_SYMBOL),
    ))
}

/// Claim accrued rewards. Takes no amount; callers gate on known positive
/// pending rewards before building the request.
pub fn claim_call(contracts: &ContractAddresses) -> TxRequest {
    TxRequest::new(
        contracts.staking,
        StakingPool::claimRewardsCall {}.abi_encode(),
        "Claim staking rewards".to_string(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::address;

    fn test_contracts() -> ContractAddresses {
        ContractAddresses {
            token: address!("5FbDB2315678afecb367f032d93F642f64180aa3"),
            staking: address!("e7f1725E7734CE288F8367e1Bb143E90bb3F0512"),
        }
    }

    fn units(n: u64) -> U256 {
        U256::from(n) * U256::from(10u64).pow(U256::from(18))
    }

    #[test]
    fn test_mint_call() {
        let contracts = test_contracts();
        let req = mint_call(&contracts, units(1000)).unwrap();

        assert_eq!(req.to, contracts.token);
        assert_eq!(&req.data[..4], TestToken::mintCall::SELECTOR);
        assert_eq!(req.description, "Mint 1000 MST");

        let decoded = TestToken::mintCall::abi_decode(&req.data, true).unwrap();
        assert_eq!(decoded.amount, units(1000));
    }

    #[test]
    fn test_approve_targets_token_with_staking_spender() {
        let contracts = test_contracts();
        let req = approve_call(&contracts, units(500)).unwrap();

        assert_eq!(req.to, contracts.token);
        let decoded = TestToken::approveCall::abi_decode(&req.data, true).unwrap();
        assert_eq!(decoded.spender, contracts.staking);
        // Exactly the requested amount, never unlimited
        assert_eq!(decoded.amount, units(500));
    }

    #[test]
    fn test_stake_and_unstake_target_pool() {
        let contracts = test_contracts();

        let stake = stake_call(&contracts, units(500)).unwrap();
        assert_eq!(stake.to, contracts.staking);
        assert_eq!(&stake.data[..4], StakingPool::stakeCall::SELECTOR);

        let unstake = unstake_call(&contracts, units(200)).unwrap();
        assert_eq!(unstake.to, contracts.staking);
        assert_eq!(&unstake.data[..4], StakingPool::unstakeCall::SELECTOR);
    }

    #[test]
    fn test_claim_call() {
        let contracts = test_contracts();
        let req = claim_call(&contracts);
        assert_eq!(req.to, contracts.staking);
        // claimRewards() takes no arguments
        assert_eq!(req.data.len(), 4);
    }

    #[test]
    fn test_zero_amounts_refused() {
        let contracts = test_contracts();
        assert!(matches!(
            mint_call(&contracts, U256::ZERO),
            Err(StakingError::InvalidAmount(_))
        ));
        assert!(matches!(
            approve_call(&contracts, U256::ZERO),
            Err(StakingError::InvalidAmount(_))
        ));
        assert!(matches!(
            stake_call(&contracts, U256::ZERO),
            Err(StakingError::InvalidAmount(_))
        ));
        assert!(matches!(
            unstake_call(&contracts, U256::ZERO),
            Err(StakingError::InvalidAmount(_))
        ));
    }
}
