//! State Reader
//!
//! Read-only queries against the token and staking contracts. All reads are
//! idempotent and side-effect free; callers may retry or interleave them
//! freely.

use alloy_primitives::{Address, U256};
use alloy_sol_types::SolCall;
use evm_node_client::ChainReader;
use garrison_core::ContractAddresses;

use crate::abi::{StakingPool, TestToken};
use crate::state::{AccountSnapshot, PoolSnapshot, StakerInfo, StakingError};

async fn call<C: SolCall>(
    reader: &dyn ChainReader,
    to: Address,
    call: C,
) -> Result<C::Return, StakingError> {
    let data = call.abi_encode();
    let raw = reader
        .call(to, data)
        .await
        .map_err(|e| StakingError::NodeError(e.to_string()))?;
    C::abi_decode_returns(&raw, true).map_err(|e| StakingError::DecodeError(e.to_string()))
}

/// Token balance of an account, in smallest units
pub async fn fetch_token_balance(
    reader: &dyn ChainReader,
    token: Address,
    account: Address,
) -> Result<U256, StakingError> {
    let ret = call(reader, token, TestToken::balanceOfCall { account }).await?;
    Ok(ret._0)
}

/// Amount the spender is currently permitted to pull from the owner
pub async fn fetch_allowance(
    reader: &dyn ChainReader,
    token: Address,
    owner: Address,
    spender: Address,
) -> Result<U256, StakingError> {
    let ret = call(reader, token, TestToken::allowanceCall { owner, spender }).await?;
    Ok(ret._0)
}

/// Staked amount and pending rewards for an account.
///
/// Both words come back from a single eth_call, so the pair is consistent
/// at one block view.
pub async fn fetch_staker_info(
    reader: &dyn ChainReader,
    staking: Address,
    account: Address,
) -> Result<StakerInfo, StakingError> {
    let ret = call(reader, staking, StakingPool::getStakerInfoCall { staker: account }).await?;
    Ok(StakerInfo {
        staked_amount: ret.amountStaked,
        pending_rewards: ret.pendingRewards,
    })
}

/// Global pool totals.
///
/// totalStaked and rewardRate are two separate calls and may straddle a
/// block boundary; the pair feeds display derivations only.
pub async fn fetch_pool_snapshot(
    reader: &dyn ChainReader,
    staking: Address,
) -> Result<PoolSnapshot, StakingError> {
    let (total, rate) = tokio::join!(
        call(reader, staking, StakingPool::totalStakedCall {}),
        call(reader, staking, StakingPool::rewardRateCall {}),
    );

    Ok(PoolSnapshot {
        total_staked: total?._0,
        reward_rate: rate?._0,
    })
}

/// Assemble the per-account snapshot: balance and staker info concurrently
pub async fn fetch_account_snapshot(
    reader: &dyn ChainReader,
    contracts: &ContractAddresses,
    account: Address,
) -> Result<AccountSnapshot, StakingError> {
    let (balance, staker) = tokio::join!(
        fetch_token_balance(reader, contracts.token, account),
        fetch_staker_info(reader, contracts.staking, account),
    );

    let balance = balance?;
    let staker = staker?;

    tracing::debug!(
        %account,
        balance = %balance,
        staked = %staker.staked_amount,
        "Loaded account snapshot"
    );

    Ok(AccountSnapshot {
        token_balance: balance,
        staked_amount: staker.staked_amount,
        pending_rewards: staker.pending_rewards,
    })
}
