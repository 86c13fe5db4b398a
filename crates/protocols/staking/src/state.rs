//! Staking Dashboard State Types
//!
//! Snapshot structures for account and pool state, the derived view the
//! presentation layer renders, and errors.

use alloy_primitives::U256;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Per-account on-chain state, all amounts in smallest units.
///
/// Replaced wholesale on every reload, never partially mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountSnapshot {
    pub token_balance: U256,
    pub staked_amount: U256,
    pub pending_rewards: U256,
}

/// The two words `getStakerInfo` returns, read at one block-consistent view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StakerInfo {
    pub staked_amount: U256,
    pub pending_rewards: U256,
}

/// Global pool state, independent of any account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolSnapshot {
    pub total_staked: U256,
    /// Annual rate scaled such that rate / 100 is a percentage
    pub reward_rate: U256,
}

/// Presentation-independent values derived from the snapshots.
///
/// Pure function of account + pool + allowance + the typed stake amount;
/// recomputed on every request, never cached. Unknown inputs render as zero
/// placeholders in the decimal strings, but the boolean gates
/// (`needs_approval`, `claimable`) treat unknown as unknown, never as zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedView {
    pub token_balance: String,
    pub staked_amount: String,
    pub pending_rewards: String,
    pub total_staked: String,
    pub apy_percent: f64,
    pub pool_share_percent: f64,
    pub needs_approval: bool,
    pub claimable: bool,
}

/// Staking protocol errors
#[derive(Debug, Error)]
pub enum StakingError {
    #[error("Chain {0} has no configured staking contracts")]
    ChainNotSupported(u64),

    #[error("Node error: {0}")]
    NodeError(String),

    #[error("Failed to decode contract response: {0}")]
    DecodeError(String),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Action not allowed: {0}")]
    ActionNotAllowed(String),
}
