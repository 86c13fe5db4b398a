//! Token Staking Protocol Implementation
//!
//! A single-token staking pool: users mint the test token, approve the pool
//! to spend it, stake it, accrue rewards at the pool's published rate, and
//! claim or unstake at will. This crate covers the read side (snapshots),
//! the pure derivations the dashboard renders, and the calldata builders for
//! the five mutating operations.

pub mod abi;
pub mod calculator;
pub mod constants;
pub mod fetch;
pub mod state;
pub mod tx_builder;

// Re-exports
pub use calculator::{
    compute_apy, compute_pool_share, derive_view, format_units, needs_approval, parse_units,
};
pub use constants::{builtin_contracts, chain_name, resolve_contracts, TOKEN_SYMBOL};
pub use fetch::{
    fetch_account_snapshot, fetch_allowance, fetch_pool_snapshot, fetch_staker_info,
    fetch_token_balance,
};
pub use state::{AccountSnapshot, DerivedView, PoolSnapshot, StakerInfo, StakingError};
pub use tx_builder::{approve_call, claim_call, mint_call, stake_call, unstake_call};
