//! Data Transfer Objects for API requests and responses

use alloy_primitives::{Address, U256};
use serde::{Deserialize, Serialize};
use staking::{AccountSnapshot, DerivedView, PoolSnapshot};

use crate::tracker::OpStatus;

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "ok".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Generic API error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    pub code: String,
    pub message: String,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new("internal_error", message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new("bad_request", message)
    }
}

/// Node status response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeStatusResponse {
    pub connected: bool,
    pub url: String,
    pub chain_id: Option<u64>,
    pub chain_name: Option<String>,
    pub block_height: Option<u64>,
    pub latency_ms: Option<u64>,
}

/// Node configuration request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeConfigRequest {
    pub url: String,
}

/// Contract registration request for one chain
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterContractsRequest {
    pub chain_id: u64,
    pub token: Address,
    pub staking: Address,
}

/// Wallet connect request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectWalletRequest {
    /// 0x-prefixed EVM account address
    pub address: String,
}

/// Wallet status response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletStatusResponse {
    pub connected: bool,
    pub address: Option<String>,
    pub chain_id: Option<u64>,
    pub chain_name: Option<String>,
    /// Whether the active chain has configured contracts
    pub supported: Option<bool>,
}

/// Amount-carrying operation request (mint/approve/stake/unstake)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmountRequest {
    /// User-typed decimal token amount, e.g. "500.25"
    pub amount: String,
}

/// Accepted-submission response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitResponse {
    pub tx_hash: String,
}

/// Query parameters for the dashboard view
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardQuery {
    /// Amount currently typed into the stake field; drives needsApproval
    #[serde(default)]
    pub stake_amount: Option<String>,
}

/// Full dashboard response: derived view, raw snapshots, operation statuses
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    pub account: String,
    pub chain_id: u64,
    pub supported: bool,
    pub derived: DerivedView,
    /// Raw smallest-unit snapshots; None while not yet loaded
    pub account_snapshot: Option<AccountSnapshot>,
    pub pool_snapshot: Option<PoolSnapshot>,
    pub allowance: Option<U256>,
    pub operations: Vec<OpStatus>,
}
