//! Read-only chain access
//!
//! `ChainReader` is the surface the state reader and confirmation watcher
//! depend on. The real node client implements it; tests implement it over
//! in-memory chain state.

use alloy_primitives::Address;
use async_trait::async_trait;
use garrison_core::{BlockNumber, ChainId, NodeError, TxHash};
use serde::{Deserialize, Serialize};

use crate::EvmNodeClient;

/// A mined transaction's outcome
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TxReceipt {
    pub tx_hash: TxHash,
    pub block_number: BlockNumber,
    /// false means the transaction was mined but reverted
    pub succeeded: bool,
}

/// Read-only queries against the active chain.
///
/// All methods are idempotent and side-effect free; they may be retried
/// freely and may be in flight concurrently with no ordering guarantee.
#[async_trait]
pub trait ChainReader: Send + Sync {
    /// The chain id the node is currently serving
    async fn chain_id(&self) -> Result<ChainId, NodeError>;

    /// Execute a read-only contract call against the latest block
    async fn call(&self, to: Address, data: Vec<u8>) -> Result<Vec<u8>, NodeError>;

    /// Fetch the receipt for a transaction, None while still pending
    async fn transaction_receipt(&self, tx_hash: &TxHash) -> Result<Option<TxReceipt>, NodeError>;
}

#[async_trait]
impl ChainReader for EvmNodeClient {
    async fn chain_id(&self) -> Result<ChainId, NodeError> {
        EvmNodeClient::chain_id(self).await
    }

    async fn call(&self, to: Address, data: Vec<u8>) -> Result<Vec<u8>, NodeError> {
        EvmNodeClient::call(self, to, &data).await
    }

    async fn transaction_receipt(&self, tx_hash: &TxHash) -> Result<Option<TxReceipt>, NodeError> {
        EvmNodeClient::transaction_receipt(self, tx_hash).await
    }
}
