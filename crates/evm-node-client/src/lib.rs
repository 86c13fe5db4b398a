//! evm-node-client: JSON-RPC client for EVM nodes
//!
//! This crate provides a high-level client for talking to an EVM node over
//! JSON-RPC 2.0: read-only contract calls, chain/block queries, transaction
//! receipts, and submission through the node's own accounts (dev chains).

pub mod reader;
pub mod wallet;

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use alloy_primitives::Address;
use garrison_core::{BlockNumber, ChainId, NodeError, RpcConfig, TxHash};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

pub use reader::{ChainReader, TxReceipt};
pub use wallet::NodeWallet;

/// Default timeout for node RPC calls (10 seconds).
/// Long enough for a congested dev node, short enough to avoid perpetual spinners.
const RPC_REQUEST_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(10);

/// Result type for node client operations
pub type Result<T> = std::result::Result<T, NodeError>;

/// High-level EVM node client
#[derive(Clone)]
pub struct EvmNodeClient {
    http: reqwest::Client,
    config: RpcConfig,
    next_id: Arc<AtomicU64>,
}

impl EvmNodeClient {
    /// Create a new node client and verify the node is reachable
    pub async fn new(config: RpcConfig) -> Result<Self> {
        let client = Self::new_without_probe(config)?;

        // Initial reachability check
        let chain_id = client.chain_id().await.map_err(|e| NodeError::Unreachable {
            url: format!("{}: {}", client.config.url, e),
        })?;
        tracing::debug!(chain_id, url = %client.config.url, "Node client connected");

        Ok(client)
    }

    /// Create without probing (for testing or when the node may be offline)
    pub fn new_without_probe(config: RpcConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(RPC_REQUEST_TIMEOUT)
            .build()
            .map_err(|e| NodeError::RpcError {
                message: format!("Failed to build HTTP client: {}", e),
            })?;

        Ok(Self {
            http,
            config,
            next_id: Arc::new(AtomicU64::new(1)),
        })
    }

    /// Get the current node configuration
    pub fn config(&self) -> &RpcConfig {
        &self.config
    }

    /// Perform a raw JSON-RPC request and unwrap the `result` field
    async fn rpc(&self, method: &str, params: Value) -> Result<Value> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let body = json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": method,
            "params": params,
        });

        let response = self
            .http
            .post(&self.config.url)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    NodeError::Timeout {
                        secs: RPC_REQUEST_TIMEOUT.as_secs(),
                    }
                } else if e.is_connect() {
                    NodeError::Unreachable {
                        url: self.config.url.clone(),
                    }
                } else {
                    NodeError::RpcError {
                        message: e.to_string(),
                    }
                }
            })?;

        let json: Value = response.json().await.map_err(|e| NodeError::ParseError(format!(
            "Invalid JSON-RPC response: {}",
            e
        )))?;

        if let Some(error) = json.get("error") {
            let message = error["message"]
                .as_str()
                .map(|s| s.to_string())
                .unwrap_or_else(|| error.to_string());
            return Err(NodeError::RpcError { message });
        }

        json.get("result").cloned().ok_or_else(|| {
            NodeError::ParseError("JSON-RPC response missing result".to_string())
        })
    }

    /// Get the chain id (eth_chainId)
    pub async fn chain_id(&self) -> Result<ChainId> {
        let result = self.rpc("eth_chainId", json!([])).await?;
        parse_quantity(&result)
    }

    /// Get the latest block number (eth_blockNumber)
    pub async fn block_number(&self) -> Result<BlockNumber> {
        let result = self.rpc("eth_blockNumber", json!([])).await?;
        parse_quantity(&result)
    }

    /// Check if node is online
    pub async fn is_online(&self) -> bool {
        self.chain_id().await.is_ok()
    }

    /// Execute a read-only contract call against the latest block (eth_call)
    pub async fn call(&self, to: Address, data: &[u8]) -> Result<Vec<u8>> {
        let result = self
            .rpc(
                "eth_call",
                json!([{
                    "to": to.to_string(),
                    "data": format!("0x{}", hex::encode(data)),
                }, "latest"]),
            )
            .await?;
        parse_bytes(&result)
    }

    /// Fetch the receipt for a transaction, if it has been mined
    /// (eth_getTransactionReceipt returns null while pending)
    pub async fn transaction_receipt(&self, tx_hash: &TxHash) -> Result<Option<TxReceipt>> {
        let result = self
            .rpc("eth_getTransactionReceipt", json!([tx_hash.as_str()]))
            .await?;

        if result.is_null() {
            return Ok(None);
        }

        let block_number = parse_quantity(&result["blockNumber"])?;
        // status is "0x1" on success, "0x0" on revert
        let status: u64 = parse_quantity(&result["status"])?;

        Ok(Some(TxReceipt {
            tx_hash: tx_hash.clone(),
            block_number,
            succeeded: status == 1,
        }))
    }

    /// Sign and broadcast a transaction through a node-managed account
    /// (eth_sendTransaction; works against dev nodes with unlocked accounts)
    pub async fn send_transaction(
        &self,
        from: Address,
        to: Address,
        data: &[u8],
    ) -> Result<TxHash> {
        let result = self
            .rpc(
                "eth_sendTransaction",
                json!([{
                    "from": from.to_string(),
                    "to": to.to_string(),
                    "data": format!("0x{}", hex::encode(data)),
                }]),
            )
            .await?;

        let hash = result.as_str().ok_or_else(|| {
            NodeError::ParseError("eth_sendTransaction did not return a hash".to_string())
        })?;

        Ok(TxHash::new(hash))
    }

    /// List accounts managed by the node (eth_accounts)
    pub async fn accounts(&self) -> Result<Vec<Address>> {
        let result = self.rpc("eth_accounts", json!([])).await?;
        let entries = result.as_array().ok_or_else(|| {
            NodeError::ParseError("eth_accounts did not return an array".to_string())
        })?;

        entries
            .iter()
            .map(|v| {
                v.as_str()
                    .and_then(|s| s.parse::<Address>().ok())
                    .ok_or_else(|| NodeError::ParseError(format!("Invalid account entry: {}", v)))
            })
            .collect()
    }
}

/// Result of probing a single RPC URL
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChainProbeResult {
    pub url: String,
    pub chain_id: ChainId,
    pub block_height: BlockNumber,
    pub latency_ms: u64,
}

/// Probe a single RPC URL. Returns None on failure (timeout/unreachable).
/// Uses a 4-second timeout. Creates a temporary client internally.
pub async fn probe_chain(url: &str) -> Option<ChainProbeResult> {
    let start = std::time::Instant::now();

    let client = EvmNodeClient::new_without_probe(RpcConfig {
        url: url.to_string(),
    })
    .ok()?;

    let probe_timeout = std::time::Duration::from_secs(4);
    let chain_id = tokio::time::timeout(probe_timeout, client.chain_id())
        .await
        .ok()?
        .ok()?;
    let block_height = tokio::time::timeout(probe_timeout, client.block_number())
        .await
        .ok()?
        .ok()?;

    Some(ChainProbeResult {
        url: url.to_string(),
        chain_id,
        block_height,
        latency_ms: start.elapsed().as_millis() as u64,
    })
}

/// Parse a JSON-RPC quantity ("0x1a") into an integer
fn parse_quantity<T: TryFrom<u128>>(value: &Value) -> Result<T> {
    let s = value
        .as_str()
        .ok_or_else(|| NodeError::ParseError(format!("Expected quantity, got {}", value)))?;
    let stripped = s.strip_prefix("0x").ok_or_else(|| {
        NodeError::ParseError(format!("Quantity missing 0x prefix: {}", s))
    })?;
    let raw = u128::from_str_radix(stripped, 16)
        .map_err(|e| NodeError::ParseError(format!("Invalid quantity {}: {}", s, e)))?;
    T::try_from(raw).map_err(|_| NodeError::ParseError(format!("Quantity out of range: {}", s)))
}

/// Parse JSON-RPC hex data ("0x...") into raw bytes
fn parse_bytes(value: &Value) -> Result<Vec<u8>> {
    let s = value
        .as_str()
        .ok_or_else(|| NodeError::ParseError(format!("Expected hex data, got {}", value)))?;
    let stripped = s.strip_prefix("0x").unwrap_or(s);
    hex::decode(stripped).map_err(|e| NodeError::ParseError(format!("Invalid hex data: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RpcConfig::default();
        assert_eq!(config.url, "http://127.0.0.1:8545");
    }

    #[test]
    fn test_parse_quantity() {
        let q: u64 = parse_quantity(&json!("0x1a")).unwrap();
        assert_eq!(q, 26);

        let q: u64 = parse_quantity(&json!("0x0")).unwrap();
        assert_eq!(q, 0);

        assert!(parse_quantity::<u64>(&json!("1a")).is_err());
        assert!(parse_quantity::<u64>(&json!(26)).is_err());
        assert!(parse_quantity::<u64>(&json!("0xzz")).is_err());
    }

    #[test]
    fn test_parse_bytes() {
        assert_eq!(parse_bytes(&json!("0xdeadbeef")).unwrap(), vec![0xde, 0xad, 0xbe, 0xef]);
        assert_eq!(parse_bytes(&json!("0x")).unwrap(), Vec::<u8>::new());
        assert!(parse_bytes(&json!(42)).is_err());
    }
}
