//! Node-backed wallet provider
//!
//! Dev chains (hardhat, anvil) expose unlocked accounts through
//! eth_sendTransaction; this provider signs and broadcasts through them.
//! Production setups plug in their own `WalletProvider` instead.

use alloy_primitives::Address;
use async_trait::async_trait;
use evm_tx::{TxRequest, WalletError, WalletProvider};
use garrison_core::{NodeError, TxHash};

use crate::EvmNodeClient;

/// Wallet provider backed by the node's own account management
#[derive(Clone)]
pub struct NodeWallet {
    client: EvmNodeClient,
    account: Address,
}

impl NodeWallet {
    pub fn new(client: EvmNodeClient, account: Address) -> Self {
        Self { client, account }
    }
}

#[async_trait]
impl WalletProvider for NodeWallet {
    fn account(&self) -> Address {
        self.account
    }

    async fn submit(&self, request: &TxRequest) -> Result<TxHash, WalletError> {
        tracing::debug!(to = %request.to, description = %request.description, "Submitting transaction");

        let hash = self
            .client
            .send_transaction(self.account, request.to, &request.data)
            .await
            .map_err(|e| match e {
                // Node refused to sign (locked account, user denial on a
                // prompting signer) rather than failing transport
                NodeError::RpcError { message }
                    if message.contains("denied") || message.contains("rejected") =>
                {
                    WalletError::Rejected { reason: message }
                }
                other => WalletError::Submission {
                    message: other.to_string(),
                },
            })?;

        tracing::info!(tx_hash = %hash, description = %request.description, "Transaction accepted");
        Ok(hash)
    }
}
