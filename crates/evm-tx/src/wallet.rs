//! Wallet provider seam
//!
//! Signing and broadcasting are an external capability: given a `TxRequest`
//! the provider returns a transaction hash, or a rejection. Providers are
//! free to prompt a user, forward to a remote signer, or use a dev node's
//! unlocked accounts.

use alloy_primitives::Address;
use async_trait::async_trait;
use garrison_core::TxHash;
use thiserror::Error;

/// Errors a wallet provider can surface before a transaction hash exists
#[derive(Debug, Error)]
pub enum WalletError {
    /// The user or provider declined to sign
    #[error("Request rejected: {reason}")]
    Rejected { reason: String },

    /// Transport or provider failure before broadcast
    #[error("Submission failed: {message}")]
    Submission { message: String },
}

/// External signing and broadcast capability.
///
/// `submit` either broadcasts the request and returns its transaction hash,
/// or fails without any transaction existing. Once a hash is returned the
/// transaction cannot be cancelled; callers track it to confirmation.
#[async_trait]
pub trait WalletProvider: Send + Sync {
    /// The account transactions are sent from
    fn account(&self) -> Address;

    /// Sign and broadcast a transaction request
    async fn submit(&self, request: &crate::TxRequest) -> Result<TxHash, WalletError>;
}
