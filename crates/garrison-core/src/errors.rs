//! Error types for Garrison

use thiserror::Error;

use crate::ChainId;

/// Core errors that can occur in Garrison
#[derive(Debug, Error)]
pub enum Error {
    #[error("Node error: {0}")]
    Node(#[from] NodeError),

    #[error("Protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    #[error("Transaction error: {0}")]
    Transaction(#[from] TxError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Node connection and query errors
#[derive(Debug, Error)]
pub enum NodeError {
    #[error("Node unreachable at {url}")]
    Unreachable { url: String },

    #[error("RPC error: {message}")]
    RpcError { message: String },

    #[error("Failed to parse response: {0}")]
    ParseError(String),

    #[error("Node request timed out after {secs}s")]
    Timeout { secs: u64 },
}

/// Protocol-level errors
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("Chain {chain_id} has no configured contracts")]
    ChainNotSupported { chain_id: ChainId },

    #[error("Active chain changed (session on {expected}, node reports {actual})")]
    ChainChanged { expected: ChainId, actual: ChainId },

    #[error("Protocol state unavailable: {reason}")]
    StateUnavailable { reason: String },

    #[error("Invalid amount: {message}")]
    InvalidAmount { message: String },

    #[error("Action not allowed: {reason}")]
    ActionNotAllowed { reason: String },

    #[error("{kind} already in flight")]
    OperationInFlight { kind: &'static str },

    #[error("Wallet not connected")]
    WalletNotConnected,
}

/// Transaction submission and confirmation errors
#[derive(Debug, Error)]
pub enum TxError {
    #[error("Wallet rejected the request: {reason}")]
    Rejected { reason: String },

    #[error("Transaction submission failed: {message}")]
    SubmissionFailed { message: String },

    #[error("Transaction {tx_hash} reverted on chain")]
    Reverted { tx_hash: String },
}

/// Result type alias for Garrison operations
pub type Result<T> = std::result::Result<T, Error>;

impl ProtocolError {
    /// Get an HTTP-friendly error code
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::ChainNotSupported { .. } => "chain_not_supported",
            Self::ChainChanged { .. } => "chain_changed",
            Self::StateUnavailable { .. } => "state_unavailable",
            Self::InvalidAmount { .. } => "invalid_amount",
            Self::ActionNotAllowed { .. } => "action_not_allowed",
            Self::OperationInFlight { .. } => "operation_in_flight",
            Self::WalletNotConnected => "wallet_not_connected",
        }
    }

    /// Get HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidAmount { .. } => 400,
            Self::ActionNotAllowed { .. } | Self::OperationInFlight { .. } => 409,
            Self::ChainNotSupported { .. } | Self::ChainChanged { .. } => 422,
            Self::WalletNotConnected => 401,
            Self::StateUnavailable { .. } => 503,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_protocol_error_codes() {
        let err = ProtocolError::InvalidAmount {
            message: "test".into(),
        };
        assert_eq!(err.error_code(), "invalid_amount");
        assert_eq!(err.status_code(), 400);

        let err = ProtocolError::ChainNotSupported { chain_id: 999 };
        assert_eq!(err.error_code(), "chain_not_supported");
        assert_eq!(err.status_code(), 422);

        let err = ProtocolError::OperationInFlight { kind: "stake" };
        assert_eq!(err.error_code(), "operation_in_flight");
        assert_eq!(err.status_code(), 409);
    }

    #[test]
    fn test_error_conversion() {
        let node_err = NodeError::RpcError {
            message: "boom".into(),
        };
        let err: Error = node_err.into();
        assert!(matches!(err, Error::Node(_)));
    }
}
