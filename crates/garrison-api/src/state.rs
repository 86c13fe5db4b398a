//! Application state shared across API handlers

use std::sync::Arc;

use alloy_primitives::Address;
use evm_node_client::{EvmNodeClient, NodeWallet};
use garrison_core::{
    AppConfig, ChainId, ContractAddresses, NodeError, ProtocolError, Result, RpcConfig,
};

use crate::session::DashboardSession;
use tokio::sync::RwLock;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: RwLock<AppConfig>,
    node_client: RwLock<Option<EvmNodeClient>>,
    session: RwLock<Option<DashboardSession>>,
}

impl AppState {
    /// Create a new application state with default config
    pub fn new() -> Self {
        Self::with_config(AppConfig::default())
    }

    /// Create with a specific config
    pub fn with_config(config: AppConfig) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config: RwLock::new(config),
                node_client: RwLock::new(None),
                session: RwLock::new(None),
            }),
        }
    }

    /// Get current config
    pub async fn config(&self) -> AppConfig {
        self.inner.config.read().await.clone()
    }

    /// Update node configuration. Clears the cached client and tears down
    /// any live session, since the new endpoint may serve another chain.
    pub async fn set_rpc_config(&self, rpc: RpcConfig) {
        {
            let mut config = self.inner.config.write().await;
            config.rpc = rpc;
        }

        let mut client = self.inner.node_client.write().await;
        *client = None;
        drop(client);

        self.disconnect_wallet().await;
    }

    /// Register contract addresses for a chain
    pub async fn register_contracts(&self, chain_id: ChainId, contracts: ContractAddresses) {
        let mut config = self.inner.config.write().await;
        config.contracts.register(chain_id, contracts);
    }

    /// Get or create node client
    pub async fn node_client(&self) -> Option<EvmNodeClient> {
        // Check if we have a cached client
        {
            let client = self.inner.node_client.read().await;
            if client.is_some() {
                return client.clone();
            }
        }

        // Create new client
        let config = self.inner.config.read().await;
        tracing::info!("Creating node client for URL: {}", config.rpc.url);
        match EvmNodeClient::new(config.rpc.clone()).await {
            Ok(client) => {
                tracing::info!("Node client created successfully");
                let mut cached = self.inner.node_client.write().await;
                *cached = Some(client.clone());
                Some(client)
            }
            Err(e) => {
                tracing::warn!("Failed to create node client for {}: {}", config.rpc.url, e);
                None
            }
        }
    }

    /// Force refresh node client
    pub async fn refresh_node_client(&self) -> Option<EvmNodeClient> {
        let mut client = self.inner.node_client.write().await;
        *client = None;
        drop(client);

        self.node_client().await
    }

    /// Connect a wallet account: resolves the active chain and replaces any
    /// previous session with a fresh one for this account.
    pub async fn connect_wallet(&self, account: Address) -> Result<DashboardSession> {
        let client = self
            .node_client()
            .await
            .ok_or_else(|| NodeError::Unreachable {
                url: "node client unavailable".to_string(),
            })?;

        let registry = self.inner.config.read().await.contracts.clone();
        let wallet = Arc::new(NodeWallet::new(client.clone(), account));
        let session =
            DashboardSession::connect(Arc::new(client), wallet, &registry).await?;

        let previous = {
            let mut slot = self.inner.session.write().await;
            slot.replace(session.clone())
        };
        if let Some(previous) = previous {
            previous.shutdown();
        }

        Ok(session)
    }

    /// Disconnect wallet: tears down the session and its watchers
    pub async fn disconnect_wallet(&self) {
        let previous = {
            let mut slot = self.inner.session.write().await;
            slot.take()
        };
        if let Some(session) = previous {
            session.shutdown();
        }
    }

    /// Current dashboard session, if a wallet is connected
    pub async fn session(&self) -> Option<DashboardSession> {
        self.inner.session.read().await.clone()
    }

    /// Session or the canonical not-connected error
    pub async fn require_session(&self) -> Result<DashboardSession> {
        self.session()
            .await
            .ok_or_else(|| ProtocolError::WalletNotConnected.into())
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
