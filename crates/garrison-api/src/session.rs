//! Dashboard session: the staking interaction orchestrator
//!
//! One session per connected account on one chain. It owns the on-chain
//! snapshots, the five per-operation trackers, and the confirmation watchers
//! that refresh state after each operation settles. Snapshots are replaced
//! wholesale on reload and destroyed with the session (disconnect or chain
//! change).

use std::sync::Arc;

use alloy_primitives::{Address, U256};
use evm_node_client::ChainReader;
use evm_tx::{TxRequest, WalletError, WalletProvider};
use garrison_core::{
    ChainId, ContractAddresses, ContractRegistry, Error, NodeError, ProtocolError, Result,
    TxError, TxHash,
};
use staking::{
    calculator, fetch, tx_builder, AccountSnapshot, DerivedView, PoolSnapshot, StakingError,
};
use tokio::sync::{watch, RwLock};

use crate::tracker::{OpKind, OpStatus, OpTracker};
use crate::watcher;

/// In-memory chain state, unknown until the first successful reload
#[derive(Debug, Default, Clone, Copy)]
pub struct Snapshots {
    pub account: Option<AccountSnapshot>,
    pub pool: Option<PoolSnapshot>,
    pub allowance: Option<U256>,
}

/// What a confirmed operation invalidates.
///
/// Approve only moves the allowance; the other four move balances and stake,
/// so they reload the account snapshot and the allowance together.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RefreshScope {
    AllowanceOnly,
    Account,
}

pub(crate) struct SessionInner {
    pub(crate) account: Address,
    pub(crate) chain_id: ChainId,
    /// None means the active chain has no configured contracts: no reads are
    /// issued and every action is refused.
    pub(crate) contracts: Option<ContractAddresses>,
    pub(crate) reader: Arc<dyn ChainReader>,
    pub(crate) wallet: Arc<dyn WalletProvider>,
    pub(crate) snapshots: RwLock<Snapshots>,
    trackers: [OpTracker; 5],
    shutdown: watch::Sender<bool>,
}

impl SessionInner {
    pub(crate) fn tracker(&self, kind: OpKind) -> &OpTracker {
        &self.trackers[match kind {
            OpKind::Mint => 0,
            OpKind::Approve => 1,
            OpKind::Stake => 2,
            OpKind::Unstake => 3,
            OpKind::Claim => 4,
        }]
    }

    pub(crate) fn shutdown_signal(&self) -> watch::Receiver<bool> {
        self.shutdown.subscribe()
    }

    /// Reload the pieces a confirmed operation invalidated. Called by the
    /// confirmation watcher on the Confirming -> Settled transition.
    pub(crate) async fn refresh(&self, scope: RefreshScope) -> Result<()> {
        let contracts = self
            .contracts
            .ok_or(ProtocolError::ChainNotSupported {
                chain_id: self.chain_id,
            })?;

        match scope {
            RefreshScope::AllowanceOnly => {
                let allowance = fetch::fetch_allowance(
                    self.reader.as_ref(),
                    contracts.token,
                    self.account,
                    contracts.staking,
                )
                .await
                .map_err(map_staking_error)?;

                let mut snapshots = self.snapshots.write().await;
                snapshots.allowance = Some(allowance);
            }
            RefreshScope::Account => {
                let (account, allowance) = tokio::join!(
                    fetch::fetch_account_snapshot(self.reader.as_ref(), &contracts, self.account),
                    fetch::fetch_allowance(
                        self.reader.as_ref(),
                        contracts.token,
                        self.account,
                        contracts.staking,
                    ),
                );
                let account = account.map_err(map_staking_error)?;
                let allowance = allowance.map_err(map_staking_error)?;

                let mut snapshots = self.snapshots.write().await;
                snapshots.account = Some(account);
                snapshots.allowance = Some(allowance);
            }
        }

        Ok(())
    }
}

impl Drop for SessionInner {
    fn drop(&mut self) {
        // Stop any confirmation watcher still polling for this session
        let _ = self.shutdown.send(true);
    }
}

/// A connected account's staking dashboard
#[derive(Clone)]
pub struct DashboardSession {
    inner: Arc<SessionInner>,
}

impl DashboardSession {
    /// Create a session for the wallet's account on the node's active chain.
    ///
    /// An unsupported chain id still yields a session so the state is
    /// explicit, but it holds no contracts: reads and actions are refused
    /// until the user switches chains and reconnects.
    pub async fn connect(
        reader: Arc<dyn ChainReader>,
        wallet: Arc<dyn WalletProvider>,
        registry: &ContractRegistry,
    ) -> Result<Self> {
        let chain_id = reader.chain_id().await?;
        let account = wallet.account();
        let contracts = staking::resolve_contracts(registry, chain_id);

        match contracts {
            Some(_) => tracing::info!(%account, chain_id, "Dashboard session connected"),
            None => tracing::warn!(
                %account,
                chain_id,
                "Connected on unsupported chain; actions disabled"
            ),
        }

        let (shutdown, _) = watch::channel(false);
        let session = Self {
            inner: Arc::new(SessionInner {
                account,
                chain_id,
                contracts,
                reader,
                wallet,
                snapshots: RwLock::new(Snapshots::default()),
                trackers: OpKind::ALL.map(OpTracker::new),
                shutdown,
            }),
        };

        // Initial population; an unreachable node leaves the snapshots
        // unknown and the next reload retries.
        if session.is_supported() {
            if let Err(e) = session.reload().await {
                tracing::warn!("Initial state load failed: {}", e);
            }
        }

        Ok(session)
    }

    pub fn account(&self) -> Address {
        self.inner.account
    }

    pub fn chain_id(&self) -> ChainId {
        self.inner.chain_id
    }

    /// Whether the active chain has configured contracts
    pub fn is_supported(&self) -> bool {
        self.inner.contracts.is_some()
    }

    /// Re-read balance, staker info, pool totals, and allowance, replacing
    /// the snapshots wholesale. Errors if the chain is unsupported or the
    /// node now reports a different chain id (the session is then stale and
    /// must be torn down).
    pub async fn reload(&self) -> Result<()> {
        let inner = &self.inner;
        let contracts = inner.contracts.ok_or(ProtocolError::ChainNotSupported {
            chain_id: inner.chain_id,
        })?;

        let actual = inner.reader.chain_id().await?;
        if actual != inner.chain_id {
            return Err(ProtocolError::ChainChanged {
                expected: inner.chain_id,
                actual,
            }
            .into());
        }

        let (account, pool, allowance) = tokio::join!(
            fetch::fetch_account_snapshot(inner.reader.as_ref(), &contracts, inner.account),
            fetch::fetch_pool_snapshot(inner.reader.as_ref(), contracts.staking),
            fetch::fetch_allowance(
                inner.reader.as_ref(),
                contracts.token,
                inner.account,
                contracts.staking,
            ),
        );

        let account = account.map_err(map_staking_error)?;
        let pool = pool.map_err(map_staking_error)?;
        let allowance = allowance.map_err(map_staking_error)?;

        let mut snapshots = inner.snapshots.write().await;
        *snapshots = Snapshots {
            account: Some(account),
            pool: Some(pool),
            allowance: Some(allowance),
        };

        Ok(())
    }

    /// Current snapshots (unknown fields are None)
    pub async fn snapshots(&self) -> Snapshots {
        *self.inner.snapshots.read().await
    }

    /// Derive the dashboard view for the amount currently typed into the
    /// stake field. Pure recomputation from the snapshots; nothing cached.
    pub async fn derived_view(&self, stake_input: &str) -> DerivedView {
        let snapshots = self.snapshots().await;
        calculator::derive_view(
            snapshots.account.as_ref(),
            snapshots.pool.as_ref(),
            snapshots.allowance,
            stake_input,
        )
    }

    /// Per-kind lifecycle status
    pub fn operation_statuses(&self) -> Vec<OpStatus> {
        OpKind::ALL
            .iter()
            .map(|kind| self.inner.tracker(*kind).status())
            .collect()
    }

    /// Mint test tokens. Amount is the user-typed decimal string.
    pub async fn mint(&self, amount: &str) -> Result<TxHash> {
        let (contracts, amount) = self.validated_amount(amount)?;
        let request = tx_builder::mint_call(&contracts, amount).map_err(map_staking_error)?;
        self.submit_tracked(OpKind::Mint, request).await
    }

    /// Approve the pool to spend exactly the typed stake amount
    pub async fn approve(&self, amount: &str) -> Result<TxHash> {
        let (contracts, amount) = self.validated_amount(amount)?;
        let request = tx_builder::approve_call(&contracts, amount).map_err(map_staking_error)?;
        self.submit_tracked(OpKind::Approve, request).await
    }

    /// Stake tokens into the pool
    pub async fn stake(&self, amount: &str) -> Result<TxHash> {
        let (contracts, amount) = self.validated_amount(amount)?;
        let request = tx_builder::stake_call(&contracts, amount).map_err(map_staking_error)?;
        self.submit_tracked(OpKind::Stake, request).await
    }

    /// Withdraw staked tokens
    pub async fn unstake(&self, amount: &str) -> Result<TxHash> {
        let (contracts, amount) = self.validated_amount(amount)?;
        let request = tx_builder::unstake_call(&contracts, amount).map_err(map_staking_error)?;
        self.submit_tracked(OpKind::Unstake, request).await
    }

    /// Claim accrued rewards. Refused while pending rewards are unknown or
    /// zero; unknown is not zero.
    pub async fn claim(&self) -> Result<TxHash> {
        let contracts = self.require_contracts()?;

        let pending_rewards = self.snapshots().await.account.map(|a| a.pending_rewards);
        match pending_rewards {
            None => {
                return Err(ProtocolError::ActionNotAllowed {
                    reason: "Pending rewards not loaded yet".to_string(),
                }
                .into())
            }
            Some(rewards) if rewards.is_zero() => {
                return Err(ProtocolError::ActionNotAllowed {
                    reason: "No rewards to claim".to_string(),
                }
                .into())
            }
            Some(_) => {}
        }

        let request = tx_builder::claim_call(&contracts);
        self.submit_tracked(OpKind::Claim, request).await
    }

    /// Tear the session down: cancels all confirmation watchers. Snapshots
    /// die with the session.
    pub fn shutdown(&self) {
        tracing::info!(account = %self.inner.account, "Dashboard session closed");
        let _ = self.inner.shutdown.send(true);
    }

    fn require_contracts(&self) -> Result<ContractAddresses> {
        self.inner.contracts.ok_or_else(|| {
            ProtocolError::ChainNotSupported {
                chain_id: self.inner.chain_id,
            }
            .into()
        })
    }

    /// Parse and validate a typed amount before anything touches a tracker.
    /// Validation runs on the smallest-unit integer, never floats.
    fn validated_amount(&self, amount: &str) -> Result<(ContractAddresses, U256)> {
        let contracts = self.require_contracts()?;
        let parsed = calculator::parse_units(amount).ok_or_else(|| ProtocolError::InvalidAmount {
            message: format!("'{}' is not a decimal token amount", amount),
        })?;
        if parsed.is_zero() {
            return Err(ProtocolError::InvalidAmount {
                message: "Amount must be positive".to_string(),
            }
            .into());
        }
        Ok((contracts, parsed))
    }

    /// Shared submission path: claim the kind's tracker, hand the request to
    /// the wallet, and on acceptance start a confirmation watcher. A wallet
    /// rejection re-arms the tracker and surfaces as an operation-scoped
    /// error.
    async fn submit_tracked(&self, kind: OpKind, request: TxRequest) -> Result<TxHash> {
        let inner = &self.inner;
        inner.tracker(kind).begin()?;

        match inner.wallet.submit(&request).await {
            Ok(tx_hash) => {
                inner.tracker(kind).submitted(tx_hash.clone());
                tracing::info!(kind = kind.as_str(), %tx_hash, "Operation submitted");
                watcher::spawn_confirmation_watcher(inner, kind, tx_hash.clone());
                Ok(tx_hash)
            }
            Err(e) => {
                tracing::warn!(kind = kind.as_str(), "Submission failed: {}", e);
                inner.tracker(kind).reject(&e.to_string());
                Err(match e {
                    WalletError::Rejected { reason } => TxError::Rejected { reason }.into(),
                    WalletError::Submission { message } => {
                        TxError::SubmissionFailed { message }.into()
                    }
                })
            }
        }
    }
}

/// Lift protocol-crate errors into the core taxonomy
fn map_staking_error(e: StakingError) -> Error {
    match e {
        StakingError::ChainNotSupported(chain_id) => {
            ProtocolError::ChainNotSupported { chain_id }.into()
        }
        StakingError::NodeError(message) => NodeError::RpcError { message }.into(),
        StakingError::DecodeError(message) => NodeError::ParseError(message).into(),
        StakingError::InvalidAmount(message) => ProtocolError::InvalidAmount { message }.into(),
        StakingError::ActionNotAllowed(reason) => ProtocolError::ActionNotAllowed { reason }.into(),
    }
}
