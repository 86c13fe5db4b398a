//! Confirmation watcher and refresh coordination
//!
//! One task per accepted submission. It polls the node for the receipt,
//! drives the tracker's Confirming -> Settled transition, and triggers the
//! state refresh from that event rather than from a fixed post-submission
//! delay. No timeout is applied here: the wait is bounded only by the node
//! actually mining or dropping the transaction. Teardown cancels every
//! watcher through the session's shutdown channel.

use std::sync::{Arc, Weak};

use garrison_core::TxHash;

use crate::session::{RefreshScope, SessionInner};
use crate::tracker::OpKind;

/// How often a watcher polls for its receipt. Dev chains mine instantly;
/// public testnets take a few blocks.
const RECEIPT_POLL_INTERVAL: std::time::Duration = std::time::Duration::from_secs(1);

pub(crate) fn spawn_confirmation_watcher(
    session: &Arc<SessionInner>,
    kind: OpKind,
    tx_hash: TxHash,
) {
    let weak: Weak<SessionInner> = Arc::downgrade(session);
    let mut shutdown = session.shutdown_signal();

    tokio::spawn(async move {
        loop {
            tokio::select! {
                _ = shutdown.changed() => {
                    tracing::debug!(kind = kind.as_str(), %tx_hash, "Watcher cancelled");
                    return;
                }
                _ = tokio::time::sleep(RECEIPT_POLL_INTERVAL) => {
                    // The session may have been dropped without an explicit
                    // shutdown; a dead Weak ends the watcher either way.
                    let Some(session) = weak.upgrade() else { return };

                    match session.reader.transaction_receipt(&tx_hash).await {
                        Ok(Some(receipt)) => {
                            if receipt.succeeded {
                                tracing::info!(
                                    kind = kind.as_str(),
                                    %tx_hash,
                                    block = receipt.block_number,
                                    "Transaction confirmed"
                                );
                                session.tracker(kind).settle_success();
                            } else {
                                tracing::warn!(
                                    kind = kind.as_str(),
                                    %tx_hash,
                                    block = receipt.block_number,
                                    "Transaction reverted"
                                );
                                session
                                    .tracker(kind)
                                    .settle_reverted(&format!(
                                        "Transaction {} reverted on chain",
                                        tx_hash
                                    ));
                            }

                            let scope = match kind {
                                OpKind::Approve => RefreshScope::AllowanceOnly,
                                _ => RefreshScope::Account,
                            };
                            if let Err(e) = session.refresh(scope).await {
                                tracing::warn!(
                                    kind = kind.as_str(),
                                    "Post-confirmation refresh failed: {}",
                                    e
                                );
                            }
                            return;
                        }
                        Ok(None) => {
                            // Still pending; keep polling
                        }
                        Err(e) => {
                            tracing::warn!(
                                kind = kind.as_str(),
                                %tx_hash,
                                "Receipt poll failed: {}",
                                e
                            );
                        }
                    }
                }
            }
        }
    });
}
