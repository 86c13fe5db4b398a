//! Per-operation transaction lifecycle tracking
//!
//! One tracker per operation kind, each an independent
//! Idle -> Submitting -> Confirming -> Settled machine. Settled re-arms to
//! Idle immediately, so a status read observes Idle with the last outcome
//! recorded. Kind-level mutual exclusion is enforced with a compare-and-set
//! flag, not a disabled control: a double-trigger racing a render loses here.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use garrison_core::{ProtocolError, TxHash};
use serde::{Deserialize, Serialize};

/// The five user-triggerable operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OpKind {
    Mint,
    Approve,
    Stake,
    Unstake,
    Claim,
}

impl OpKind {
    pub const ALL: [OpKind; 5] = [
        OpKind::Mint,
        OpKind::Approve,
        OpKind::Stake,
        OpKind::Unstake,
        OpKind::Claim,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mint => "mint",
            Self::Approve => "approve",
            Self::Stake => "stake",
            Self::Unstake => "unstake",
            Self::Claim => "claim",
        }
    }
}

/// Lifecycle phase of one operation kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OpPhase {
    Idle,
    Submitting,
    Confirming,
    Settled,
}

/// Point-in-time view of one tracker
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpStatus {
    pub kind: OpKind,
    pub phase: OpPhase,
    /// true for the whole Submitting + Confirming interval
    pub pending: bool,
    /// Hash of the in-flight or most recently submitted transaction
    pub tx_hash: Option<TxHash>,
    /// Outcome of the last attempt, if it failed (rejection, submission
    /// failure, or on-chain revert)
    pub last_error: Option<String>,
}

struct TrackerInner {
    phase: OpPhase,
    tx_hash: Option<TxHash>,
    last_error: Option<String>,
}

/// Lifecycle tracker for a single operation kind
pub struct OpTracker {
    kind: OpKind,
    in_flight: AtomicBool,
    inner: Mutex<TrackerInner>,
}

impl OpTracker {
    pub fn new(kind: OpKind) -> Self {
        Self {
            kind,
            in_flight: AtomicBool::new(false),
            inner: Mutex::new(TrackerInner {
                phase: OpPhase::Idle,
                tx_hash: None,
                last_error: None,
            }),
        }
    }

    pub fn kind(&self) -> OpKind {
        self.kind
    }

    /// Idle -> Submitting. Fails if this kind already has a transaction in
    /// flight; the CAS makes a rapid double-trigger lose even before any
    /// status read observes the phase change.
    pub fn begin(&self) -> Result<(), ProtocolError> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(ProtocolError::OperationInFlight {
                kind: self.kind.as_str(),
            });
        }

        let mut inner = self.inner.lock().expect("tracker lock poisoned");
        inner.phase = OpPhase::Submitting;
        inner.tx_hash = None;
        inner.last_error = None;
        Ok(())
    }

    /// Submitting -> Confirming: the wallet accepted and returned a hash
    pub fn submitted(&self, tx_hash: TxHash) {
        let mut inner = self.inner.lock().expect("tracker lock poisoned");
        inner.phase = OpPhase::Confirming;
        inner.tx_hash = Some(tx_hash);
    }

    /// Submitting -> Idle: the wallet declined or submission failed before a
    /// transaction existed. Operation-scoped, never fatal.
    pub fn reject(&self, reason: &str) {
        let mut inner = self.inner.lock().expect("tracker lock poisoned");
        inner.phase = OpPhase::Idle;
        inner.last_error = Some(reason.to_string());
        drop(inner);
        self.in_flight.store(false, Ordering::Release);
    }

    /// Confirming -> Settled -> Idle: receipt observed as success.
    /// Settled re-arms immediately.
    pub fn settle_success(&self) {
        let mut inner = self.inner.lock().expect("tracker lock poisoned");
        inner.phase = OpPhase::Idle;
        inner.last_error = None;
        drop(inner);
        self.in_flight.store(false, Ordering::Release);
    }

    /// Confirming -> Settled -> Idle, but the transaction was mined and
    /// reverted. Distinguished from success and recorded.
    pub fn settle_reverted(&self, reason: &str) {
        let mut inner = self.inner.lock().expect("tracker lock poisoned");
        inner.phase = OpPhase::Idle;
        inner.last_error = Some(reason.to_string());
        drop(inner);
        self.in_flight.store(false, Ordering::Release);
    }

    /// Whether this kind currently has a transaction in flight
    pub fn is_pending(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    pub fn status(&self) -> OpStatus {
        let inner = self.inner.lock().expect("tracker lock poisoned");
        OpStatus {
            kind: self.kind,
            phase: inner.phase,
            pending: self.is_pending(),
            tx_hash: inner.tx_hash.clone(),
            last_error: inner.last_error.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_lifecycle() {
        let tracker = OpTracker::new(OpKind::Stake);
        assert_eq!(tracker.status().phase, OpPhase::Idle);
        assert!(!tracker.is_pending());

        tracker.begin().unwrap();
        assert_eq!(tracker.status().phase, OpPhase::Submitting);
        assert!(tracker.is_pending());

        tracker.submitted(TxHash::new("0xabc"));
        let status = tracker.status();
        assert_eq!(status.phase, OpPhase::Confirming);
        assert!(status.pending);
        assert_eq!(status.tx_hash, Some(TxHash::new("0xabc")));

        tracker.settle_success();
        let status = tracker.status();
        assert_eq!(status.phase, OpPhase::Idle);
        assert!(!status.pending);
        assert!(status.last_error.is_none());
        // Hash of the settled transaction stays readable
        assert_eq!(status.tx_hash, Some(TxHash::new("0xabc")));
    }

    #[test]
    fn test_double_begin_refused() {
        let tracker = OpTracker::new(OpKind::Mint);
        tracker.begin().unwrap();

        let err = tracker.begin().unwrap_err();
        assert!(matches!(
            err,
            ProtocolError::OperationInFlight { kind: "mint" }
        ));

        // Still refused while Confirming
        tracker.submitted(TxHash::new("0x1"));
        assert!(tracker.begin().is_err());

        // Re-armed after settling
        tracker.settle_success();
        assert!(tracker.begin().is_ok());
    }

    #[test]
    fn test_rejection_rearms() {
        let tracker = OpTracker::new(OpKind::Approve);
        tracker.begin().unwrap();
        tracker.reject("user declined");

        let status = tracker.status();
        assert_eq!(status.phase, OpPhase::Idle);
        assert!(!status.pending);
        assert_eq!(status.last_error.as_deref(), Some("user declined"));
        assert!(status.tx_hash.is_none());

        assert!(tracker.begin().is_ok());
        // A new attempt clears the previous failure
        assert!(tracker.status().last_error.is_none());
    }

    #[test]
    fn test_revert_recorded() {
        let tracker = OpTracker::new(OpKind::Unstake);
        tracker.begin().unwrap();
        tracker.submitted(TxHash::new("0xdead"));
        tracker.settle_reverted("transaction 0xdead reverted on chain");

        let status = tracker.status();
        assert_eq!(status.phase, OpPhase::Idle);
        assert!(!status.pending);
        assert!(status.last_error.as_deref().unwrap().contains("reverted"));
        assert!(tracker.begin().is_ok());
    }

    #[test]
    fn test_kinds_independent() {
        let stake = OpTracker::new(OpKind::Stake);
        let claim = OpTracker::new(OpKind::Claim);

        stake.begin().unwrap();
        // A pending stake does not block claim
        claim.begin().unwrap();
        assert!(stake.is_pending());
        assert!(claim.is_pending());
    }

    #[test]
    fn test_cas_under_contention() {
        use std::sync::Arc;

        let tracker = Arc::new(OpTracker::new(OpKind::Stake));
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let tracker = tracker.clone();
                std::thread::spawn(move || tracker.begin().is_ok())
            })
            .collect();

        let wins = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|won| *won)
            .count();
        assert_eq!(wins, 1);
    }
}
