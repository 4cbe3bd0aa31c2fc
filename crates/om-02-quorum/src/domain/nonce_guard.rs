//! Consumed-nonce tracking for replay protection.
//!
//! One guard covers one signing domain: any nonce collision between two
//! attestations in the same domain is treated as a replay, which is
//! stricter than per-operator scoping. Callers wanting per-operator scope
//! shard one guard per operator.
//!
//! This guard is advisory in the off-chain aggregator; the authoritative
//! replay check happens in the external settlement registry. It must fail
//! closed: a nonce is marked consumed before the vote that consumes it is
//! observable, so two concurrent deliveries of the same signed attestation
//! can never both count.

use dashmap::DashSet;
use shared_types::Nonce;

/// Atomic consumed-nonce set for one signing domain.
#[derive(Debug, Default)]
pub struct NonceGuard {
    consumed: DashSet<Nonce>,
}

impl NonceGuard {
    /// Create an empty guard.
    pub fn new() -> Self {
        Self {
            consumed: DashSet::new(),
        }
    }

    /// Whether a nonce has already been consumed.
    pub fn is_used(&self, nonce: Nonce) -> bool {
        self.consumed.contains(&nonce)
    }

    /// Atomically consume a nonce. Returns `true` if this call consumed it,
    /// `false` if it was already used (replay). Compare-and-set semantics:
    /// exactly one of any number of concurrent callers wins.
    pub fn try_consume(&self, nonce: Nonce) -> bool {
        self.consumed.insert(nonce)
    }

    /// Number of consumed nonces.
    pub fn len(&self) -> usize {
        self.consumed.len()
    }

    /// Whether no nonce has been consumed yet.
    pub fn is_empty(&self) -> bool {
        self.consumed.is_empty()
    }
}
