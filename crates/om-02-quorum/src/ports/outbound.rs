//! Driven Ports (SPI - Outbound Dependencies)

use crate::domain::tally::{QuorumSnapshot, RecordedVote};
use crate::error::QuorumResult;
use async_trait::async_trait;
use om_01_attestation::{AttestationVerifier, SignedAttestation, VerifyResult};
use shared_types::{Address, RequestId};
use uuid::Uuid;

/// Correlation ID for tracking settlement hand-offs.
pub type CorrelationId = Uuid;

/// Signature and validity verification for submitted attestations.
///
/// Pure and stateless; the aggregator calls it outside any tally lock.
pub trait AttestationVerification: Send + Sync {
    /// Verify authenticity and current validity at time `now`.
    fn verify(&self, signed: &SignedAttestation, now: u64) -> VerifyResult<()>;
}

impl AttestationVerification for om_01_attestation::AttestationVerifier {
    fn verify(&self, signed: &SignedAttestation, now: u64) -> VerifyResult<()> {
        AttestationVerifier::verify(self, signed, now)
    }
}

/// Operator weight lookup against a registry snapshot.
///
/// Weights are established by an external registration process; this core
/// only reads them. Stale weights can waste a settlement round-trip but
/// cannot release funds: the registry re-checks.
#[async_trait]
pub trait OperatorRegistryProvider: Send + Sync {
    /// Registered weight for an operator, `None` if unregistered.
    async fn operator_weight(&self, address: &Address) -> QuorumResult<Option<u128>>;
}

/// Resolution hand-off payload for the settlement subsystem.
#[derive(Clone, Debug)]
pub struct SettlementRequest {
    /// Correlation id for tracing the hand-off.
    pub correlation_id: CorrelationId,
    /// The resolved request.
    pub request_id: RequestId,
    /// The winning outcome.
    pub outcome: bool,
    /// Counted votes agreeing with the outcome, in counting order.
    pub winning_votes: Vec<RecordedVote>,
    /// Tally at resolution time.
    pub tally: QuorumSnapshot,
}

/// Delivery of a resolved request toward on-chain settlement.
///
/// Invoked outside the per-request critical section; failures never mutate
/// the already-resolved tally.
#[async_trait]
pub trait SettlementGateway: Send + Sync {
    /// Hand a freshly resolved request to settlement.
    async fn settle(&self, request: SettlementRequest) -> QuorumResult<()>;
}
