//! Driving Ports (API - Inbound)

use crate::domain::tally::{ConflictReport, QuorumSnapshot};
use crate::error::QuorumResult;
use async_trait::async_trait;
use om_01_attestation::SignedAttestation;
use shared_types::RequestId;

/// What a submission did to the request's tally.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Disposition {
    /// Vote verified and counted; threshold not yet met.
    Counted,
    /// Vote counted and its weight crossed the threshold.
    Resolved,
    /// Request was already resolved; existing resolution returned, no
    /// re-tally. Informational, not an error.
    AlreadyResolved,
    /// Operator already counted for this request; submission ignored.
    DuplicateOperator,
    /// Nonce already consumed in this signing domain; submission ignored.
    ReplayedNonce,
}

/// Result of one submission: what happened plus the post-submission tally.
#[derive(Clone, Debug)]
pub struct AggregationOutcome {
    /// What this submission did.
    pub disposition: Disposition,
    /// Tally snapshot taken inside the same critical section.
    pub state: QuorumSnapshot,
}

/// Primary Quorum API.
///
/// Receives signed attestations from many operators for many simultaneous
/// requests and resolves each request exactly once.
#[async_trait]
pub trait QuorumApi: Send + Sync {
    /// Verify and fold one attestation into the tally for `request_id`.
    ///
    /// Verification failures (`InvalidAttestation`, `Expired`,
    /// `InvalidSignature`) surface as errors but are non-fatal: the caller
    /// logs and continues, and the tally is untouched.
    async fn submit_attestation(
        &self,
        request_id: RequestId,
        signed: SignedAttestation,
    ) -> QuorumResult<AggregationOutcome>;

    /// Read-only tally snapshot. Safe to call concurrently with
    /// `submit_attestation`; `None` until the first attestation arrives.
    async fn status(&self, request_id: RequestId) -> Option<QuorumSnapshot>;

    /// Contradictory-vote observations across all requests.
    async fn conflicting_reports(&self) -> Vec<ConflictReport>;
}
