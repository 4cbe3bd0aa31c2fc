//! Settlement gateway adapter for the quorum aggregator.
//!
//! Bridges om-02's [`SettlementGateway`] port onto the [`Submitter`]: every
//! winning vote of a resolved request is delivered to the registry in
//! counting order. Nonces the registry already consumed are skipped as
//! idempotent successes; the first hard failure aborts the hand-off and is
//! reported back to the aggregator, which logs it without unwinding the
//! resolution.

use crate::error::SettlementError;
use crate::ports::SettlementRegistry;
use crate::service::{SubmitOutcome, Submitter};
use async_trait::async_trait;
use om_02_quorum::{QuorumError, QuorumResult, SettlementGateway, SettlementRequest};
use shared_types::hash_hex;

/// Delivers resolved requests to a settlement registry, vote by vote.
pub struct RegistrySettlementGateway<R: SettlementRegistry> {
    submitter: Submitter<R>,
}

impl<R: SettlementRegistry> RegistrySettlementGateway<R> {
    pub fn new(submitter: Submitter<R>) -> Self {
        Self { submitter }
    }
}

#[async_trait]
impl<R: SettlementRegistry + 'static> SettlementGateway for RegistrySettlementGateway<R> {
    async fn settle(&self, request: SettlementRequest) -> QuorumResult<()> {
        let mut submitted = 0usize;
        let mut skipped = 0usize;

        for vote in &request.winning_votes {
            match self.submitter.submit(&vote.signed).await {
                Ok(SubmitOutcome::Submitted(_)) => submitted += 1,
                Ok(SubmitOutcome::AlreadyUsed) => skipped += 1,
                Err(SettlementError::SubmissionFailed { reason }) => {
                    return Err(QuorumError::SettlementFailed { reason });
                }
            }
        }

        tracing::info!(
            correlation_id = %request.correlation_id,
            request_id = %hash_hex(&request.request_id),
            outcome = request.outcome,
            submitted,
            skipped,
            "Resolved request delivered to settlement registry"
        );
        Ok(())
    }
}
