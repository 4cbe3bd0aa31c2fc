//! # Replay Scenarios
//!
//! Nonces are single-use across the whole signing domain. The aggregator
//! enforces this off-chain for liveness; the registry enforces it again
//! on settlement for safety.

#[cfg(test)]
mod tests {
    use crate::harness::MeshHarness;
    use om_02_quorum::{Disposition, QuorumApi};
    use om_04_settlement::{SettlementRegistry, SubmitOutcome, Submitter};
    use shared_types::RequestId;
    use std::sync::Arc;

    const REQUEST: RequestId = [0x77; 32];

    #[tokio::test]
    async fn test_cross_operator_nonce_replay_rejected() {
        let h = MeshHarness::new();
        h.quorum
            .submit_attestation(REQUEST, h.vote(0, true, 1))
            .await
            .unwrap();

        // A different operator reusing the consumed nonce gains no weight.
        let replay = h
            .quorum
            .submit_attestation(REQUEST, h.vote(1, false, 1))
            .await
            .unwrap();
        assert_eq!(replay.disposition, Disposition::ReplayedNonce);
        assert_eq!(replay.state.no_weight, 0);
    }

    #[tokio::test]
    async fn test_nonce_scope_spans_requests() {
        let h = MeshHarness::new();
        let other: RequestId = [0x88; 32];

        h.quorum
            .submit_attestation(REQUEST, h.vote(0, true, 1))
            .await
            .unwrap();

        // Same nonce on a different request is still a replay: the scope
        // is the signing domain, not the request.
        let replay = h
            .quorum
            .submit_attestation(other, h.vote(1, true, 1))
            .await
            .unwrap();
        assert_eq!(replay.disposition, Disposition::ReplayedNonce);
    }

    #[tokio::test]
    async fn test_settled_attestation_redelivery_is_noop() {
        let h = MeshHarness::new();
        let vote = h.vote(0, true, 1);

        let submitter = Submitter::new(Arc::clone(&h.registry));
        assert!(matches!(
            submitter.submit(&vote).await.unwrap(),
            SubmitOutcome::Submitted(_)
        ));

        // Resubmission of the settled attestation reports idempotent success
        // and leaves the registry log unchanged.
        assert_eq!(
            submitter.submit(&vote).await.unwrap(),
            SubmitOutcome::AlreadyUsed
        );
        assert_eq!(h.registry.fulfilled().len(), 1);
    }

    #[tokio::test]
    async fn test_registry_blocks_replay_even_if_aggregator_is_bypassed() {
        let h = MeshHarness::new();
        let vote = h.vote(0, true, 1);

        h.registry.fulfill_attestation(&vote).await.unwrap();
        let err = h.registry.fulfill_attestation(&vote).await.unwrap_err();
        assert!(matches!(
            err,
            om_04_settlement::RegistryError::AlreadyUsed { nonce: 1 }
        ));
    }
}
