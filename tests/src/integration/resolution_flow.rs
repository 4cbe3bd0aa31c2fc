//! # End-to-End Resolution Flow
//!
//! The complete path of a market resolution:
//!
//! ```text
//! [Operators] ──SignedAttestation──→ [Quorum (om-02)]
//!                                        │ verify (om-01), tally, threshold
//!                                        ↓
//!                              SettlementRequest
//!                                        │
//!                                        ↓
//!                            [Submitter (om-04)] ──→ [Registry]
//!                                                    re-verifies everything
//! ```
//!
//! Every component here is real: real keys, real signatures, real weight
//! lookups, and a registry that independently re-checks each submission.

#[cfg(test)]
use crate::harness::{MeshHarness, THRESHOLD_PERCENT, WEIGHTS};

#[cfg(test)]
use om_02_quorum::{Disposition, QuorumApi};

#[cfg(test)]
use shared_types::RequestId;

#[cfg(test)]
const REQUEST: RequestId = [0x77; 32];

#[cfg(test)]
mod tests {
    use super::*;
    use om_04_settlement::SettlementRegistry;

    #[tokio::test]
    async fn test_two_majority_votes_resolve_and_settle() {
        let h = MeshHarness::new();

        let first = h
            .quorum
            .submit_attestation(REQUEST, h.vote(0, true, 1))
            .await
            .unwrap();
        assert_eq!(first.disposition, Disposition::Counted);
        assert!(h.registry.fulfilled().is_empty());

        // 40 + 35 = 75 >= 66: resolution plus settlement of both winning votes.
        let second = h
            .quorum
            .submit_attestation(REQUEST, h.vote(1, true, 2))
            .await
            .unwrap();
        assert_eq!(second.disposition, Disposition::Resolved);

        let fulfilled = h.registry.fulfilled();
        assert_eq!(fulfilled.len(), 2);
        assert!(fulfilled.iter().all(|e| e.signed.attestation.outcome));
        assert!(h.registry.is_nonce_used(1).await.unwrap());
        assert!(h.registry.is_nonce_used(2).await.unwrap());
    }

    #[tokio::test]
    async fn test_minority_dissent_is_not_settled() {
        let h = MeshHarness::new();

        h.quorum
            .submit_attestation(REQUEST, h.vote(2, false, 1))
            .await
            .unwrap();
        h.quorum
            .submit_attestation(REQUEST, h.vote(0, true, 2))
            .await
            .unwrap();
        let resolved = h
            .quorum
            .submit_attestation(REQUEST, h.vote(1, true, 3))
            .await
            .unwrap();
        assert_eq!(resolved.disposition, Disposition::Resolved);
        assert!(resolved.state.resolution.unwrap().outcome);

        // Only the winning side reaches the registry.
        let fulfilled = h.registry.fulfilled();
        assert_eq!(fulfilled.len(), 2);
        assert!(fulfilled.iter().all(|e| e.signed.attestation.outcome));
        // The dissenting nonce was counted off-chain but never consumed
        // on the registry.
        assert!(!h.registry.is_nonce_used(1).await.unwrap());
    }

    #[tokio::test]
    async fn test_sixty_five_of_one_hundred_stays_pending() {
        let h = MeshHarness::new();

        // Operators 0 and 2: 40 + 25 = 65 < 66.
        h.quorum
            .submit_attestation(REQUEST, h.vote(0, true, 1))
            .await
            .unwrap();
        let second = h
            .quorum
            .submit_attestation(REQUEST, h.vote(2, true, 2))
            .await
            .unwrap();

        assert_eq!(second.disposition, Disposition::Counted);
        assert_eq!(second.state.yes_weight, WEIGHTS[0] + WEIGHTS[2]);
        assert!(!second.state.is_resolved());
        assert!(h.registry.fulfilled().is_empty());
    }

    #[tokio::test]
    async fn test_late_vote_never_triggers_second_settlement() {
        let h = MeshHarness::new();
        h.quorum
            .submit_attestation(REQUEST, h.vote(0, true, 1))
            .await
            .unwrap();
        h.quorum
            .submit_attestation(REQUEST, h.vote(1, true, 2))
            .await
            .unwrap();
        assert_eq!(h.registry.fulfilled().len(), 2);

        let late = h
            .quorum
            .submit_attestation(REQUEST, h.vote(2, false, 3))
            .await
            .unwrap();
        assert_eq!(late.disposition, Disposition::AlreadyResolved);
        assert!(late.state.resolution.unwrap().outcome);
        assert_eq!(h.registry.fulfilled().len(), 2);
    }

    #[tokio::test]
    async fn test_requests_resolve_independently() {
        let h = MeshHarness::new();
        let other: RequestId = [0x88; 32];

        h.quorum
            .submit_attestation(REQUEST, h.vote(0, true, 1))
            .await
            .unwrap();
        h.quorum
            .submit_attestation(other, h.vote(0, false, 2))
            .await
            .unwrap();

        let a = h.quorum.status(REQUEST).await.unwrap();
        let b = h.quorum.status(other).await.unwrap();
        assert_eq!(a.yes_weight, WEIGHTS[0]);
        assert_eq!(a.no_weight, 0);
        assert_eq!(b.no_weight, WEIGHTS[0]);
        assert_eq!(b.yes_weight, 0);
    }

    #[tokio::test]
    async fn test_duplicate_delivery_is_idempotent_end_to_end() {
        let h = MeshHarness::new();
        let vote = h.vote(0, true, 1);

        let first = h
            .quorum
            .submit_attestation(REQUEST, vote.clone())
            .await
            .unwrap();
        let second = h.quorum.submit_attestation(REQUEST, vote).await.unwrap();

        assert_eq!(first.state.yes_weight, second.state.yes_weight);
        assert_eq!(second.disposition, Disposition::DuplicateOperator);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_racing_duplicate_deliveries_settle_once() {
        let h = MeshHarness::new();

        // Every operator's vote delivered four times, all in flight at
        // once, against the real verifier and registry.
        let mut deliveries = Vec::new();
        for op in 0..3 {
            let vote = h.vote(op, true, op as u64 + 1);
            for _ in 0..4 {
                deliveries.push(vote.clone());
            }
        }

        let handles: Vec<_> = deliveries
            .into_iter()
            .map(|vote| {
                let quorum = std::sync::Arc::clone(&h.quorum);
                tokio::spawn(async move {
                    quorum.submit_attestation(REQUEST, vote).await.unwrap()
                })
            })
            .collect();

        let mut resolved = 0;
        for handle in handles {
            if handle.await.unwrap().disposition == Disposition::Resolved {
                resolved += 1;
            }
        }
        assert_eq!(resolved, 1);

        let snapshot = h.quorum.status(REQUEST).await.unwrap();
        assert!(snapshot.is_resolved());
        assert!(snapshot.yes_weight + snapshot.no_weight <= snapshot.total_registered_weight);

        // One settlement delivery: the registry log holds exactly the
        // counted winning set, each nonce consumed once.
        let fulfilled = h.registry.fulfilled();
        assert_eq!(fulfilled.len(), snapshot.counted_operators.len());
        assert!(fulfilled.iter().all(|e| e.signed.attestation.outcome));
    }

    #[tokio::test]
    async fn test_harness_threshold_matches_registry_view() {
        let h = MeshHarness::new();
        assert_eq!(
            h.registry.total_registered_weight().await.unwrap(),
            WEIGHTS.iter().sum::<u128>()
        );
        assert_eq!(
            h.registry.threshold_percent().await.unwrap(),
            THRESHOLD_PERCENT
        );
    }
}
