//! # Anchored Proof Flow
//!
//! Operators anchor an audit bundle before signing, carry its content
//! identifier inside the attestation envelope, and auditors fetch the
//! bundle back after settlement. Anchoring is advisory: it never gates
//! counting or settlement.

#[cfg(test)]
mod tests {
    use crate::harness::{MeshHarness, MemoryStorageGateway, BUNDLE_CID};
    use om_02_quorum::{Disposition, QuorumApi};
    use om_03_anchor::{AnchorService, ProofBundle};
    use shared_types::RequestId;
    use std::sync::Arc;

    const REQUEST: RequestId = [0x55; 32];

    fn bundle() -> ProofBundle {
        ProofBundle {
            market_id: [0x11; 32],
            question: "Will it rain in Lisbon on 2026-09-01?".to_string(),
            outcome: true,
            source_id: "knowledge-api".to_string(),
            sources: vec!["https://example.org/report/1".to_string()],
            timestamp: 1_790_000_000,
            data: serde_json::json!({"confidence": 0.97}),
        }
    }

    #[tokio::test]
    async fn test_proof_cid_travels_to_settlement() {
        let anchor = AnchorService::new(Arc::new(MemoryStorageGateway::default()));
        let cid = anchor.upload(&bundle()).await.unwrap();
        assert_eq!(cid, BUNDLE_CID);

        let h = MeshHarness::new();
        h.quorum
            .submit_attestation(REQUEST, h.vote_with_proof(0, true, 1, cid.clone()))
            .await
            .unwrap();
        let resolved = h
            .quorum
            .submit_attestation(REQUEST, h.vote_with_proof(1, true, 2, cid.clone()))
            .await
            .unwrap();
        assert_eq!(resolved.disposition, Disposition::Resolved);

        // The anchor reference survives end to end into the registry log.
        let fulfilled = h.registry.fulfilled();
        assert!(fulfilled
            .iter()
            .all(|e| e.signed.proof_cid.as_deref() == Some(BUNDLE_CID)));
    }

    #[tokio::test]
    async fn test_auditor_fetches_bundle_after_settlement() {
        let anchor = AnchorService::new(Arc::new(MemoryStorageGateway::default()));
        let cid = anchor.upload(&bundle()).await.unwrap();

        let fetched = anchor.fetch(&cid).await.unwrap();
        assert_eq!(fetched, bundle());
    }

    #[tokio::test]
    async fn test_missing_anchor_does_not_block_counting() {
        let h = MeshHarness::new();

        let counted = h
            .quorum
            .submit_attestation(REQUEST, h.vote(0, true, 1))
            .await
            .unwrap();
        assert_eq!(counted.disposition, Disposition::Counted);
    }
}
