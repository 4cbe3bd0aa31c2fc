//! Shared wiring for integration and adversarial scenarios.
//!
//! One harness, real components end to end: operators sign with real keys,
//! the quorum service verifies with the real verifier, and resolutions are
//! delivered through the real submitter into an in-memory settlement
//! registry that independently re-verifies everything.

use om_01_attestation::{
    Attestation, AttestationVerifier, DomainParams, OperatorSigner, SignedAttestation,
};
use om_02_quorum::{QuorumConfig, QuorumService};
use om_03_anchor::{AnchorError, AnchorResult, StorageGateway};
use om_04_settlement::{InMemoryRegistry, RegistrySettlementGateway, Submitter};
use parking_lot::Mutex;
use shared_crypto::OperatorKeyPair;
use shared_types::Address;
use std::collections::HashMap;
use std::sync::Arc;

/// Operator weights used across scenarios. Any two of the first two
/// operators clear a 66 percent threshold; the first and third do not.
pub const WEIGHTS: [u128; 3] = [40, 35, 25];

/// Threshold in percent of total registered weight.
pub const THRESHOLD_PERCENT: u8 = 66;

/// A well-formed CIDv0 used by the in-memory storage backend.
pub const BUNDLE_CID: &str = "QmYwAPJzv5CZsnA625s3Xf2nemtYgPpHdWEz79ojWnPbdG";

pub fn domain() -> DomainParams {
    DomainParams {
        chain_id: 31337,
        verifying_registry: [0x42; 20],
    }
}

pub fn far_future() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
        + 3600
}

pub fn attestation(outcome: bool, nonce: u64) -> Attestation {
    Attestation {
        market_id: [0x11; 32],
        question_hash: [0x22; 32],
        outcome,
        source_id: "knowledge-api".to_string(),
        expires_at: far_future(),
        nonce,
    }
}

/// Fully wired mesh: signers, quorum aggregator, submitter, registry.
pub struct MeshHarness {
    pub signers: Vec<OperatorSigner>,
    pub registry: Arc<InMemoryRegistry>,
    pub quorum: Arc<
        QuorumService<AttestationVerifier, InMemoryRegistry, RegistrySettlementGateway<InMemoryRegistry>>,
    >,
}

impl MeshHarness {
    pub fn new() -> Self {
        let signers: Vec<OperatorSigner> = (0..WEIGHTS.len())
            .map(|_| OperatorSigner::new(OperatorKeyPair::generate(), &domain()))
            .collect();

        let weights: HashMap<Address, u128> = signers
            .iter()
            .zip(WEIGHTS)
            .map(|(s, w)| (s.address(), w))
            .collect();

        let registry = Arc::new(InMemoryRegistry::new(
            AttestationVerifier::new(&domain()),
            weights,
            THRESHOLD_PERCENT,
        ));

        let quorum = Arc::new(QuorumService::new(
            QuorumConfig {
                total_registered_weight: WEIGHTS.iter().sum(),
                threshold_percent: THRESHOLD_PERCENT,
            },
            Arc::new(AttestationVerifier::new(&domain())),
            Arc::clone(&registry),
            Arc::new(RegistrySettlementGateway::new(Submitter::new(Arc::clone(
                &registry,
            )))),
        )
        .expect("valid harness config"));

        Self {
            signers,
            registry,
            quorum,
        }
    }

    /// Sign a vote for operator `op` with no anchored proof.
    pub fn vote(&self, op: usize, outcome: bool, nonce: u64) -> SignedAttestation {
        self.signers[op]
            .sign(attestation(outcome, nonce), None)
            .expect("harness attestation is valid")
    }

    /// Sign a vote carrying a proof anchor.
    pub fn vote_with_proof(
        &self,
        op: usize,
        outcome: bool,
        nonce: u64,
        proof_cid: String,
    ) -> SignedAttestation {
        self.signers[op]
            .sign(attestation(outcome, nonce), Some(proof_cid))
            .expect("harness attestation is valid")
    }
}

impl Default for MeshHarness {
    fn default() -> Self {
        Self::new()
    }
}

/// In-memory storage backend for anchor scenarios.
#[derive(Default)]
pub struct MemoryStorageGateway {
    blobs: Mutex<HashMap<String, Vec<u8>>>,
}

#[async_trait::async_trait]
impl StorageGateway for MemoryStorageGateway {
    async fn put(&self, bytes: &[u8]) -> AnchorResult<String> {
        self.blobs
            .lock()
            .insert(BUNDLE_CID.to_string(), bytes.to_vec());
        Ok(BUNDLE_CID.to_string())
    }

    async fn get(&self, cid: &str) -> AnchorResult<Vec<u8>> {
        self.blobs
            .lock()
            .get(cid)
            .cloned()
            .ok_or_else(|| AnchorError::NotFound(cid.to_string()))
    }
}
