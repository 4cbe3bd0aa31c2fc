//! Proof bundle entity
//!
//! An audit artifact, not security-critical: the bundle's CID is referenced
//! by attestations, but signature validity never depends on it. The field
//! order below is the serialization order, which must stay fixed so the
//! same bundle always anchors to the same CID.

use serde::{Deserialize, Serialize};
use shared_types::Hash;

/// Supporting evidence for one attestation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofBundle {
    /// Market the evidence concerns.
    pub market_id: Hash,
    /// Full question text.
    pub question: String,
    /// Outcome the evidence supports.
    pub outcome: bool,
    /// Upstream data source that produced the opinion.
    pub source_id: String,
    /// Evidence references (URLs, document ids). Non-empty upstream.
    pub sources: Vec<String>,
    /// Unix timestamp the evidence was gathered.
    pub timestamp: u64,
    /// Free-form supporting payload.
    pub data: serde_json::Value,
}

impl ProofBundle {
    /// Deterministic serialization for anchoring: struct fields in declared
    /// order, no whitespace.
    pub fn to_canonical_bytes(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }
}
