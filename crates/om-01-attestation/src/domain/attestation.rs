//! Attestation entity
//!
//! An attestation is one operator's signed claim about a market's outcome.
//! Immutable once created; the aggregator treats a [`SignedAttestation`] as
//! an externally-supplied fact.

use crate::error::VerifyError;
use serde::{Deserialize, Serialize};
use shared_crypto::RecoverableSignature;
use shared_types::{Address, Hash, Nonce};

/// One operator's claim about a market outcome.
///
/// Fixed-width fields (`market_id`, `question_hash`) and the binary
/// `outcome` domain are enforced by construction; [`Attestation::validate`]
/// covers the remaining runtime checks. An attestation failing validation
/// is never hashed, signed or counted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attestation {
    /// Identifier of the question being resolved.
    pub market_id: Hash,
    /// Digest binding this attestation to the exact question text.
    /// Prevents question-substitution: a signature over one wording cannot
    /// be replayed for another.
    pub question_hash: Hash,
    /// Claimed outcome. Binary domain, no abstain state.
    pub outcome: bool,
    /// Which upstream data source produced this opinion. Non-empty.
    pub source_id: String,
    /// Unix timestamp after which this attestation must not be counted.
    pub expires_at: u64,
    /// Single-use value, unique per signing domain.
    pub nonce: Nonce,
}

impl Attestation {
    /// Structural field-domain validation.
    pub fn validate(&self) -> Result<(), VerifyError> {
        if self.source_id.is_empty() {
            return Err(VerifyError::InvalidAttestation {
                reason: "sourceId must be non-empty".to_string(),
            });
        }
        if self.expires_at == 0 {
            return Err(VerifyError::InvalidAttestation {
                reason: "expiresAt must be positive".to_string(),
            });
        }
        Ok(())
    }

    /// Whether the attestation has expired at `now`.
    pub fn is_expired(&self, now: u64) -> bool {
        now > self.expires_at
    }
}

/// An attestation together with its signature and optional proof anchor.
///
/// Created once by the operator that signed it; thereafter immutable. The
/// `proof_cid` references an audit bundle in content-addressed storage and
/// is not required for signature validity.
#[derive(Clone, Debug)]
pub struct SignedAttestation {
    /// Claimed signer. Verification recovers the address from the signature
    /// and compares against this field.
    pub operator: Address,
    /// The signed claim.
    pub attestation: Attestation,
    /// Recoverable signature over the codec's signing hash.
    pub signature: RecoverableSignature,
    /// Content identifier of the supporting proof bundle, if anchored.
    pub proof_cid: Option<String>,
}
