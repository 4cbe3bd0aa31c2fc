//! Attestation verification.
//!
//! Establishes that a [`SignedAttestation`] is authentic and currently
//! valid. Checks run in a fixed order and short-circuit on first failure:
//!
//! 1. field-domain validation
//! 2. expiry against the caller-supplied clock
//! 3. recompute the signing hash for this domain
//! 4. recover the signer address and compare to the claimed operator
//!
//! Pure and stateless; safe to call concurrently.

use crate::domain::codec::{self, DomainParams};
use crate::domain::{Attestation, SignedAttestation};
use crate::error::{VerifyError, VerifyResult};
use shared_types::{addr_hex, Hash};

/// Verifier bound to one deployment's signing domain.
#[derive(Clone, Debug)]
pub struct AttestationVerifier {
    domain_separator: Hash,
}

impl AttestationVerifier {
    /// Create a verifier for one signing domain.
    pub fn new(params: &DomainParams) -> Self {
        Self {
            domain_separator: codec::domain_separator(params),
        }
    }

    /// The signing hash this verifier recovers against.
    pub fn signing_hash(&self, attestation: &Attestation) -> Hash {
        codec::signing_hash(attestation, &self.domain_separator)
    }

    /// Verify authenticity and current validity at time `now`.
    pub fn verify(&self, signed: &SignedAttestation, now: u64) -> VerifyResult<()> {
        signed.attestation.validate()?;

        if signed.attestation.is_expired(now) {
            return Err(VerifyError::Expired {
                expires_at: signed.attestation.expires_at,
                now,
            });
        }

        let digest = self.signing_hash(&signed.attestation);
        let recovered = signed
            .signature
            .recover_address(&digest)
            .map_err(|_| VerifyError::InvalidSignature)?;

        if recovered != signed.operator {
            tracing::warn!(
                claimed = %addr_hex(&signed.operator),
                recovered = %addr_hex(&recovered),
                "signature recovered to a different operator"
            );
            return Err(VerifyError::InvalidSignature);
        }

        Ok(())
    }
}
