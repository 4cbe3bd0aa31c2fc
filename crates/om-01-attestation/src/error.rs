//! Error types for the attestation subsystem.

use thiserror::Error;

/// Verification failures, ordered by the check that produced them.
///
/// All variants are non-fatal to the aggregation system: a failing
/// attestation simply contributes no weight.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum VerifyError {
    /// Malformed attestation field; never hashed, signed or counted.
    #[error("Invalid attestation: {reason}")]
    InvalidAttestation { reason: String },

    /// The attestation's validity window has passed.
    #[error("Attestation expired at {expires_at} (now {now})")]
    Expired { expires_at: u64, now: u64 },

    /// Signature recovery failed or recovered a different address than the
    /// claimed operator.
    #[error("Invalid signature for claimed operator")]
    InvalidSignature,
}

/// Result type for verification operations.
pub type VerifyResult<T> = Result<T, VerifyError>;

/// Signing failures. Fatal to the calling operator, not to aggregation.
#[derive(Debug, Error)]
pub enum SignError {
    /// The attestation failed structural validation before signing.
    #[error(transparent)]
    Invalid(#[from] VerifyError),

    /// The key handle was unusable.
    #[error("Signing failed: {0}")]
    Crypto(#[from] shared_crypto::CryptoError),
}
