//! Error Handling for OM-04 (Settlement)

use shared_types::Nonce;
use thiserror::Error;

/// Failures reported by a settlement registry.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RegistryError {
    /// The registry has already consumed this nonce; the attestation is
    /// settled and a resubmission is a no-op.
    #[error("Nonce {nonce} already consumed by the registry")]
    AlreadyUsed {
        /// The consumed nonce.
        nonce: Nonce,
    },

    /// The registry refused the submission (bad signature, unknown
    /// operator, expired attestation).
    #[error("Registry rejected submission: {reason}")]
    Rejected {
        /// Registry-reported reason.
        reason: String,
    },

    /// Transport-level failure reaching the registry.
    #[error("Registry unavailable: {reason}")]
    Unavailable {
        /// Underlying cause.
        reason: String,
    },
}

/// Failures surfaced by the submitter.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SettlementError {
    /// Submission did not land and was not an idempotent duplicate.
    /// The caller decides whether to retry; the submitter never does.
    #[error("Submission failed: {reason}")]
    SubmissionFailed {
        /// Underlying registry failure.
        reason: String,
    },
}

/// Result alias for settlement operations.
pub type SettlementResult<T> = Result<T, SettlementError>;
