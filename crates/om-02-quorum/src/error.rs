//! Error types for the quorum subsystem.

use om_01_attestation::VerifyError;
use thiserror::Error;

/// Quorum subsystem errors.
///
/// Verification variants are non-fatal to the submission stream: the caller
/// logs and continues, and the attestation contributes no weight.
#[derive(Debug, Error)]
pub enum QuorumError {
    /// Attestation failed verification (invalid, expired, or bad signature).
    #[error(transparent)]
    Verification(#[from] VerifyError),

    /// The claimed operator has no registered weight.
    #[error("Unknown operator: {address}")]
    UnknownOperator { address: String },

    /// Weight lookup against the registry snapshot failed.
    #[error("Registry lookup failed: {reason}")]
    RegistryUnavailable { reason: String },

    /// Configuration corruption. Fatal at startup, never at runtime.
    #[error("Invalid threshold percent {percent}: must be in (0, 100]")]
    InvalidThreshold { percent: u8 },

    /// Configuration corruption: no registered weight to vote with.
    #[error("Total registered weight must be positive")]
    InvalidTotalWeight,

    /// The registry snapshot handed out more weight than is registered.
    /// The vote is rejected without consuming its nonce.
    #[error("Inflated weight snapshot for {address}: counting {weight} would exceed the registered total")]
    InflatedWeight { address: String, weight: u128 },

    /// Post-resolution hand-off to settlement failed. The tally is already
    /// resolved and unaffected; retry policy belongs to the caller.
    #[error("Settlement hand-off failed: {reason}")]
    SettlementFailed { reason: String },
}

/// Result type for quorum operations.
pub type QuorumResult<T> = Result<T, QuorumError>;
