//! Crypto error types.

use thiserror::Error;

/// Cryptographic operation errors.
#[derive(Debug, Error)]
pub enum CryptoError {
    /// Invalid private key
    #[error("Invalid private key")]
    InvalidPrivateKey,

    /// Invalid public key
    #[error("Invalid public key")]
    InvalidPublicKey,

    /// Invalid signature format
    #[error("Invalid signature format")]
    InvalidSignatureFormat,

    /// Invalid recovery id byte
    #[error("Invalid recovery id: {0}")]
    InvalidRecoveryId(u8),

    /// Signing failed (key handle unusable)
    #[error("Signing failed: {0}")]
    SigningFailed(String),

    /// Public key recovery failed
    #[error("Signature recovery failed")]
    RecoveryFailed,
}
