//! # Shared Crypto - Attestation Signing Primitives
//!
//! ## Components
//!
//! | Module | Algorithm | Use Case |
//! |--------|-----------|----------|
//! | `hashing` | Keccak-256 | Domain-separated attestation hashing |
//! | `ecdsa` | secp256k1 (recoverable) | Operator attestation signatures |
//!
//! ## Security Properties
//!
//! - **secp256k1**: RFC 6979 deterministic nonces, low-S normalization
//! - **Recoverable signatures**: a unique public key (and thus address) is
//!   recoverable from signature + prehash; the external settlement registry
//!   performs the same recovery independently
//! - Secret key material is zeroized on drop and never logged

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod ecdsa;
pub mod errors;
pub mod hashing;

// Re-exports
pub use ecdsa::{OperatorKeyPair, RecoverableSignature};
pub use errors::CryptoError;
pub use hashing::{keccak256, keccak256_many, KeccakHasher};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
