//! # om-01-attestation
//!
//! Attestation Codec, Signer and Verifier.
//!
//! ## Overview
//!
//! This subsystem provides:
//! - **Codec**: canonical two-stage domain-separated hashing of attestation
//!   records (`0x19 0x01 || domainSeparator || structHash`)
//! - **Signer**: recoverable secp256k1 signatures over the signing hash
//! - **Verifier**: ordered authenticity and validity checks
//!
//! ## Wire Contract
//!
//! The hash layout in [`domain::codec`] is a compatibility requirement, not
//! an implementation detail: the external settlement registry recomputes
//! the identical bytes before releasing funds. Any two implementations must
//! produce byte-identical hashes for identical field values.
//!
//! ```text
//! Operator ──outcome──→ Codec ──signingHash──→ Signer ──SignedAttestation──→ Quorum (om-02)
//!                                                              │
//!                                                              └──→ Settlement registry (external, re-verifies)
//! ```

pub mod domain;
pub mod error;
pub mod signer;
pub mod verifier;

pub use domain::codec::{domain_separator, signing_hash, struct_hash, DomainParams};
pub use domain::{Attestation, SignedAttestation};
pub use error::{SignError, VerifyError, VerifyResult};
pub use signer::OperatorSigner;
pub use verifier::AttestationVerifier;
