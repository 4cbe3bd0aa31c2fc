//! Domain model: the attestation value objects and the canonical codec.

pub mod attestation;
pub mod codec;

pub use attestation::{Attestation, SignedAttestation};
