//! Canonical attestation codec.
//!
//! Deterministic, collision-resistant encoding with two-stage domain
//! separation:
//!
//! ```text
//! signingHash = keccak256(0x19 0x01 || domainSeparator || structHash)
//! ```
//!
//! This exact byte layout is a wire contract shared with the external
//! settlement registry, which recomputes it independently before releasing
//! funds. Field order, the type descriptor strings, and the 32-byte
//! big-endian word encoding below must never change without a coordinated
//! registry migration.

use super::attestation::Attestation;
use shared_crypto::{keccak256, keccak256_many};
use shared_types::{Address, Hash};

/// Type descriptor for the signing domain.
pub const DOMAIN_TYPE: &str =
    "EIP712Domain(string name,string version,uint256 chainId,address verifyingContract)";

/// Type descriptor for the attestation struct. Field order is fixed.
pub const ATTESTATION_TYPE: &str = "Attestation(bytes32 marketId,bytes32 questionHash,\
uint8 outcome,string sourceId,uint256 expiresAt,uint256 nonce)";

/// Domain name bound into every separator.
pub const DOMAIN_NAME: &str = "OracleMesh";

/// Domain version bound into every separator.
pub const DOMAIN_VERSION: &str = "1";

/// Parameters binding attestations to one chain and one settlement
/// registry deployment. Prevents cross-chain and cross-deployment replay.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DomainParams {
    /// Chain id of the settlement chain.
    pub chain_id: u64,
    /// Address of the settlement registry contract.
    pub verifying_registry: Address,
}

/// Encode a u64 as a 32-byte big-endian word.
fn word_from_u64(value: u64) -> [u8; 32] {
    let mut word = [0u8; 32];
    word[24..].copy_from_slice(&value.to_be_bytes());
    word
}

/// Encode an address as a left-padded 32-byte word.
fn word_from_address(address: &Address) -> [u8; 32] {
    let mut word = [0u8; 32];
    word[12..].copy_from_slice(address);
    word
}

/// Compute the 32-byte domain separator for one deployment.
pub fn domain_separator(params: &DomainParams) -> Hash {
    keccak256_many(&[
        &keccak256(DOMAIN_TYPE.as_bytes()),
        &keccak256(DOMAIN_NAME.as_bytes()),
        &keccak256(DOMAIN_VERSION.as_bytes()),
        &word_from_u64(params.chain_id),
        &word_from_address(&params.verifying_registry),
    ])
}

/// Fixed-layout hash over all attestation fields.
///
/// Dynamic-length `sourceId` is hashed before inclusion so every field
/// occupies exactly one 32-byte word.
pub fn struct_hash(attestation: &Attestation) -> Hash {
    keccak256_many(&[
        &keccak256(ATTESTATION_TYPE.as_bytes()),
        &attestation.market_id,
        &attestation.question_hash,
        &word_from_u64(u64::from(attestation.outcome)),
        &keccak256(attestation.source_id.as_bytes()),
        &word_from_u64(attestation.expires_at),
        &word_from_u64(attestation.nonce),
    ])
}

/// The digest operators sign and verifiers recover against.
pub fn signing_hash(attestation: &Attestation, domain_separator: &Hash) -> Hash {
    keccak256_many(&[&[0x19, 0x01], domain_separator, &struct_hash(attestation)])
}
