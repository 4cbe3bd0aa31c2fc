//! # Recoverable ECDSA Signatures (secp256k1)
//!
//! Operator attestation signatures over a 32-byte prehash.
//!
//! ## Security Properties
//!
//! - RFC 6979 deterministic nonces (no RNG dependency for signing)
//! - Low-S normalization
//! - Recoverable: signature + prehash yields a unique public key, so the
//!   verifier needs only the claimed operator address, never the key
//!
//! ## Wire Format
//!
//! 65 bytes `r || s || v` with `v` in {27, 28}, the layout the external
//! settlement registry feeds to its ecrecover check.

use crate::errors::CryptoError;
use crate::hashing::keccak256;
use k256::ecdsa::{RecoveryId, Signature, SigningKey, VerifyingKey};
use k256::elliptic_curve::sec1::ToEncodedPoint;
use shared_types::Address;
use zeroize::Zeroize;

/// Recoverable ECDSA signature (65 bytes, `r || s || v`).
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct RecoverableSignature([u8; 65]);

impl RecoverableSignature {
    /// Create from raw bytes. `v` must be 0, 1, 27 or 28; it is stored
    /// normalized to {27, 28}.
    pub fn from_bytes(mut bytes: [u8; 65]) -> Result<Self, CryptoError> {
        bytes[64] = match bytes[64] {
            0 | 27 => 27,
            1 | 28 => 28,
            other => return Err(CryptoError::InvalidRecoveryId(other)),
        };
        // Reject malformed r || s early.
        Signature::from_slice(&bytes[..64]).map_err(|_| CryptoError::InvalidSignatureFormat)?;
        Ok(Self(bytes))
    }

    /// Get raw bytes.
    pub fn as_bytes(&self) -> &[u8; 65] {
        &self.0
    }

    /// Recover the signer address from this signature and a 32-byte prehash.
    pub fn recover_address(&self, prehash: &[u8; 32]) -> Result<Address, CryptoError> {
        let signature =
            Signature::from_slice(&self.0[..64]).map_err(|_| CryptoError::InvalidSignatureFormat)?;
        let recovery_id = RecoveryId::from_byte(self.0[64] - 27)
            .ok_or(CryptoError::InvalidRecoveryId(self.0[64]))?;

        let verifying_key = VerifyingKey::recover_from_prehash(prehash, &signature, recovery_id)
            .map_err(|_| CryptoError::RecoveryFailed)?;

        Ok(address_of(&verifying_key))
    }
}

impl std::fmt::Debug for RecoverableSignature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "RecoverableSignature(r||s||v, v={})", self.0[64])
    }
}

/// Derive the Ethereum-style address: last 20 bytes of the Keccak-256 hash
/// of the uncompressed public key (without the 0x04 SEC1 tag).
fn address_of(verifying_key: &VerifyingKey) -> Address {
    let point = verifying_key.to_encoded_point(false);
    let digest = keccak256(&point.as_bytes()[1..]);
    let mut address = [0u8; 20];
    address.copy_from_slice(&digest[12..]);
    address
}

/// secp256k1 operator keypair.
pub struct OperatorKeyPair {
    signing_key: SigningKey,
}

impl OperatorKeyPair {
    /// Generate random keypair.
    pub fn generate() -> Self {
        let signing_key = SigningKey::random(&mut rand::thread_rng());
        Self { signing_key }
    }

    /// Create from secret key bytes (32 bytes).
    pub fn from_bytes(bytes: [u8; 32]) -> Result<Self, CryptoError> {
        let signing_key =
            SigningKey::from_bytes((&bytes).into()).map_err(|_| CryptoError::InvalidPrivateKey)?;
        Ok(Self { signing_key })
    }

    /// Get the operator address for this keypair.
    pub fn address(&self) -> Address {
        address_of(self.signing_key.verifying_key())
    }

    /// Sign a 32-byte prehash, producing a recoverable signature
    /// (deterministic RFC 6979).
    pub fn sign_prehash(&self, prehash: &[u8; 32]) -> Result<RecoverableSignature, CryptoError> {
        let (signature, recovery_id) = self
            .signing_key
            .sign_prehash_recoverable(prehash)
            .map_err(|e| CryptoError::SigningFailed(e.to_string()))?;

        let mut bytes = [0u8; 65];
        bytes[..64].copy_from_slice(&signature.to_bytes());
        bytes[64] = recovery_id.to_byte() + 27;
        Ok(RecoverableSignature(bytes))
    }

    /// Get secret key bytes (for serialization).
    pub fn to_bytes(&self) -> [u8; 32] {
        self.signing_key.to_bytes().into()
    }
}

impl Drop for OperatorKeyPair {
    fn drop(&mut self) {
        // Zeroize secret key material
        let mut bytes: [u8; 32] = self.signing_key.to_bytes().into();
        bytes.zeroize();
    }
}
