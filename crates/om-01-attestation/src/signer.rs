//! Attestation signing.
//!
//! Produces a recoverable signature over the codec's signing hash. The key
//! material is an external secret: it is never logged and never persisted
//! by this component.

use crate::domain::codec::{self, DomainParams};
use crate::domain::{Attestation, SignedAttestation};
use crate::error::SignError;
use shared_crypto::OperatorKeyPair;
use shared_types::{Address, Hash};

/// Signs attestations for one operator within one signing domain.
pub struct OperatorSigner {
    keypair: OperatorKeyPair,
    domain_separator: Hash,
}

impl OperatorSigner {
    /// Create a signer bound to one deployment's signing domain.
    pub fn new(keypair: OperatorKeyPair, params: &DomainParams) -> Self {
        Self {
            domain_separator: codec::domain_separator(params),
            keypair,
        }
    }

    /// The operator address signatures will recover to.
    pub fn address(&self) -> Address {
        self.keypair.address()
    }

    /// Validate and sign an attestation.
    ///
    /// The attestation is structurally validated first; an invalid record
    /// is never hashed or signed.
    pub fn sign(
        &self,
        attestation: Attestation,
        proof_cid: Option<String>,
    ) -> Result<SignedAttestation, SignError> {
        attestation.validate()?;

        let digest = codec::signing_hash(&attestation, &self.domain_separator);
        let signature = self.keypair.sign_prehash(&digest)?;

        Ok(SignedAttestation {
            operator: self.keypair.address(),
            attestation,
            signature,
            proof_cid,
        })
    }
}
