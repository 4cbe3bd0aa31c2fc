//! In-memory settlement registry.
//!
//! A reference registry for integration wiring and tests. It behaves the
//! way the real registry must: every submission is independently
//! re-verified (signature recovery, operator registration, nonce
//! freshness), so an upstream bug cannot settle an invalid attestation
//! through it.

use crate::error::RegistryError;
use crate::ports::SettlementRegistry;
use async_trait::async_trait;
use om_01_attestation::{AttestationVerifier, SignedAttestation};
use parking_lot::Mutex;
use shared_crypto::keccak256_many;
use shared_types::{Address, Nonce, TxRef};
use std::collections::{HashMap, HashSet};
use std::time::{SystemTime, UNIX_EPOCH};

/// Settled record kept by the in-memory registry.
#[derive(Clone, Debug)]
pub struct FulfilledEntry {
    pub tx_ref: TxRef,
    pub signed: SignedAttestation,
}

/// Registry double holding operator weights and consumed nonces in memory.
pub struct InMemoryRegistry {
    verifier: AttestationVerifier,
    weights: HashMap<Address, u128>,
    threshold_percent: u8,
    used_nonces: Mutex<HashSet<Nonce>>,
    fulfilled: Mutex<Vec<FulfilledEntry>>,
}

impl InMemoryRegistry {
    pub fn new(
        verifier: AttestationVerifier,
        weights: HashMap<Address, u128>,
        threshold_percent: u8,
    ) -> Self {
        Self {
            verifier,
            weights,
            threshold_percent,
            used_nonces: Mutex::new(HashSet::new()),
            fulfilled: Mutex::new(Vec::new()),
        }
    }

    /// All fulfilled submissions, in acceptance order.
    pub fn fulfilled(&self) -> Vec<FulfilledEntry> {
        self.fulfilled.lock().clone()
    }

    fn current_timestamp() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0)
    }

    /// Deterministic fake transaction reference for a settled attestation.
    fn tx_ref_for(signed: &SignedAttestation) -> TxRef {
        keccak256_many(&[
            signed.signature.as_bytes(),
            &signed.attestation.nonce.to_be_bytes(),
        ])
    }
}

#[async_trait]
impl SettlementRegistry for InMemoryRegistry {
    async fn fulfill_attestation(
        &self,
        signed: &SignedAttestation,
    ) -> Result<TxRef, RegistryError> {
        self.verifier
            .verify(signed, Self::current_timestamp())
            .map_err(|e| RegistryError::Rejected {
                reason: e.to_string(),
            })?;

        if !self.weights.contains_key(&signed.operator) {
            return Err(RegistryError::Rejected {
                reason: format!(
                    "operator {} is not registered",
                    shared_types::addr_hex(&signed.operator)
                ),
            });
        }

        let nonce = signed.attestation.nonce;
        // Single lock guards both the freshness check and the consumption.
        let mut used = self.used_nonces.lock();
        if !used.insert(nonce) {
            return Err(RegistryError::AlreadyUsed { nonce });
        }

        let tx_ref = Self::tx_ref_for(signed);
        self.fulfilled.lock().push(FulfilledEntry {
            tx_ref,
            signed: signed.clone(),
        });
        Ok(tx_ref)
    }

    async fn is_nonce_used(&self, nonce: Nonce) -> Result<bool, RegistryError> {
        Ok(self.used_nonces.lock().contains(&nonce))
    }

    async fn total_registered_weight(&self) -> Result<u128, RegistryError> {
        Ok(self.weights.values().sum())
    }

    async fn threshold_percent(&self) -> Result<u8, RegistryError> {
        Ok(self.threshold_percent)
    }

    async fn operator_weight(&self, address: &Address) -> Result<Option<u128>, RegistryError> {
        Ok(self.weights.get(address).copied())
    }
}

/// The aggregator's weight snapshot reads from the same registry it
/// settles against.
#[async_trait]
impl om_02_quorum::OperatorRegistryProvider for InMemoryRegistry {
    async fn operator_weight(
        &self,
        address: &Address,
    ) -> om_02_quorum::QuorumResult<Option<u128>> {
        Ok(self.weights.get(address).copied())
    }
}
