//! Driven Ports (SPI - Outbound Dependencies)

use crate::error::RegistryError;
use async_trait::async_trait;
use om_01_attestation::SignedAttestation;
use shared_types::{Address, Nonce, TxRef};

/// The settlement registry is the final authority: it independently
/// re-verifies signature, operator weight, and nonce freshness on every
/// submission. Nothing this crate does can make an invalid attestation
/// settle.
#[async_trait]
pub trait SettlementRegistry: Send + Sync {
    /// Submit a signed attestation for fulfilment. Returns the settlement
    /// transaction reference on acceptance.
    async fn fulfill_attestation(
        &self,
        signed: &SignedAttestation,
    ) -> Result<TxRef, RegistryError>;

    /// True if the registry has already consumed this nonce.
    async fn is_nonce_used(&self, nonce: Nonce) -> Result<bool, RegistryError>;

    /// Sum of all registered operator weights.
    async fn total_registered_weight(&self) -> Result<u128, RegistryError>;

    /// Configured quorum threshold, in percent of total weight.
    async fn threshold_percent(&self) -> Result<u8, RegistryError>;

    /// Registered weight for an operator, `None` if unregistered.
    async fn operator_weight(&self, address: &Address) -> Result<Option<u128>, RegistryError>;
}
