//! OM-04: Submitter Service
//!
//! Idempotent delivery of signed attestations to the settlement registry.
//! The submitter pre-checks the registry's nonce state to skip work the
//! registry would reject anyway, and treats an `AlreadyUsed` answer from
//! either stage as success: the attestation is settled, which is all the
//! caller asked for. It never retries; retry policy belongs to the caller.

use crate::error::{RegistryError, SettlementError, SettlementResult};
use crate::ports::SettlementRegistry;
use om_01_attestation::SignedAttestation;
use shared_types::{addr_hex, TxRef};
use std::sync::Arc;

/// Outcome of a submission attempt.
#[derive(Clone, Debug, PartialEq)]
pub enum SubmitOutcome {
    /// The registry accepted the attestation.
    Submitted(TxRef),
    /// The nonce was already consumed; the attestation is settled.
    AlreadyUsed,
}

/// Delivers attestations to a [`SettlementRegistry`].
pub struct Submitter<R: SettlementRegistry> {
    registry: Arc<R>,
}

impl<R: SettlementRegistry> Submitter<R> {
    pub fn new(registry: Arc<R>) -> Self {
        Self { registry }
    }

    /// Submit one signed attestation.
    ///
    /// A consumed nonce, whether detected by the pre-check or reported by
    /// the registry during fulfilment, yields [`SubmitOutcome::AlreadyUsed`]
    /// rather than an error: double delivery of a settled attestation is
    /// harmless by construction. Every other registry failure is surfaced
    /// as [`SettlementError::SubmissionFailed`] without retry.
    pub async fn submit(&self, signed: &SignedAttestation) -> SettlementResult<SubmitOutcome> {
        let nonce = signed.attestation.nonce;

        match self.registry.is_nonce_used(nonce).await {
            Ok(true) => {
                tracing::debug!(
                    operator = %addr_hex(&signed.operator),
                    nonce,
                    "Nonce already consumed; skipping submission"
                );
                return Ok(SubmitOutcome::AlreadyUsed);
            }
            Ok(false) => {}
            Err(e) => {
                return Err(SettlementError::SubmissionFailed {
                    reason: e.to_string(),
                })
            }
        }

        match self.registry.fulfill_attestation(signed).await {
            Ok(tx_ref) => {
                tracing::info!(
                    operator = %addr_hex(&signed.operator),
                    nonce,
                    tx = %shared_types::hash_hex(&tx_ref),
                    "Attestation fulfilled"
                );
                Ok(SubmitOutcome::Submitted(tx_ref))
            }
            // Raced another submitter to the same nonce; still settled.
            Err(RegistryError::AlreadyUsed { nonce }) => {
                tracing::debug!(nonce, "Nonce consumed during submission race");
                Ok(SubmitOutcome::AlreadyUsed)
            }
            Err(e) => {
                tracing::warn!(
                    operator = %addr_hex(&signed.operator),
                    nonce,
                    error = %e,
                    "Submission failed"
                );
                Err(SettlementError::SubmissionFailed {
                    reason: e.to_string(),
                })
            }
        }
    }
}
