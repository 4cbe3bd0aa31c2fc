//! Quorum Service - Core aggregation logic
//!
//! Per-request state lives in a map of independently-lockable tallies, so
//! cross-request submissions run fully parallel while tally update and
//! threshold evaluation for one request form a single critical section.
//! Verification, weight lookup, and the settlement hand-off all happen
//! outside that lock.

use crate::domain::nonce_guard::NonceGuard;
use crate::domain::tally::{ConflictReport, QuorumState, VoteEffect};
use crate::error::{QuorumError, QuorumResult};
use crate::ports::inbound::{AggregationOutcome, Disposition, QuorumApi};
use crate::ports::outbound::{
    AttestationVerification, OperatorRegistryProvider, SettlementGateway, SettlementRequest,
};
use async_trait::async_trait;
use dashmap::{DashMap, DashSet};
use om_01_attestation::SignedAttestation;
use parking_lot::Mutex;
use shared_types::{addr_hex, hash_hex, RequestId};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

/// Quorum configuration: one registry snapshot per deployment.
#[derive(Clone, Copy, Debug)]
pub struct QuorumConfig {
    /// Total weight registered with the settlement registry.
    pub total_registered_weight: u128,
    /// Required agreement percentage, must be in `(0, 100]`.
    pub threshold_percent: u8,
}

impl QuorumConfig {
    /// Validate at startup; configuration corruption is fatal.
    pub fn validate(&self) -> QuorumResult<()> {
        if self.threshold_percent == 0 || self.threshold_percent > 100 {
            return Err(QuorumError::InvalidThreshold {
                percent: self.threshold_percent,
            });
        }
        // A zero total would make the required weight zero and let any
        // single vote resolve.
        if self.total_registered_weight == 0 {
            return Err(QuorumError::InvalidTotalWeight);
        }
        Ok(())
    }
}

/// Quorum Aggregator implementation.
///
/// An optimistic mirror of the external settlement registry: it resolves
/// requests exactly once off-chain, while the registry remains the final
/// authority on funds.
pub struct QuorumService<V, R, S>
where
    V: AttestationVerification,
    R: OperatorRegistryProvider,
    S: SettlementGateway,
{
    config: QuorumConfig,
    verifier: Arc<V>,
    registry: Arc<R>,
    settlement: Arc<S>,
    requests: DashMap<RequestId, Arc<Mutex<QuorumState>>>,
    nonce_guard: NonceGuard,
    // Requests resolved but not yet confirmed by the settlement gateway.
    unsettled: DashSet<RequestId>,
}

impl<V, R, S> QuorumService<V, R, S>
where
    V: AttestationVerification,
    R: OperatorRegistryProvider,
    S: SettlementGateway,
{
    /// Create a new quorum service. Fails fast on corrupt configuration.
    pub fn new(
        config: QuorumConfig,
        verifier: Arc<V>,
        registry: Arc<R>,
        settlement: Arc<S>,
    ) -> QuorumResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            verifier,
            registry,
            settlement,
            requests: DashMap::new(),
            nonce_guard: NonceGuard::new(),
            unsettled: DashSet::new(),
        })
    }

    /// Lazily create the tally for a request on first arrival.
    fn state_for(&self, request_id: RequestId) -> Arc<Mutex<QuorumState>> {
        self.requests
            .entry(request_id)
            .or_insert_with(|| {
                Arc::new(Mutex::new(QuorumState::new(
                    request_id,
                    self.config.total_registered_weight,
                    self.config.threshold_percent,
                )))
            })
            .clone()
    }

    fn current_timestamp() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0)
    }
}

#[async_trait]
impl<V, R, S> QuorumApi for QuorumService<V, R, S>
where
    V: AttestationVerification + 'static,
    R: OperatorRegistryProvider + 'static,
    S: SettlementGateway + 'static,
{
    async fn submit_attestation(
        &self,
        request_id: RequestId,
        signed: SignedAttestation,
    ) -> QuorumResult<AggregationOutcome> {
        // 1. Verify authenticity and validity outside any lock (pure).
        let now = Self::current_timestamp();
        if let Err(e) = self.verifier.verify(&signed, now) {
            tracing::warn!(
                request = %hash_hex(&request_id),
                operator = %addr_hex(&signed.operator),
                error = %e,
                "rejected attestation"
            );
            return Err(e.into());
        }

        // 2. Weight lookup against the registry snapshot (async I/O, no lock).
        let weight = self
            .registry
            .operator_weight(&signed.operator)
            .await?
            .ok_or_else(|| QuorumError::UnknownOperator {
                address: addr_hex(&signed.operator),
            })?;

        // 3. Critical section: dedup, replay guard, tally, threshold.
        let state = self.state_for(request_id);
        let (outcome, settlement_request) = {
            let mut state = state.lock();

            if let Some(resolution) = state.resolution() {
                tracing::debug!(
                    request = %hash_hex(&request_id),
                    outcome = resolution.outcome,
                    "submission after resolution"
                );
                // A hand-off the gateway has not yet confirmed is re-driven
                // by whichever submission arrives next. The submitter is
                // idempotent, so a redelivery racing a concurrent success
                // settles nothing twice.
                let redelivery = self.unsettled.contains(&request_id).then(|| SettlementRequest {
                    correlation_id: Uuid::new_v4(),
                    request_id,
                    outcome: resolution.outcome,
                    winning_votes: state.winning_votes(resolution.outcome),
                    tally: state.snapshot(),
                });
                (
                    AggregationOutcome {
                        disposition: Disposition::AlreadyResolved,
                        state: state.snapshot(),
                    },
                    redelivery,
                )
            } else {
                // Re-check expiry with a fresh clock; callers may have
                // stalled between verification and delivery.
                let now = Self::current_timestamp();
                if signed.attestation.is_expired(now) {
                    return Err(QuorumError::Verification(
                        om_01_attestation::VerifyError::Expired {
                            expires_at: signed.attestation.expires_at,
                            now,
                        },
                    ));
                }

                // Operator dedup precedes the weight and nonce checks so a
                // duplicate delivery of an already-counted vote reports as
                // duplicate, not replay. The weight check precedes the
                // nonce guard so a rejected snapshot never burns a nonce.
                let effect = if state.has_counted(&signed.operator) {
                    state.count_vote(&signed, weight, now)
                } else if state.would_exceed_total(weight) {
                    tracing::error!(
                        request = %hash_hex(&request_id),
                        operator = %addr_hex(&signed.operator),
                        weight,
                        "registry weight snapshot exceeds registered total"
                    );
                    return Err(QuorumError::InflatedWeight {
                        address: addr_hex(&signed.operator),
                        weight,
                    });
                } else if !self.nonce_guard.try_consume(signed.attestation.nonce) {
                    tracing::warn!(
                        request = %hash_hex(&request_id),
                        operator = %addr_hex(&signed.operator),
                        nonce = signed.attestation.nonce,
                        "replayed nonce"
                    );
                    return Ok(AggregationOutcome {
                        disposition: Disposition::ReplayedNonce,
                        state: state.snapshot(),
                    });
                } else {
                    state.count_vote(&signed, weight, now)
                };

                match effect {
                    VoteEffect::Resolved(resolution) => {
                        tracing::info!(
                            request = %hash_hex(&request_id),
                            outcome = resolution.outcome,
                            yes_weight = state.snapshot().yes_weight,
                            no_weight = state.snapshot().no_weight,
                            "quorum reached"
                        );
                        // Marked unsettled until the gateway confirms.
                        self.unsettled.insert(request_id);
                        let request = SettlementRequest {
                            correlation_id: Uuid::new_v4(),
                            request_id,
                            outcome: resolution.outcome,
                            winning_votes: state.winning_votes(resolution.outcome),
                            tally: state.snapshot(),
                        };
                        (
                            AggregationOutcome {
                                disposition: Disposition::Resolved,
                                state: state.snapshot(),
                            },
                            Some(request),
                        )
                    }
                    VoteEffect::Counted => (
                        AggregationOutcome {
                            disposition: Disposition::Counted,
                            state: state.snapshot(),
                        },
                        None,
                    ),
                    VoteEffect::DuplicateOperator => (
                        AggregationOutcome {
                            disposition: Disposition::DuplicateOperator,
                            state: state.snapshot(),
                        },
                        None,
                    ),
                    VoteEffect::Conflicting => {
                        tracing::warn!(
                            request = %hash_hex(&request_id),
                            operator = %addr_hex(&signed.operator),
                            "contradictory duplicate vote recorded"
                        );
                        (
                            AggregationOutcome {
                                disposition: Disposition::DuplicateOperator,
                                state: state.snapshot(),
                            },
                            None,
                        )
                    }
                    VoteEffect::Overweight => {
                        return Err(QuorumError::InflatedWeight {
                            address: addr_hex(&signed.operator),
                            weight,
                        });
                    }
                    VoteEffect::AlreadyResolved(_) => (
                        AggregationOutcome {
                            disposition: Disposition::AlreadyResolved,
                            state: state.snapshot(),
                        },
                        None,
                    ),
                }
            }
        };

        // 4. Settlement hand-off outside the lock. A failure here never
        // touches the resolved tally; the request stays marked unsettled
        // and the hand-off is re-driven by the next submission.
        if let Some(request) = settlement_request {
            match self.settlement.settle(request).await {
                Ok(()) => {
                    self.unsettled.remove(&request_id);
                }
                Err(e) => {
                    tracing::error!(
                        request = %hash_hex(&request_id),
                        error = %e,
                        "settlement hand-off failed; redelivery pending"
                    );
                }
            }
        }

        Ok(outcome)
    }

    async fn status(&self, request_id: RequestId) -> Option<crate::domain::tally::QuorumSnapshot> {
        self.requests
            .get(&request_id)
            .map(|state| state.lock().snapshot())
    }

    async fn conflicting_reports(&self) -> Vec<ConflictReport> {
        self.requests
            .iter()
            .flat_map(|entry| entry.value().lock().conflicts().to_vec())
            .collect()
    }
}
