//! Per-request weighted tally.
//!
//! One [`QuorumState`] exists per resolution request, created lazily on
//! first attestation arrival. Resolution is write-once: once the tally
//! crosses the required weight the outcome is permanent.

use om_01_attestation::SignedAttestation;
use shared_types::{Address, RequestId};
use std::collections::HashMap;

/// The permanent result of a resolved request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Resolution {
    /// The winning outcome.
    pub outcome: bool,
    /// Unix timestamp at which the threshold was crossed.
    pub resolved_at: u64,
}

/// A contradictory duplicate vote, recorded for operator policing.
///
/// The first counted vote is never affected; conflicts are observations
/// only, surfaced so an external process can penalize the operator.
#[derive(Clone, Debug)]
pub struct ConflictReport {
    /// Request the conflict was observed on.
    pub request_id: RequestId,
    /// The misbehaving operator.
    pub operator: Address,
    /// The outcome that was counted.
    pub counted_outcome: bool,
    /// The contradictory outcome submitted later.
    pub conflicting_outcome: bool,
    /// Unix timestamp of the observation.
    pub observed_at: u64,
}

/// A counted vote, retained so the winning set can be handed to settlement.
#[derive(Clone, Debug)]
pub struct RecordedVote {
    /// The attestation as delivered.
    pub signed: SignedAttestation,
    /// Operator weight at counting time.
    pub weight: u128,
}

/// What counting one vote did to the tally.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum VoteEffect {
    /// Weight added; threshold not yet met.
    Counted,
    /// Weight added and this vote crossed the threshold.
    Resolved(Resolution),
    /// Operator already counted for this request; identical opinion.
    DuplicateOperator,
    /// Operator already counted with the opposite outcome.
    Conflicting,
    /// Counting this weight would push the tally past the registered
    /// total; the registry snapshot is inconsistent. Vote not counted.
    Overweight,
    /// Request already resolved; no re-tally.
    AlreadyResolved(Resolution),
}

/// Mutable per-request state, owned by the aggregator.
///
/// Invariants:
/// - at most one counted vote per operator (first valid attestation wins)
/// - `yes_weight + no_weight <= total_registered_weight`, enforced at
///   counting time (an inflated weight is rejected, not clamped)
/// - resolution is monotonic: once set it never changes, even if the other
///   side would later cross the threshold (first-crosser-wins, relevant
///   only for thresholds at or below 50 percent)
#[derive(Debug)]
pub struct QuorumState {
    request_id: RequestId,
    total_registered_weight: u128,
    threshold_percent: u8,
    counted_operators: HashMap<Address, bool>,
    votes: Vec<RecordedVote>,
    conflicts: Vec<ConflictReport>,
    yes_weight: u128,
    no_weight: u128,
    resolution: Option<Resolution>,
}

impl QuorumState {
    /// Create an empty tally for one request.
    pub fn new(request_id: RequestId, total_registered_weight: u128, threshold_percent: u8) -> Self {
        Self {
            request_id,
            total_registered_weight,
            threshold_percent,
            counted_operators: HashMap::new(),
            votes: Vec::new(),
            conflicts: Vec::new(),
            yes_weight: 0,
            no_weight: 0,
            resolution: None,
        }
    }

    /// Weight one side must accumulate to resolve:
    /// `ceil(total_registered_weight * threshold_percent / 100)`.
    pub fn required_weight(&self) -> u128 {
        let scaled = self
            .total_registered_weight
            .saturating_mul(u128::from(self.threshold_percent));
        scaled / 100 + u128::from(scaled % 100 != 0)
    }

    /// Whether this request has resolved.
    pub fn is_resolved(&self) -> bool {
        self.resolution.is_some()
    }

    /// The permanent resolution, if any.
    pub fn resolution(&self) -> Option<Resolution> {
        self.resolution
    }

    /// Whether an operator's vote has already been counted.
    pub fn has_counted(&self, operator: &Address) -> bool {
        self.counted_operators.contains_key(operator)
    }

    /// Whether counting `weight` would push the tally past the registered
    /// total. True only when the registry snapshot is inconsistent with the
    /// configured total.
    pub fn would_exceed_total(&self, weight: u128) -> bool {
        self.yes_weight
            .saturating_add(self.no_weight)
            .saturating_add(weight)
            > self.total_registered_weight
    }

    /// Count one verified vote. Must be called within the per-request
    /// critical section: the tally update and threshold evaluation here are
    /// what guarantee at most one resolution event.
    pub fn count_vote(&mut self, signed: &SignedAttestation, weight: u128, now: u64) -> VoteEffect {
        if let Some(resolution) = self.resolution {
            return VoteEffect::AlreadyResolved(resolution);
        }

        let outcome = signed.attestation.outcome;
        if let Some(&counted) = self.counted_operators.get(&signed.operator) {
            if counted != outcome {
                self.conflicts.push(ConflictReport {
                    request_id: self.request_id,
                    operator: signed.operator,
                    counted_outcome: counted,
                    conflicting_outcome: outcome,
                    observed_at: now,
                });
                return VoteEffect::Conflicting;
            }
            return VoteEffect::DuplicateOperator;
        }

        if self.would_exceed_total(weight) {
            return VoteEffect::Overweight;
        }

        self.counted_operators.insert(signed.operator, outcome);
        self.votes.push(RecordedVote {
            signed: signed.clone(),
            weight,
        });
        if outcome {
            self.yes_weight = self.yes_weight.saturating_add(weight);
        } else {
            self.no_weight = self.no_weight.saturating_add(weight);
        }

        let required = self.required_weight();
        // First side to cross wins; evaluation order matters only for
        // thresholds at or below 50 percent, where both sides could cross
        // in principle but never within one call.
        if self.yes_weight >= required {
            let resolution = Resolution {
                outcome: true,
                resolved_at: now,
            };
            self.resolution = Some(resolution);
            return VoteEffect::Resolved(resolution);
        }
        if self.no_weight >= required {
            let resolution = Resolution {
                outcome: false,
                resolved_at: now,
            };
            self.resolution = Some(resolution);
            return VoteEffect::Resolved(resolution);
        }

        VoteEffect::Counted
    }

    /// Counted votes agreeing with the resolved outcome.
    pub fn winning_votes(&self, outcome: bool) -> Vec<RecordedVote> {
        self.votes
            .iter()
            .filter(|vote| vote.signed.attestation.outcome == outcome)
            .cloned()
            .collect()
    }

    /// Conflict observations recorded on this request.
    pub fn conflicts(&self) -> &[ConflictReport] {
        &self.conflicts
    }

    /// Read-only snapshot, safe to hand out beyond the lock.
    pub fn snapshot(&self) -> QuorumSnapshot {
        QuorumSnapshot {
            request_id: self.request_id,
            total_registered_weight: self.total_registered_weight,
            threshold_percent: self.threshold_percent,
            counted_operators: self.counted_operators.keys().copied().collect(),
            yes_weight: self.yes_weight,
            no_weight: self.no_weight,
            resolution: self.resolution,
        }
    }
}

/// Point-in-time view of one request's tally.
#[derive(Clone, Debug)]
pub struct QuorumSnapshot {
    /// Request this tally belongs to.
    pub request_id: RequestId,
    /// Total weight registered for the deployment.
    pub total_registered_weight: u128,
    /// Required agreement percentage, in `(0, 100]`.
    pub threshold_percent: u8,
    /// Operators whose vote has been counted.
    pub counted_operators: Vec<Address>,
    /// Accumulated weight attesting `true`.
    pub yes_weight: u128,
    /// Accumulated weight attesting `false`.
    pub no_weight: u128,
    /// Permanent resolution, if crossed.
    pub resolution: Option<Resolution>,
}

impl QuorumSnapshot {
    /// Whether the request had resolved at snapshot time.
    pub fn is_resolved(&self) -> bool {
        self.resolution.is_some()
    }
}
