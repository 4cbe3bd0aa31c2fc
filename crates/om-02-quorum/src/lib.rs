//! # om-02-quorum
//!
//! Quorum Aggregator: converts a stream of verified, weighted attestations
//! into a single resolved outcome, exactly once, per request.
//!
//! ## Overview
//!
//! This subsystem provides:
//! - **Nonce Guard**: replay protection via an atomic consumed-nonce set
//! - **Weighted tally**: one counted vote per operator per request
//! - **Exactly-once resolution**: tally update and threshold evaluation in
//!   one critical section per request; resolution is write-once
//!
//! ## Trust Model
//!
//! This aggregator is an optimistic mirror of the external settlement
//! registry, which independently re-verifies signatures, weights and nonces
//! and is the final authority. A divergence here can waste a settlement
//! round-trip but can never release funds incorrectly.
//!
//! ```text
//! Operators ──SignedAttestation──→ Quorum (om-02)
//!                                      │
//!                                      ├── verify via om-01 (outside the lock)
//!                                      ├── tally + threshold (per-request lock)
//!                                      │
//!                                      └── SettlementRequest ──→ Submitter (om-04)
//! ```

pub mod domain;
pub mod error;
pub mod ports;
pub mod service;

pub use domain::nonce_guard::NonceGuard;
pub use domain::tally::{ConflictReport, QuorumSnapshot, QuorumState, Resolution};
pub use error::{QuorumError, QuorumResult};
pub use ports::inbound::{AggregationOutcome, Disposition, QuorumApi};
pub use ports::outbound::{
    AttestationVerification, OperatorRegistryProvider, SettlementGateway, SettlementRequest,
};
pub use service::{QuorumConfig, QuorumService};
