//! # om-04-settlement
//!
//! Submitter: idempotent delivery of signed attestations to the external
//! settlement registry.
//!
//! ## Trust Model
//!
//! The registry is the final authority. It re-verifies signature, operator
//! weight and nonce freshness on every submission, so the submitter's only
//! correctness obligations are (a) never error on a nonce the registry has
//! already consumed, and (b) never retry on its own; callers own retry
//! policy.

pub mod adapters;
pub mod error;
pub mod ports;
pub mod service;

pub use adapters::in_memory::InMemoryRegistry;
pub use adapters::quorum_gateway::RegistrySettlementGateway;
pub use error::{RegistryError, SettlementError, SettlementResult};
pub use ports::SettlementRegistry;
pub use service::{SubmitOutcome, Submitter};
