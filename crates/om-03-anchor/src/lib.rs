//! # om-03-anchor
//!
//! Proof Anchor: persists audit bundles to content-addressed storage and
//! retrieves them by content identifier.
//!
//! ## Overview
//!
//! - **ProofBundle**: the audit artifact referenced by attestations
//! - **CID validation**: structural only, no network call; two recognized
//!   families (CIDv0 `Qm…`, CIDv1 `b…`)
//! - **HTTP gateway**: IPFS-compatible add/cat endpoints, bounded timeout
//!
//! ## Decoupling
//!
//! Anchoring is decoupled from signature validity: a missing or invalid CID
//! never blocks quorum counting, it only weakens auditability.

pub mod adapters;
pub mod domain;
pub mod error;
pub mod ports;
pub mod service;

pub use adapters::http::HttpStorageGateway;
pub use domain::bundle::ProofBundle;
pub use domain::cid::is_valid_cid;
pub use error::{AnchorError, AnchorResult};
pub use ports::StorageGateway;
pub use service::AnchorService;
