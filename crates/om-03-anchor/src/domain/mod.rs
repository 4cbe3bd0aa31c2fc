//! Domain model: the audit bundle and CID structural validation.

pub mod bundle;
pub mod cid;

pub use bundle::ProofBundle;
pub use cid::is_valid_cid;
