//! Domain model: replay guard and per-request weighted tally.

pub mod nonce_guard;
pub mod tally;

pub use nonce_guard::NonceGuard;
pub use tally::{ConflictReport, QuorumSnapshot, QuorumState, Resolution};
