//! # Core Domain Entities
//!
//! Identifiers and operator records shared across subsystems.
//!
//! ## Clusters
//!
//! - **Identity**: `Address`, `Operator`
//! - **Resolution**: `Hash`, `RequestId`, `Nonce`, `TxRef`

use serde::{Deserialize, Serialize};

/// A 32-byte hash (Keccak-256 throughout this system).
pub type Hash = [u8; 32];

/// A 20-byte Ethereum-style address.
///
/// All operator identities use the address derived from the last 20 bytes
/// of the Keccak-256 hash of the uncompressed secp256k1 public key.
pub type Address = [u8; 20];

/// Identifier of one resolution request.
///
/// Distinct from the market id: one market may be resolved under several
/// request ids across deployments, but a request resolves at most once.
pub type RequestId = Hash;

/// Single-use replay-protection value, unique per signing domain.
pub type Nonce = u64;

/// Reference to a settlement transaction accepted by the external registry.
pub type TxRef = Hash;

/// An identity with registered voting weight, eligible to attest.
///
/// Weight is sourced from an external registry snapshot and is read-only
/// to this system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operator {
    /// Operator signing address.
    pub address: Address,
    /// Voting power (e.g. staked value). Non-negative by construction.
    pub weight: u128,
}

impl Operator {
    /// Create a new operator record.
    pub fn new(address: Address, weight: u128) -> Self {
        Self { address, weight }
    }
}

/// Render a 20-byte address as `0x`-prefixed hex for logs.
pub fn addr_hex(address: &Address) -> String {
    format!("0x{}", hex::encode(address))
}

/// Render a 32-byte hash as `0x`-prefixed hex for logs.
pub fn hash_hex(hash: &Hash) -> String {
    format!("0x{}", hex::encode(hash))
}
