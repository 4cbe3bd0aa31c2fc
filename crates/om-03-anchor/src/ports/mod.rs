//! Driven Ports (SPI - Outbound Dependencies)

use crate::error::AnchorResult;
use async_trait::async_trait;

/// Raw content-addressed storage backend.
///
/// Implementations perform blocking network I/O and must be bounded by a
/// timeout; callers never invoke them while holding tally locks.
#[async_trait]
pub trait StorageGateway: Send + Sync {
    /// Store a blob, returning its content identifier.
    async fn put(&self, bytes: &[u8]) -> AnchorResult<String>;

    /// Retrieve a blob by content identifier.
    async fn get(&self, cid: &str) -> AnchorResult<Vec<u8>>;
}
