//! Error types for the anchor subsystem.

use thiserror::Error;

/// Anchor subsystem errors.
///
/// `Unavailable` is transient; retry with backoff belongs to the caller and
/// must never mutate quorum state.
#[derive(Debug, Error)]
pub enum AnchorError {
    /// Storage backend unreachable or returned a server error.
    #[error("Anchor backend unavailable: {0}")]
    Unavailable(String),

    /// No content behind the given CID.
    #[error("Content not found: {0}")]
    NotFound(String),

    /// The string is not a structurally valid content identifier.
    #[error("Invalid CID: {0}")]
    InvalidCid(String),

    /// Bundle serialization or deserialization failed.
    #[error("Bundle codec error: {0}")]
    Codec(String),
}

/// Result type for anchor operations.
pub type AnchorResult<T> = Result<T, AnchorError>;
