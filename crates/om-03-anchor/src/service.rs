//! Anchor Service - bundle upload and retrieval.

use crate::domain::bundle::ProofBundle;
use crate::domain::cid::is_valid_cid;
use crate::error::{AnchorError, AnchorResult};
use crate::ports::StorageGateway;
use std::sync::Arc;

/// Uploads and fetches audit bundles through a storage gateway.
pub struct AnchorService<G: StorageGateway> {
    gateway: Arc<G>,
}

impl<G: StorageGateway> AnchorService<G> {
    /// Create a service over one storage backend.
    pub fn new(gateway: Arc<G>) -> Self {
        Self { gateway }
    }

    /// Serialize and anchor a bundle, returning its content identifier.
    ///
    /// Backend failures surface as [`AnchorError::Unavailable`] and leave
    /// the bundle untouched; the caller owns retry policy.
    pub async fn upload(&self, bundle: &ProofBundle) -> AnchorResult<String> {
        let bytes = bundle
            .to_canonical_bytes()
            .map_err(|e| AnchorError::Codec(e.to_string()))?;

        let cid = self.gateway.put(&bytes).await?;
        if !is_valid_cid(&cid) {
            // A backend handing back an unparseable identifier is a backend
            // fault, not a caller fault.
            return Err(AnchorError::Unavailable(format!(
                "backend returned malformed cid: {cid}"
            )));
        }
        Ok(cid)
    }

    /// Retrieve and deserialize a bundle by content identifier.
    pub async fn fetch(&self, cid: &str) -> AnchorResult<ProofBundle> {
        if !is_valid_cid(cid) {
            return Err(AnchorError::InvalidCid(cid.to_string()));
        }

        let bytes = self.gateway.get(cid).await?;
        serde_json::from_slice(&bytes).map_err(|e| AnchorError::Codec(e.to_string()))
    }
}
