//! HTTP storage gateway.
//!
//! Speaks the IPFS HTTP API (`/api/v0/add`, `/api/v0/cat`). Every request
//! carries the caller-supplied timeout so no anchor operation can block
//! indefinitely.

use crate::error::{AnchorError, AnchorResult};
use crate::ports::StorageGateway;
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

/// IPFS-compatible HTTP backend client.
pub struct HttpStorageGateway {
    base_url: String,
    client: reqwest::Client,
    timeout: Duration,
}

#[derive(Debug, Deserialize)]
struct AddResponse {
    #[serde(rename = "Hash")]
    hash: String,
}

impl HttpStorageGateway {
    /// Create a gateway client for one backend endpoint.
    ///
    /// `base_url` without trailing slash, e.g. `http://127.0.0.1:5001`.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            base_url: base_url.into(),
            client: reqwest::Client::new(),
            timeout,
        }
    }
}

#[async_trait]
impl StorageGateway for HttpStorageGateway {
    async fn put(&self, bytes: &[u8]) -> AnchorResult<String> {
        let part = reqwest::multipart::Part::bytes(bytes.to_vec()).file_name("bundle.json");
        let form = reqwest::multipart::Form::new().part("file", part);

        let response = self
            .client
            .post(format!("{}/api/v0/add", self.base_url))
            .multipart(form)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| AnchorError::Unavailable(e.to_string()))?;

        if !response.status().is_success() {
            return Err(AnchorError::Unavailable(format!(
                "add returned {}",
                response.status()
            )));
        }

        let body: AddResponse = response
            .json()
            .await
            .map_err(|e| AnchorError::Unavailable(e.to_string()))?;
        tracing::debug!(cid = %body.hash, "anchored bundle");
        Ok(body.hash)
    }

    async fn get(&self, cid: &str) -> AnchorResult<Vec<u8>> {
        let response = self
            .client
            .post(format!("{}/api/v0/cat", self.base_url))
            .query(&[("arg", cid)])
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| AnchorError::Unavailable(e.to_string()))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(AnchorError::NotFound(cid.to_string()));
        }
        if !response.status().is_success() {
            return Err(AnchorError::Unavailable(format!(
                "cat returned {}",
                response.status()
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| AnchorError::Unavailable(e.to_string()))?;
        Ok(bytes.to_vec())
    }
}
