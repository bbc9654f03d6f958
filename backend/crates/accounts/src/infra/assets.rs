//! CDN Asset Store
//!
//! Uploads locally staged files to the media CDN over HTTP and returns
//! the public URL the CDN assigns. Upload failures surface as
//! `Ok(None)` so callers decide whether the asset was mandatory.

use std::path::Path;

use serde::Deserialize;

use crate::domain::repository::AssetStore;
use crate::error::{AccountError, AccountResult};

/// CDN upload response body
#[derive(Deserialize)]
struct UploadResponse {
    url: Option<String>,
}

/// HTTP client for the media CDN upload endpoint
#[derive(Clone)]
pub struct CdnAssetStore {
    client: reqwest::Client,
    upload_url: String,
}

impl CdnAssetStore {
    pub fn new(upload_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            upload_url,
        }
    }
}

impl AssetStore for CdnAssetStore {
    async fn upload(&self, local_path: &Path) -> AccountResult<Option<String>> {
        let bytes = tokio::fs::read(local_path)
            .await
            .map_err(|e| AccountError::Asset(format!("cannot read staged file: {e}")))?;

        let file_name = local_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload.bin".to_string());

        let response = self
            .client
            .post(&self.upload_url)
            .header("X-File-Name", file_name)
            .body(bytes)
            .send()
            .await
            .map_err(|e| AccountError::Asset(format!("CDN upload failed: {e}")))?;

        if !response.status().is_success() {
            tracing::warn!(status = %response.status(), "CDN rejected upload");
            return Ok(None);
        }

        let body: UploadResponse = response
            .json()
            .await
            .map_err(|e| AccountError::Asset(format!("malformed CDN response: {e}")))?;

        Ok(body.url)
    }
}
