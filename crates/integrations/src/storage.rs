//! Object storage on the CDN.

use async_trait::async_trait;
use std::sync::LazyLock;

use regex::Regex;

use crate::config::BunnyConfig;
use crate::error::{ensure_success, IntegrationError};

const SERVICE: &str = "Bunny Storage";

/// Anything outside this set is replaced with `_` in uploaded file names.
static UNSAFE_FILE_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-zA-Z0-9._-]").expect("valid regex"));

/// Write-only object store that serves stored objects from a public URL.
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Store `bytes` under `path` and return the public URL.
    async fn put(
        &self,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, IntegrationError>;
}

/// Replace characters that are unsafe in storage keys.
pub fn sanitize_file_name(name: &str) -> String {
    UNSAFE_FILE_CHARS.replace_all(name, "_").into_owned()
}

/// Storage key for an upload: `{folder}/{millis}_{sanitized name}`.
pub fn upload_key(folder: &str, millis: i64, file_name: &str) -> String {
    let folder = folder.trim_matches('/');
    format!("{folder}/{millis}_{}", sanitize_file_name(file_name))
}

/// Bunny Storage client. Built without credentials it reports
/// [`IntegrationError::NotConfigured`] on every call.
pub struct BunnyStorage {
    client: reqwest::Client,
    config: Option<BunnyConfig>,
}

impl BunnyStorage {
    pub fn new(client: reqwest::Client, config: Option<BunnyConfig>) -> Self {
        Self { client, config }
    }

    /// Public URL of `path` under the pull zone.
    pub fn public_url(pull_base_url: &str, path: &str) -> String {
        format!("{}/{}", pull_base_url.trim_end_matches('/'), path)
    }

    fn put_url(config: &BunnyConfig, path: &str) -> String {
        let endpoint = config.storage_endpoint.trim_end_matches('/');
        let endpoint = if endpoint.starts_with("http://") || endpoint.starts_with("https://") {
            endpoint.to_string()
        } else {
            format!("https://{endpoint}")
        };
        format!("{endpoint}/{}/{path}", config.storage_zone)
    }
}

#[async_trait]
impl ObjectStorage for BunnyStorage {
    async fn put(
        &self,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, IntegrationError> {
        let config = self
            .config
            .as_ref()
            .ok_or(IntegrationError::NotConfigured(SERVICE))?;

        let size = bytes.len();
        let response = self
            .client
            .put(Self::put_url(config, path))
            .header("AccessKey", &config.access_key)
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .body(bytes)
            .send()
            .await?;
        ensure_success(SERVICE, response).await?;

        tracing::info!(path, size, "Object stored");
        Ok(Self::public_url(&config.pull_base_url, path))
    }
}
