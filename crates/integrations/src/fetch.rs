//! Plain HTTP downloads of third-party pages and processed images.

use async_trait::async_trait;

use crate::error::{ensure_success, IntegrationError};

const SERVICE: &str = "Remote fetch";

/// Some news sites refuse requests without a browser user agent.
const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Download raw bytes (processed images).
    async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, IntegrationError>;

    /// Download a page as text (press articles).
    async fn fetch_text(&self, url: &str) -> Result<String, IntegrationError>;
}

pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, IntegrationError> {
        let response = self.client.get(url).send().await?;
        let response = ensure_success(SERVICE, response).await?;
        Ok(response.bytes().await?.to_vec())
    }

    async fn fetch_text(&self, url: &str) -> Result<String, IntegrationError> {
        let response = self
            .client
            .get(url)
            .header(reqwest::header::USER_AGENT, BROWSER_USER_AGENT)
            .send()
            .await?;
        let response = ensure_success(SERVICE, response).await?;
        Ok(response.text().await?)
    }
}
