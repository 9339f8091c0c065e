//! Background removal for media images.

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::error::{ensure_success, IntegrationError};

const SERVICE: &str = "Background removal";
const CLAID_EDIT_URL: &str = "https://api.claid.ai/v1-beta1/image/edit";

#[async_trait]
pub trait BackgroundRemover: Send + Sync {
    /// Process the image at `url`; returns a temporary URL of the PNG result.
    async fn remove_background(&self, url: &str) -> Result<String, IntegrationError>;
}

pub struct ClaidClient {
    client: reqwest::Client,
    api_key: Option<String>,
}

impl ClaidClient {
    pub fn new(client: reqwest::Client, api_key: Option<String>) -> Self {
        Self { client, api_key }
    }
}

fn edit_request(input_url: &str) -> Value {
    json!({
        "input": input_url,
        "operations": { "background": { "remove": true } },
        "output": { "format": "png" },
    })
}

/// The result URL is at `output.tmp_url`, or nested under `data`.
fn processed_url(body: &Value) -> Option<&str> {
    body.pointer("/data/output/tmp_url")
        .or_else(|| body.pointer("/output/tmp_url"))
        .and_then(Value::as_str)
}

#[async_trait]
impl BackgroundRemover for ClaidClient {
    async fn remove_background(&self, url: &str) -> Result<String, IntegrationError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(IntegrationError::NotConfigured(SERVICE))?;

        let response = self
            .client
            .post(CLAID_EDIT_URL)
            .bearer_auth(api_key)
            .json(&edit_request(url))
            .send()
            .await?;
        let response = ensure_success(SERVICE, response).await?;
        let body: Value = response.json().await?;

        processed_url(&body)
            .map(str::to_string)
            .ok_or_else(|| IntegrationError::InvalidResponse {
                service: SERVICE,
                detail: "no processed image URL".into(),
            })
    }
}
