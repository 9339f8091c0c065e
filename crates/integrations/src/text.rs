//! JSON-mode text generation.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::{ensure_success, IntegrationError};

const SERVICE: &str = "DeepSeek";
const MODEL: &str = "deepseek-chat";

/// A chat model that answers with a single JSON object.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate_json(&self, system: &str, user: &str) -> Result<Value, IntegrationError>;
}

/// DeepSeek chat-completions client using `response_format: json_object`.
pub struct DeepSeekClient {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatCompletion {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

impl DeepSeekClient {
    pub fn new(client: reqwest::Client, base_url: &str, api_key: Option<String>) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        }
    }

    fn request_body(system: &str, user: &str) -> Value {
        json!({
            "model": MODEL,
            "messages": [
                { "role": "system", "content": system },
                { "role": "user", "content": user },
            ],
            "response_format": { "type": "json_object" },
        })
    }
}

/// Pull the JSON object out of the first choice's message content.
fn parse_completion(completion: ChatCompletion) -> Result<Value, IntegrationError> {
    let content = completion
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .ok_or_else(|| IntegrationError::InvalidResponse {
            service: SERVICE,
            detail: "empty completion".into(),
        })?;

    serde_json::from_str(&content).map_err(|e| IntegrationError::InvalidResponse {
        service: SERVICE,
        detail: format!("content is not JSON: {e}"),
    })
}

#[async_trait]
impl TextGenerator for DeepSeekClient {
    async fn generate_json(&self, system: &str, user: &str) -> Result<Value, IntegrationError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(IntegrationError::NotConfigured(SERVICE))?;

        let response = self
            .client
            .post(format!("{}/v1/chat/completions", self.base_url))
            .bearer_auth(api_key)
            .json(&Self::request_body(system, user))
            .send()
            .await?;
        let response = ensure_success(SERVICE, response).await?;

        let completion: ChatCompletion = response.json().await?;
        let value = parse_completion(completion)?;
        tracing::debug!("Text generation completed");
        Ok(value)
    }
}
