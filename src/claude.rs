use anyhow::{anyhow, Context, Result};
use reqwest::Client;
use serde_json::{json, Value};
use tracing::debug;

use crate::config::Config;

const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Client for the Anthropic Messages API. Submits one user message and
/// returns the text of the first content block of the reply.
#[derive(Clone)]
pub struct ClaudeClient {
    client: Client,
    host: String,
    api_key: String,
    model: String,
    max_tokens: u32,
}

impl ClaudeClient {
    pub fn new(config: &Config) -> Self {
        Self {
            client: Client::new(),
            host: config.anthropic_api_url.clone(),
            api_key: config.claude_api_key.clone(),
            model: config.claude_model.clone(),
            max_tokens: config.claude_max_tokens,
        }
    }

    pub async fn complete(&self, prompt: &str) -> Result<String> {
        let url = format!("{}/v1/messages", self.host.trim_end_matches('/'));

        let payload = json!({
            "model": self.model,
            "max_tokens": self.max_tokens,
            "messages": [
                {
                    "role": "user",
                    "content": prompt
                }
            ]
        });

        debug!("Requesting completion from {} ({})", url, self.model);

        let response = self
            .client
            .post(&url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&payload)
            .send()
            .await
            .context("completion request failed")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow!("completion request failed: {} {}", status, body));
        }

        let body: Value = response
            .json()
            .await
            .context("completion response was not valid JSON")?;

        let text = body
            .get("content")
            .and_then(|content| content.as_array())
            .and_then(|blocks| blocks.first())
            .and_then(|block| block.get("text"))
            .and_then(|text| text.as_str())
            .ok_or_else(|| anyhow!("unexpected completion response shape"))?;

        Ok(text.to_string())
    }
}
