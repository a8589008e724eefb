// Anthropic Claude adapter

use reqwest::Client;
use serde_json::{json, Value};

use crate::config::GatewayConfig;
use crate::error::ProviderError;
use crate::providers::{api_error, ProviderAdapter};
use crate::types::{ModelKind, PromptPacket};

const MESSAGES_URL: &str = "https://api.anthropic.com/v1/messages";
const WIRE_MODEL: &str = "claude-3-opus-20240229";
const API_VERSION: &str = "2023-06-01";

pub struct AnthropicAdapter {
    client: Client,
    api_key: Option<String>,
}

impl AnthropicAdapter {
    pub fn new(config: &GatewayConfig, client: Client) -> Self {
        AnthropicAdapter {
            client,
            api_key: config.anthropic_api_key.clone(),
        }
    }
}

#[async_trait::async_trait]
impl ProviderAdapter for AnthropicAdapter {
    fn model(&self) -> ModelKind {
        ModelKind::Claude
    }

    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    async fn send(&self, packet: &PromptPacket) -> Result<String, ProviderError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(ProviderError::MissingCredential {
                model: ModelKind::Claude,
            })?;

        // The messages API takes the system prompt as a top-level field, not
        // a message role.
        let body = json!({
            "model": WIRE_MODEL,
            "max_tokens": packet.max_tokens,
            "messages": [
                { "role": "user", "content": packet.user_message }
            ],
            "system": packet.system,
        });

        let response = self
            .client
            .post(MESSAGES_URL)
            .header("x-api-key", api_key)
            .header("anthropic-version", API_VERSION)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| ProviderError::Http {
                model: ModelKind::Claude,
                source: e,
            })?;

        if !response.status().is_success() {
            return Err(api_error(ModelKind::Claude, response).await);
        }

        let payload: Value = response.json().await.map_err(|e| ProviderError::Http {
            model: ModelKind::Claude,
            source: e,
        })?;

        let text = payload["content"]
            .as_array()
            .and_then(|blocks| blocks.first())
            .and_then(|block| block["text"].as_str())
            .ok_or(ProviderError::MalformedResponse {
                model: ModelKind::Claude,
                detail: "no text block in content",
            })?;

        Ok(text.to_string())
    }
}
