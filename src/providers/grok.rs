// Grok (xAI) adapter - OpenAI-compatible API, configurable endpoint

use reqwest::Client;
use serde_json::{json, Value};

use crate::config::GatewayConfig;
use crate::error::ProviderError;
use crate::providers::{api_error, ProviderAdapter};
use crate::types::{ModelKind, PromptPacket};

const WIRE_MODEL: &str = "grok-beta";

pub struct GrokAdapter {
    client: Client,
    api_key: Option<String>,
    base_url: String,
}

impl GrokAdapter {
    pub fn new(config: &GatewayConfig, client: Client) -> Self {
        GrokAdapter {
            client,
            api_key: config.xai_api_key.clone(),
            base_url: config.xai_endpoint.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait::async_trait]
impl ProviderAdapter for GrokAdapter {
    fn model(&self) -> ModelKind {
        ModelKind::Grok
    }

    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    async fn send(&self, packet: &PromptPacket) -> Result<String, ProviderError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(ProviderError::MissingCredential {
                model: ModelKind::Grok,
            })?;

        let body = json!({
            "model": WIRE_MODEL,
            "messages": [
                { "role": "system", "content": packet.system },
                { "role": "user", "content": packet.user_message }
            ],
            "max_tokens": packet.max_tokens,
            "temperature": packet.temperature,
        });

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", api_key))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| ProviderError::Http {
                model: ModelKind::Grok,
                source: e,
            })?;

        if !response.status().is_success() {
            return Err(api_error(ModelKind::Grok, response).await);
        }

        let payload: Value = response.json().await.map_err(|e| ProviderError::Http {
            model: ModelKind::Grok,
            source: e,
        })?;

        let text = payload["choices"]
            .as_array()
            .and_then(|choices| choices.first())
            .and_then(|choice| choice["message"]["content"].as_str())
            .ok_or(ProviderError::MalformedResponse {
                model: ModelKind::Grok,
                detail: "no message content in choices",
            })?;

        Ok(text.to_string())
    }
}
