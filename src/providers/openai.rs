// OpenAI (GPT-4o) adapter

use reqwest::Client;
use serde_json::{json, Value};

use crate::config::GatewayConfig;
use crate::error::ProviderError;
use crate::providers::{api_error, ProviderAdapter};
use crate::types::{ModelKind, PromptPacket};

const BASE_URL: &str = "https://api.openai.com/v1";
const WIRE_MODEL: &str = "gpt-4o";

pub struct OpenAiAdapter {
    client: Client,
    api_key: Option<String>,
}

impl OpenAiAdapter {
    pub fn new(config: &GatewayConfig, client: Client) -> Self {
        OpenAiAdapter {
            client,
            api_key: config.openai_api_key.clone(),
        }
    }
}

#[async_trait::async_trait]
impl ProviderAdapter for OpenAiAdapter {
    fn model(&self) -> ModelKind {
        ModelKind::Gpt4o
    }

    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    async fn send(&self, packet: &PromptPacket) -> Result<String, ProviderError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(ProviderError::MissingCredential {
                model: ModelKind::Gpt4o,
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
            .post(format!("{}/chat/completions", BASE_URL))
            .header("Authorization", format!("Bearer {}", api_key))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| ProviderError::Http {
                model: ModelKind::Gpt4o,
                source: e,
            })?;

        if !response.status().is_success() {
            return Err(api_error(ModelKind::Gpt4o, response).await);
        }

        let payload: Value = response.json().await.map_err(|e| ProviderError::Http {
            model: ModelKind::Gpt4o,
            source: e,
        })?;

        let text = payload["choices"]
            .as_array()
            .and_then(|choices| choices.first())
            .and_then(|choice| choice["message"]["content"].as_str())
            .ok_or(ProviderError::MalformedResponse {
                model: ModelKind::Gpt4o,
                detail: "no message content in choices",
            })?;

        Ok(text.to_string())
    }
}
