// AI router: model selection and sequential fallback across providers.

use std::time::Duration;

use reqwest::Client;
use tracing::{info, warn};

use crate::config::GatewayConfig;
use crate::error::{ProviderError, RouterError};
use crate::providers::{self, ProviderAdapter};
use crate::types::{ChatReply, ModelKind, ModelStatus, PromptPacket, ScrapedPage};

/// Fixed persona sent as the system prompt on every request.
const SYSTEM_PERSONA: &str = "You are MAMAR.AI, a cyberpunk AI assistant that helps users \
navigate the digital world. You have access to real-time web data and can provide \
cutting-edge insights.";

// LLM responses can be slow; connection failures should surface quickly
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);
const CONNECT_TIMEOUT: Duration = Duration::from_secs(15);

pub struct AiRouter {
    adapters: Vec<Box<dyn ProviderAdapter>>,
    default_model: Option<ModelKind>,
    max_tokens: u32,
    temperature: f32,
}

impl AiRouter {
    pub fn new(config: &GatewayConfig) -> Result<Self, RouterError> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .connect_timeout(CONNECT_TIMEOUT)
            .build()
            .map_err(RouterError::ClientBuild)?;

        Ok(AiRouter {
            adapters: providers::build_adapters(config, &client),
            default_model: config.default_model,
            max_tokens: config.max_tokens,
            temperature: config.temperature,
        })
    }

    #[cfg(test)]
    fn with_adapters(
        adapters: Vec<Box<dyn ProviderAdapter>>,
        default_model: Option<ModelKind>,
        max_tokens: u32,
        temperature: f32,
    ) -> Self {
        AiRouter {
            adapters,
            default_model,
            max_tokens,
            temperature,
        }
    }

    /// Route a chat message to one provider, transparently retrying the other
    /// configured providers on failure. Candidates are attempted strictly
    /// sequentially in the fixed priority order, target first; every candidate
    /// sees the identical prompt.
    pub async fn chat(
        &self,
        message: &str,
        preferred_model: Option<ModelKind>,
        context: Option<&ScrapedPage>,
    ) -> Result<ChatReply, RouterError> {
        let configured: Vec<ModelKind> = self
            .adapters
            .iter()
            .filter(|a| a.is_configured())
            .map(|a| a.model())
            .collect();
        if configured.is_empty() {
            return Err(RouterError::NoProvidersConfigured);
        }

        let target = preferred_model
            .or(self.default_model)
            .unwrap_or(configured[0]);

        let packet = PromptPacket {
            system: SYSTEM_PERSONA.to_string(),
            user_message: build_outbound(message, context),
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        };

        // Target goes first even when unconfigured (its missing-credential
        // failure then feeds the fallback path); the rest are skipped unless
        // configured.
        let mut candidates: Vec<&dyn ProviderAdapter> = Vec::new();
        if let Some(adapter) = self.adapters.iter().find(|a| a.model() == target) {
            candidates.push(adapter.as_ref());
        }
        for adapter in &self.adapters {
            if adapter.model() != target && adapter.is_configured() {
                candidates.push(adapter.as_ref());
            }
        }

        let mut last_error: Option<ProviderError> = None;
        for adapter in candidates {
            let model = adapter.model();
            match adapter.send(&packet).await {
                Ok(text) => {
                    if last_error.is_some() {
                        info!(%model, "fallback succeeded");
                    }
                    return Ok(ChatReply { text, model });
                }
                Err(err) => {
                    warn!(%model, error = %err, "model call failed; trying next candidate");
                    last_error = Some(err);
                }
            }
        }

        match last_error {
            Some(last) => Err(RouterError::AllProvidersExhausted { last }),
            // Unreachable: at least one candidate exists once `configured`
            // is non-empty.
            None => Err(RouterError::NoProvidersConfigured),
        }
    }

    /// Availability summary per model, with capability tags.
    pub fn model_status(&self) -> Vec<ModelStatus> {
        self.adapters
            .iter()
            .map(|adapter| ModelStatus {
                model: adapter.model(),
                configured: adapter.is_configured(),
                best_for: adapter.model().best_for(),
            })
            .collect()
    }
}

/// Prepend scraped context as a fixed-format block; without context the raw
/// message goes out unchanged. `ScrapedPage` holds only strings, so
/// serialization cannot fail.
fn build_outbound(message: &str, context: Option<&ScrapedPage>) -> String {
    match context {
        Some(page) => {
            let json = serde_json::to_string(page).unwrap_or_default();
            format!("Context from web: {}\n\nUser query: {}", json, message)
        }
        None => message.to_string(),
    }
}
