// Provider adapters module

pub mod anthropic;
pub mod grok;
pub mod openai;

use reqwest::Client;

pub use anthropic::AnthropicAdapter;
pub use grok::GrokAdapter;
pub use openai::OpenAiAdapter;

use crate::config::GatewayConfig;
use crate::error::ProviderError;
use crate::types::{ModelKind, PromptPacket};

/// Contract between the router and one backend. An adapter translates the
/// normalized packet to its provider's wire shape and back; it reports a
/// missing credential as [`ProviderError::MissingCredential`] and never
/// swallows errors meant for the router's fallback loop.
#[async_trait::async_trait]
pub trait ProviderAdapter: Send + Sync {
    fn model(&self) -> ModelKind;
    fn is_configured(&self) -> bool;
    async fn send(&self, packet: &PromptPacket) -> Result<String, ProviderError>;
}

/// All adapters in fixed priority order, sharing one HTTP client.
pub fn build_adapters(config: &GatewayConfig, client: &Client) -> Vec<Box<dyn ProviderAdapter>> {
    vec![
        Box::new(OpenAiAdapter::new(config, client.clone())),
        Box::new(AnthropicAdapter::new(config, client.clone())),
        Box::new(GrokAdapter::new(config, client.clone())),
    ]
}

/// Shared helper: turn a non-success HTTP response into a ProviderError.
pub(crate) async fn api_error(model: ModelKind, response: reqwest::Response) -> ProviderError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    ProviderError::Api {
        model,
        status,
        body,
    }
}
