// Environment-derived configuration, read once at process start and passed
// by reference into the router and scraper. Request-handling code never
// touches the environment.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::types::ModelKind;

pub const DEFAULT_XAI_ENDPOINT: &str = "https://api.x.ai/v1";
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (compatible; MAMAR-AI/1.0)";

const DEFAULT_MAX_TOKENS: u32 = 2000;
const DEFAULT_TEMPERATURE: f32 = 0.7;
const DEFAULT_SCRAPE_TIMEOUT_MS: u64 = 30_000;

/// Extraction caps for the web scraper. Overridable in code, not env.
#[derive(Debug, Clone)]
pub struct ScrapeLimits {
    pub headings: usize,
    pub paragraphs: usize,
    pub links: usize,
    pub images: usize,
}

impl Default for ScrapeLimits {
    fn default() -> Self {
        ScrapeLimits {
            headings: 10,
            paragraphs: 10,
            links: 20,
            images: 10,
        }
    }
}

#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub openai_api_key: Option<String>,
    pub anthropic_api_key: Option<String>,
    pub xai_api_key: Option<String>,
    /// Base URL for the xAI API; the other two backends use fixed endpoints.
    pub xai_endpoint: String,
    /// Process-wide default model. `None` means "first configured".
    pub default_model: Option<ModelKind>,
    pub max_tokens: u32,
    pub temperature: f32,
    pub scraping_enabled: bool,
    pub scrape_timeout: Duration,
    pub user_agent: String,
    pub limits: ScrapeLimits,
}

impl GatewayConfig {
    pub fn from_env() -> Self {
        GatewayConfig {
            openai_api_key: non_empty(env::var("OPENAI_API_KEY").ok()),
            anthropic_api_key: non_empty(env::var("ANTHROPIC_API_KEY").ok()),
            xai_api_key: non_empty(env::var("XAI_API_KEY").ok()),
            xai_endpoint: non_empty(env::var("XAI_ENDPOINT").ok())
                .unwrap_or_else(|| DEFAULT_XAI_ENDPOINT.to_string()),
            default_model: env::var("DEFAULT_AI_MODEL")
                .ok()
                .and_then(|name| ModelKind::from_name(&name)),
            max_tokens: parse_or(env::var("MAX_TOKENS").ok(), DEFAULT_MAX_TOKENS),
            temperature: parse_or(env::var("TEMPERATURE").ok(), DEFAULT_TEMPERATURE),
            scraping_enabled: env::var("ENABLE_WEB_SCRAPING")
                .map(|v| v == "true")
                .unwrap_or(false),
            scrape_timeout: Duration::from_millis(parse_or(
                env::var("SCRAPER_TIMEOUT_MS").ok(),
                DEFAULT_SCRAPE_TIMEOUT_MS,
            )),
            user_agent: non_empty(env::var("USER_AGENT").ok())
                .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
            limits: ScrapeLimits::default(),
        }
    }
}

impl Default for GatewayConfig {
    /// No credentials, scraping off. Useful as a test baseline.
    fn default() -> Self {
        GatewayConfig {
            openai_api_key: None,
            anthropic_api_key: None,
            xai_api_key: None,
            xai_endpoint: DEFAULT_XAI_ENDPOINT.to_string(),
            default_model: None,
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
            scraping_enabled: false,
            scrape_timeout: Duration::from_millis(DEFAULT_SCRAPE_TIMEOUT_MS),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            limits: ScrapeLimits::default(),
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Malformed values fall back to the default rather than erroring, matching
/// the original deployment's behavior.
fn parse_or<T: FromStr>(raw: Option<String>, default: T) -> T {
    raw.and_then(|v| v.trim().parse().ok()).unwrap_or(default)
}
