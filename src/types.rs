// Type definitions shared across the gateway core

use std::fmt;

use serde::{Deserialize, Serialize};

/// The three supported model backends. One canonical form each; user-facing
/// aliases are resolved once at the request boundary via [`ModelKind::from_name`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModelKind {
    #[serde(rename = "gpt-4o")]
    Gpt4o,
    #[serde(rename = "claude")]
    Claude,
    #[serde(rename = "grok")]
    Grok,
}

impl ModelKind {
    /// Fixed fallback priority order. Not randomized or load-balanced so that
    /// provider selection is reproducible for a given configuration.
    pub const PRIORITY: [ModelKind; 3] = [ModelKind::Gpt4o, ModelKind::Claude, ModelKind::Grok];

    /// Resolve a user-supplied model name, accepting known aliases.
    /// Unknown names yield `None` and the router falls back to its default.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "gpt-4o" | "gpt4o" => Some(ModelKind::Gpt4o),
            "claude" => Some(ModelKind::Claude),
            "grok" => Some(ModelKind::Grok),
            _ => None,
        }
    }

    /// Capability tags, informational only. Surfaced through
    /// [`crate::router::AiRouter::model_status`].
    pub fn best_for(self) -> &'static [&'static str] {
        match self {
            ModelKind::Gpt4o => &["complex reasoning", "creative tasks", "analysis"],
            ModelKind::Claude => &["detailed explanations", "code analysis", "research"],
            ModelKind::Grok => &["real-time info", "current events", "news"],
        }
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ModelKind::Gpt4o => "gpt-4o",
            ModelKind::Claude => "claude",
            ModelKind::Grok => "grok",
        };
        f.write_str(name)
    }
}

/// Normalized request handed to every provider adapter. Built once per chat
/// call and reused verbatim across fallback attempts, so every candidate sees
/// an identical prompt.
#[derive(Debug, Clone)]
pub struct PromptPacket {
    pub system: String,
    pub user_message: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

/// Successful chat result: the reply text and which backend produced it.
#[derive(Debug, Clone, Serialize)]
pub struct ChatReply {
    pub text: String,
    pub model: ModelKind,
}

/// Per-model availability summary, for status endpoints and CLI display.
#[derive(Debug, Clone, Serialize)]
pub struct ModelStatus {
    pub model: ModelKind,
    pub configured: bool,
    pub best_for: &'static [&'static str],
}

/// Bounded structural summary of a fetched page. Sequences are in document
/// order, never exceed their caps, and are not deduplicated. Field order
/// matters: it is the serialization order used for chat context blocks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScrapedPage {
    pub title: String,
    pub description: String,
    pub headings: Vec<String>,
    pub paragraphs: Vec<String>,
    pub links: Vec<PageLink>,
    pub images: Vec<PageImage>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageLink {
    pub text: String,
    pub href: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageImage {
    pub src: String,
    pub alt: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_aliases() {
        assert_eq!(ModelKind::from_name("gpt-4o"), Some(ModelKind::Gpt4o));
        assert_eq!(ModelKind::from_name("gpt4o"), Some(ModelKind::Gpt4o));
        assert_eq!(ModelKind::from_name("GPT-4O"), Some(ModelKind::Gpt4o));
        assert_eq!(ModelKind::from_name(" claude "), Some(ModelKind::Claude));
        assert_eq!(ModelKind::from_name("grok"), Some(ModelKind::Grok));
        assert_eq!(ModelKind::from_name("gemini"), None);
        assert_eq!(ModelKind::from_name(""), None);
    }

    #[test]
    fn test_canonical_names() {
        assert_eq!(ModelKind::Gpt4o.to_string(), "gpt-4o");
        assert_eq!(ModelKind::Claude.to_string(), "claude");
        assert_eq!(ModelKind::Grok.to_string(), "grok");
        // Display matches the serde wire form
        assert_eq!(
            serde_json::to_string(&ModelKind::Gpt4o).unwrap(),
            "\"gpt-4o\""
        );
    }

    #[test]
    fn test_scraped_page_field_order() {
        let page = ScrapedPage {
            title: "T".to_string(),
            ..Default::default()
        };
        let json = serde_json::to_string(&page).unwrap();
        let title_pos = json.find("\"title\"").unwrap();
        let links_pos = json.find("\"links\"").unwrap();
        assert!(title_pos < links_pos);
    }
}
