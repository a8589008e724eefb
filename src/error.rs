// Error taxonomy for the gateway core. Every public operation returns a
// typed error; no failure here is fatal to the process.

use thiserror::Error;

use crate::types::ModelKind;

/// Failure from a single provider adapter. The router always recovers these
/// through its fallback loop; callers only ever see one wrapped inside
/// [`RouterError::AllProvidersExhausted`].
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("{model} API key not configured")]
    MissingCredential { model: ModelKind },

    #[error("request to {model} failed")]
    Http {
        model: ModelKind,
        #[source]
        source: reqwest::Error,
    },

    #[error("{model} API error ({status}): {body}")]
    Api {
        model: ModelKind,
        status: u16,
        body: String,
    },

    #[error("{model} returned a malformed response: {detail}")]
    MalformedResponse {
        model: ModelKind,
        detail: &'static str,
    },
}

impl ProviderError {
    pub fn model(&self) -> ModelKind {
        match self {
            ProviderError::MissingCredential { model }
            | ProviderError::Http { model, .. }
            | ProviderError::Api { model, .. }
            | ProviderError::MalformedResponse { model, .. } => *model,
        }
    }
}

/// Failure of a whole `chat` call.
#[derive(Debug, Error)]
pub enum RouterError {
    /// Zero adapters hold valid credentials. Raised before any network call.
    #[error("no AI models configured")]
    NoProvidersConfigured,

    /// Every candidate failed; carries the last underlying error for diagnostics.
    #[error("all AI models failed")]
    AllProvidersExhausted {
        #[source]
        last: ProviderError,
    },

    #[error("failed to build HTTP client")]
    ClientBuild(#[source] reqwest::Error),
}

/// Failure of a `scrape` or `extract_text` call. `scrape_if_needed` downgrades
/// all of these to "no context".
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("web scraping is disabled")]
    Disabled,

    /// Failed safety validation; no network request was attempted.
    #[error("invalid URL: {reason}")]
    InvalidUrl { reason: String },

    #[error("failed to scrape {url}")]
    FetchFailed {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to build HTTP client")]
    ClientBuild(#[source] reqwest::Error),
}
