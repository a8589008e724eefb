// MAMAR.AI gateway core: multi-provider chat routing with sequential
// fallback, and SSRF-guarded web scraping for chat context enrichment.
// The HTTP/CLI shells live outside this crate and call into AiRouter and
// WebScraper.

mod extract;
mod url_guard;

pub mod config;
pub mod error;
pub mod providers;
pub mod router;
pub mod types;
pub mod web_scraper;

pub use config::{GatewayConfig, ScrapeLimits};
pub use error::{ProviderError, RouterError, ScrapeError};
pub use router::AiRouter;
pub use types::{ChatReply, ModelKind, ModelStatus, PageImage, PageLink, PromptPacket, ScrapedPage};
pub use web_scraper::WebScraper;
