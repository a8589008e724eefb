// Web scraper: SSRF-guarded fetch plus bounded structural extraction, with
// best-effort URL auto-detection for chat enrichment.

use regex::Regex;
use reqwest::Client;
use tracing::{debug, warn};

use crate::config::{GatewayConfig, ScrapeLimits};
use crate::error::ScrapeError;
use crate::extract;
use crate::types::ScrapedPage;
use crate::url_guard;

pub struct WebScraper {
    client: Client,
    enabled: bool,
    limits: ScrapeLimits,
    url_pattern: Regex,
}

impl WebScraper {
    pub fn new(config: &GatewayConfig) -> Result<Self, ScrapeError> {
        let client = Client::builder()
            .timeout(config.scrape_timeout)
            .user_agent(&config.user_agent)
            .build()
            .map_err(ScrapeError::ClientBuild)?;

        Ok(WebScraper {
            client,
            enabled: config.scraping_enabled,
            limits: config.limits.clone(),
            // Static pattern, known-valid
            url_pattern: Regex::new(r"https?://\S+").unwrap(),
        })
    }

    /// Fetch a page and reduce it to its bounded structural summary. The URL
    /// is validated before any network access; the fetch itself fails on
    /// network errors, timeouts, and non-success statuses.
    pub async fn scrape(&self, url: &str) -> Result<ScrapedPage, ScrapeError> {
        if !self.enabled {
            return Err(ScrapeError::Disabled);
        }

        let validated = url_guard::validate(url)?;

        let response = self
            .client
            .get(validated)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| ScrapeError::FetchFailed {
                url: url.to_string(),
                source: e,
            })?;

        let html = response.text().await.map_err(|e| ScrapeError::FetchFailed {
            url: url.to_string(),
            source: e,
        })?;

        // Parsing is sync and completes before this function suspends again;
        // the parsed tree is never held across an await.
        let page = extract::extract_page(&html, &self.limits);
        debug!(
            %url,
            headings = page.headings.len(),
            paragraphs = page.paragraphs.len(),
            links = page.links.len(),
            images = page.images.len(),
            "extracted page summary"
        );
        Ok(page)
    }

    /// Best-effort enrichment: scrape the first URL-shaped substring of the
    /// message, if any. Failures never break the chat flow; they downgrade to
    /// "no context".
    pub async fn scrape_if_needed(&self, message: &str) -> Option<ScrapedPage> {
        let url = self.url_pattern.find(message)?.as_str();
        match self.scrape(url).await {
            Ok(page) => Some(page),
            Err(err) => {
                warn!(%url, error = %err, "auto-scrape failed; continuing without context");
                None
            }
        }
    }

    /// Flatten a page into a single operator-readable block.
    pub async fn extract_text(&self, url: &str) -> Result<String, ScrapeError> {
        let page = self.scrape(url).await?;
        Ok(flatten_page(&page))
    }
}

fn flatten_page(page: &ScrapedPage) -> String {
    let mut text = format!("Title: {}\n\n", page.title);

    if !page.description.is_empty() {
        text.push_str(&format!("Description: {}\n\n", page.description));
    }

    if !page.headings.is_empty() {
        text.push_str(&format!("Headings:\n{}\n\n", page.headings.join("\n")));
    }

    if !page.paragraphs.is_empty() {
        text.push_str(&format!("Content:\n{}", page.paragraphs.join("\n\n")));
    }

    text
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scraper(enabled: bool) -> WebScraper {
        let config = GatewayConfig {
            scraping_enabled: enabled,
            ..Default::default()
        };
        WebScraper::new(&config).unwrap()
    }

    #[tokio::test]
    async fn test_disabled_scraping_is_surfaced_first() {
        let s = scraper(false);
        let err = s.scrape("https://example.com").await.unwrap_err();
        assert!(matches!(err, ScrapeError::Disabled));
    }

    #[tokio::test]
    async fn test_private_targets_rejected_without_fetch() {
        let s = scraper(true);
        for url in [
            "http://127.0.0.1/secrets",
            "http://localhost:8080/",
            "http://192.168.1.5/",
            "http://10.0.0.1/",
            "http://172.20.3.4/",
        ] {
            let err = s.scrape(url).await.unwrap_err();
            assert!(
                matches!(err, ScrapeError::InvalidUrl { .. }),
                "expected InvalidUrl for {}",
                url
            );
        }
    }

    #[tokio::test]
    async fn test_bad_schemes_rejected() {
        let s = scraper(true);
        for url in ["ftp://example.com/file", "example.com/page"] {
            let err = s.scrape(url).await.unwrap_err();
            assert!(matches!(err, ScrapeError::InvalidUrl { .. }));
        }
    }

    #[tokio::test]
    async fn test_scrape_if_needed_without_url_is_none() {
        let s = scraper(true);
        assert!(s.scrape_if_needed("no links here").await.is_none());
    }

    #[tokio::test]
    async fn test_scrape_if_needed_swallows_failures() {
        // Scraping disabled: the underlying scrape errors, but the best-effort
        // path must yield None instead
        let s = scraper(false);
        let result = s
            .scrape_if_needed("check out https://example.com/page for info")
            .await;
        assert!(result.is_none());
    }

    #[test]
    fn test_url_detection_picks_first_match() {
        let s = scraper(true);
        let found = s
            .url_pattern
            .find("see https://a.example/one and http://b.example/two")
            .unwrap();
        assert_eq!(found.as_str(), "https://a.example/one");
    }

    #[test]
    fn test_flatten_page_section_order() {
        let page = ScrapedPage {
            title: "T".to_string(),
            description: "D".to_string(),
            headings: vec!["H1".to_string()],
            paragraphs: vec!["Paragraph text here.".to_string()],
            ..Default::default()
        };
        let text = flatten_page(&page);
        let title_pos = text.find("Title: T").unwrap();
        let desc_pos = text.find("Description: D").unwrap();
        let head_pos = text.find("Headings:\nH1").unwrap();
        let content_pos = text.find("Content:\nParagraph text here.").unwrap();
        assert!(title_pos < desc_pos);
        assert!(desc_pos < head_pos);
        assert!(head_pos < content_pos);
    }

    #[test]
    fn test_flatten_page_skips_empty_sections() {
        let page = ScrapedPage {
            title: "Only Title".to_string(),
            ..Default::default()
        };
        let text = flatten_page(&page);
        assert_eq!(text, "Title: Only Title\n\n");
        assert!(!text.contains("Description:"));
        assert!(!text.contains("Headings:"));
        assert!(!text.contains("Content:"));
    }
}
