//! Shared HTTP client
//!
//! Every network call the pipeline makes goes through `HttpClient`. The
//! `FeedReader` and `PageFetcher` traits are the seams crawlers and the
//! enricher depend on, so they can run against in-memory fakes.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, instrument, warn};

use crate::error::SourceError;
use crate::feed::{parse_feed, FeedEntry};

/// Host whose article links are redirect wrappers
const GOOGLE_NEWS_HOST: &str = "news.google.com";

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Per-request timeout (in seconds)
    pub timeout_secs: u64,
    /// User agent sent with every request
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 5,
            user_agent: "Mozilla/5.0 (compatible; Newsfeed/1.0)".to_string(),
        }
    }
}

/// Reads feeds and resolves aggregator redirect links
#[async_trait]
pub trait FeedReader: Send + Sync {
    /// Fetch and parse a feed
    async fn read_feed(&self, url: &str) -> Result<Vec<FeedEntry>, SourceError>;

    /// Follow an aggregator redirect; returns the input link on any failure
    async fn resolve_link(&self, link: &str) -> String;
}

/// Fetches article pages
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch the HTML of an article page
    async fn fetch_page(&self, url: &str) -> Result<String, SourceError>;
}

/// reqwest-backed implementation of the source traits
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Create a new HTTP client
    pub fn new(config: &HttpConfig) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(config.timeout_secs))
                .user_agent(config.user_agent.clone())
                .build()
                .unwrap_or_else(|_| Client::new()),
        }
    }

    /// Underlying reqwest client, shared with the trend source
    pub fn inner(&self) -> &Client {
        &self.client
    }

    async fn get_bytes(&self, url: &str) -> Result<Vec<u8>, SourceError> {
        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            return Err(SourceError::ApiError {
                status: response.status().as_u16(),
                message: format!("Failed to fetch {}", url),
            });
        }

        Ok(response.bytes().await?.to_vec())
    }
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new(&HttpConfig::default())
    }
}

/// Whether a link is an aggregator redirect worth resolving
pub fn needs_resolution(link: &str) -> bool {
    link.contains(GOOGLE_NEWS_HOST)
}

#[async_trait]
impl FeedReader for HttpClient {
    #[instrument(skip(self))]
    async fn read_feed(&self, url: &str) -> Result<Vec<FeedEntry>, SourceError> {
        let content = self.get_bytes(url).await?;
        let entries = parse_feed(&content)?;
        debug!("Fetched {} entries from {}", entries.len(), url);
        Ok(entries)
    }

    async fn resolve_link(&self, link: &str) -> String {
        if !needs_resolution(link) {
            return link.to_string();
        }

        match self.client.get(link).send().await {
            Ok(response) => response.url().to_string(),
            Err(e) => {
                warn!("Failed to resolve {}: {}", link, e);
                link.to_string()
            }
        }
    }
}

#[async_trait]
impl PageFetcher for HttpClient {
    #[instrument(skip(self))]
    async fn fetch_page(&self, url: &str) -> Result<String, SourceError> {
        let content = self.get_bytes(url).await?;
        Ok(String::from_utf8_lossy(&content).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_needs_resolution() {
        assert!(needs_resolution("https://news.google.com/rss/articles/CBMi?oc=5"));
        assert!(!needs_resolution("https://www.thehindu.com/news/national/article1.ece"));
        assert!(!needs_resolution(""));
    }

    #[tokio::test]
    async fn test_resolve_link_passthrough() {
        let client = HttpClient::default();
        let link = "https://example.com/story";
        assert_eq!(client.resolve_link(link).await, link);
    }

    #[tokio::test]
    async fn test_resolve_link_failure_returns_input() {
        let client = HttpClient::default();
        // Nothing listens on port 1
        let link = "http://127.0.0.1:1/news.google.com/rss/articles/x";
        assert!(needs_resolution(link));
        assert_eq!(client.resolve_link(link).await, link);
    }
}
