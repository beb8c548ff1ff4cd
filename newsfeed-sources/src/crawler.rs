//! Feed crawlers
//!
//! A crawler turns one or more feeds into `Article` values. Feeds are read
//! through a `FeedReader`, one at a time, in order.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, instrument, warn};

use newsfeed_core::{normalize_title, Article};

use crate::error::SourceError;
use crate::feed::FeedEntry;
use crate::http::FeedReader;
use crate::text::{clean_summary, split_title_source};

/// Google News top stories feed (India edition)
pub const GOOGLE_NEWS_FEED_URL: &str = "https://news.google.com/rss?hl=en-IN&gl=IN&ceid=IN:en";

/// Niche feeds crawled by `CuriousCrawler`
pub fn curious_feeds() -> Vec<String> {
    [
        "https://www.smithsonianmag.com/rss/smartnews/",
        "https://www.history.com/.rss/full/",
        "https://www.britannica.com/explore/feeds",
        "https://www.science.org/rss/news_current.xml",
        "https://www.nature.com/subjects/news.rss",
        "https://www.encyclopedia.com/rss",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

/// A source of raw articles
#[async_trait]
pub trait Crawler: Send + Sync {
    /// Name used in logs
    fn name(&self) -> &str;

    /// Fetch up to `limit` articles
    async fn fetch(&self, limit: usize) -> Result<Vec<Article>, SourceError>;
}

/// Convert a feed entry into an article, resolving its link
async fn entry_to_article(
    reader: &dyn FeedReader,
    entry: &FeedEntry,
    fallback_source: &str,
) -> Article {
    let (title, source) = split_title_source(&entry.title);
    let link = reader.resolve_link(&entry.link).await;
    let source = if source.is_empty() {
        fallback_source.to_string()
    } else {
        source
    };

    Article {
        title,
        summary: clean_summary(&entry.summary_html),
        link,
        source,
        published: entry.published,
    }
}

/// Crawler for the Google News top stories feed
pub struct GoogleNewsCrawler {
    reader: Arc<dyn FeedReader>,
    feed_url: String,
}

impl GoogleNewsCrawler {
    pub fn new(reader: Arc<dyn FeedReader>) -> Self {
        Self::with_feed_url(reader, GOOGLE_NEWS_FEED_URL)
    }

    pub fn with_feed_url(reader: Arc<dyn FeedReader>, feed_url: &str) -> Self {
        Self {
            reader,
            feed_url: feed_url.to_string(),
        }
    }
}

#[async_trait]
impl Crawler for GoogleNewsCrawler {
    fn name(&self) -> &str {
        "Google News"
    }

    #[instrument(skip(self))]
    async fn fetch(&self, limit: usize) -> Result<Vec<Article>, SourceError> {
        let entries = self.reader.read_feed(&self.feed_url).await?;

        let mut seen_titles = HashSet::new();
        let mut articles = Vec::new();

        for entry in entries.iter().take(limit) {
            let (title, _) = split_title_source(&entry.title);
            if !seen_titles.insert(normalize_title(&title)) {
                debug!("Skipping duplicate title in feed: {}", title);
                continue;
            }
            articles.push(entry_to_article(self.reader.as_ref(), entry, "").await);
        }

        info!("Google News returned {} articles", articles.len());
        Ok(articles)
    }
}

/// Crawler for niche science and history feeds
pub struct CuriousCrawler {
    reader: Arc<dyn FeedReader>,
    feeds: Vec<String>,
}

impl CuriousCrawler {
    pub fn new(reader: Arc<dyn FeedReader>) -> Self {
        Self::with_feeds(reader, curious_feeds())
    }

    pub fn with_feeds(reader: Arc<dyn FeedReader>, feeds: Vec<String>) -> Self {
        Self { reader, feeds }
    }
}

#[async_trait]
impl Crawler for CuriousCrawler {
    fn name(&self) -> &str {
        "Curious feeds"
    }

    async fn fetch(&self, limit: usize) -> Result<Vec<Article>, SourceError> {
        let mut articles = Vec::new();

        for url in &self.feeds {
            let entries = match self.reader.read_feed(url).await {
                Ok(entries) => entries,
                Err(e) => {
                    warn!("Failed to fetch feed {}: {}", url, e);
                    continue;
                }
            };

            for entry in entries.iter().take(limit) {
                articles.push(entry_to_article(self.reader.as_ref(), entry, url).await);
                if articles.len() >= limit {
                    return Ok(articles);
                }
            }
        }

        Ok(articles)
    }
}
