//! Related-story lookup via Google News search

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use newsfeed_core::{Reference, REFERENCES_PER_STORY};

use crate::http::FeedReader;
use crate::text::split_title_source;

/// Google News RSS search endpoint
pub const GOOGLE_NEWS_SEARCH_URL: &str = "https://news.google.com/rss/search";

/// Finds related stories for a headline
#[async_trait]
pub trait RelatedLinks: Send + Sync {
    /// Exactly four references; placeholders fill any gap
    async fn related(&self, title: &str) -> Vec<Reference>;
}

/// Related links from a Google News search on the headline
pub struct GoogleNewsSearch {
    reader: Arc<dyn FeedReader>,
    base_url: String,
}

impl GoogleNewsSearch {
    pub fn new(reader: Arc<dyn FeedReader>) -> Self {
        Self {
            reader,
            base_url: GOOGLE_NEWS_SEARCH_URL.to_string(),
        }
    }

    /// Search feed URL for a headline
    pub fn search_url(&self, title: &str) -> String {
        let query: String = url::form_urlencoded::byte_serialize(title.as_bytes()).collect();
        format!("{}?q={}&hl=en-IN&gl=IN&ceid=IN:en", self.base_url, query)
    }
}

#[async_trait]
impl RelatedLinks for GoogleNewsSearch {
    async fn related(&self, title: &str) -> Vec<Reference> {
        let url = self.search_url(title);

        let entries = match self.reader.read_feed(&url).await {
            Ok(entries) => entries,
            Err(e) => {
                warn!("Related search failed for '{}': {}", title, e);
                Vec::new()
            }
        };

        let mut refs = Vec::new();
        for entry in entries.iter().take(REFERENCES_PER_STORY) {
            let (ref_title, _) = split_title_source(&entry.title);
            let link = self.reader.resolve_link(&entry.link).await;
            refs.push(Reference::new(ref_title, link));
        }

        debug!("Found {} related links for '{}'", refs.len(), title);
        Reference::pad_to_four(refs, title)
    }
}
