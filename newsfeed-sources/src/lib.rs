//! External sources for the newsfeed pipeline
//!
//! This crate provides:
//! - Feed parsing: RSS 2.0 and Atom documents
//! - Crawlers: Google News top stories and a set of niche science/history feeds
//! - Related links: Google News search on a headline
//! - Trends: credential-gated social trends source

pub mod crawler;
pub mod error;
pub mod feed;
pub mod http;
pub mod related;
pub mod text;
pub mod trends;

pub use crawler::{curious_feeds, Crawler, CuriousCrawler, GoogleNewsCrawler, GOOGLE_NEWS_FEED_URL};
pub use error::SourceError;
pub use feed::{parse_feed, FeedEntry};
pub use http::{FeedReader, HttpClient, HttpConfig, PageFetcher};
pub use related::{GoogleNewsSearch, RelatedLinks};
pub use text::{clean_summary, collapse_whitespace, split_title_source};
pub use trends::{TrendCredentials, TrendSource, TrendTopic, TwitterTrends};
