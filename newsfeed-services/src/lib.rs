//! Analysis and story assembly for the newsfeed
//!
//! This crate turns crawled articles into ranked stories:
//! - `Analyzer`: categorization plus relevance, bias and trend scores
//! - `Enricher`: perspectives and optional page summaries/stats
//! - `StoryBuilder`: the per-request crawl → analyze → blend → sort pipeline

pub mod analyzer;
pub mod config;
pub mod enricher;
pub mod story_builder;

pub use analyzer::{
    bias_score, relevance_score, trend_score, Analysis, Analyzer, Categorizer, DEFAULT_CATEGORY,
};
pub use config::BuilderConfig;
pub use enricher::{extract_stats, first_sentences, page_text, perspectives, Enricher, PageDetails};
pub use story_builder::{dedup_articles, dedup_stories, sort_stories, trend_story, StoryBuilder};
