//! Story enrichment: perspectives, page summaries and numeric stats

use std::sync::Arc;

use regex::Regex;
use scraper::{Html, Selector};
use tracing::{debug, warn};

use newsfeed_core::Perspective;
use newsfeed_sources::{collapse_whitespace, PageFetcher};

/// Template perspectives for a headline
pub fn perspectives(title: &str) -> Vec<Perspective> {
    vec![
        Perspective::new("left", format!("Left perspective on {}", title)),
        Perspective::new("center", format!("Centrist view on {}", title)),
        Perspective::new("right", format!("Right perspective on {}", title)),
    ]
}

/// Extract the paragraph text of an article page
pub fn page_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let Ok(selector) = Selector::parse("p") else {
        return String::new();
    };

    let paragraphs: Vec<String> = document
        .select(&selector)
        .map(|p| collapse_whitespace(&p.text().collect::<String>()))
        .filter(|p| !p.is_empty())
        .collect();

    paragraphs.join(" ")
}

/// First `count` sentences of a text
pub fn first_sentences(text: &str, count: usize) -> String {
    // A terminator only ends a sentence before whitespace, so "3.5" stays whole
    let Ok(sentence) = Regex::new(r"(?s).+?[.!?]+(?:\s+|$)") else {
        return String::new();
    };

    let sentences: Vec<&str> = sentence
        .find_iter(text)
        .map(|m| m.as_str().trim())
        .filter(|s| !s.is_empty())
        .take(count)
        .collect();

    if sentences.is_empty() {
        return collapse_whitespace(text);
    }
    sentences.join(" ")
}

/// Numeric tokens (counts, amounts, percentages) in document order
pub fn extract_stats(text: &str, max: usize) -> Vec<String> {
    let Ok(number) = Regex::new(r"\d[\d,]*(?:\.\d+)?%?") else {
        return Vec::new();
    };

    let mut stats: Vec<String> = Vec::new();
    for m in number.find_iter(text) {
        if stats.len() >= max {
            break;
        }
        let token = m.as_str().trim_end_matches(',').to_string();
        if !stats.contains(&token) {
            stats.push(token);
        }
    }
    stats
}

/// Summary and stats pulled from the live article page
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageDetails {
    pub summary: String,
    pub stats: Vec<String>,
}

/// Fetches article pages and derives summaries and stats from them
pub struct Enricher {
    pages: Arc<dyn PageFetcher>,
    summary_sentences: usize,
    max_stats: usize,
}

impl Enricher {
    pub fn new(pages: Arc<dyn PageFetcher>, summary_sentences: usize, max_stats: usize) -> Self {
        Self {
            pages,
            summary_sentences,
            max_stats,
        }
    }

    /// Page summary and stats; falls back to `fallback_summary` and no stats
    pub async fn page_details(&self, link: &str, fallback_summary: &str) -> PageDetails {
        let fallback = PageDetails {
            summary: fallback_summary.to_string(),
            stats: Vec::new(),
        };

        if link.is_empty() {
            return fallback;
        }

        let html = match self.pages.fetch_page(link).await {
            Ok(html) => html,
            Err(e) => {
                warn!("Failed to fetch article page {}: {}", link, e);
                return fallback;
            }
        };

        let text = page_text(&html);
        if text.is_empty() {
            debug!("No paragraph text found at {}", link);
            return fallback;
        }

        let summary = first_sentences(&text, self.summary_sentences);
        PageDetails {
            summary: if summary.is_empty() {
                fallback_summary.to_string()
            } else {
                summary
            },
            stats: extract_stats(&text, self.max_stats),
        }
    }
}
