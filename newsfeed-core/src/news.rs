//! News data structures for the story pipeline

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Number of references every story carries
pub const REFERENCES_PER_STORY: usize = 4;

/// Raw article produced by a crawler, before any analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    /// Headline with the trailing " - Source" removed
    pub title: String,
    /// Plain-text summary/excerpt
    pub summary: String,
    /// Article URL (redirects already resolved where possible)
    pub link: String,
    /// Publisher name, or the feed URL when the entry carries none
    pub source: String,
    /// Publication date, if the feed provided a parsable one
    pub published: Option<DateTime<Utc>>,
}

/// Numeric score in [0, 1] with a human-readable explanation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Score {
    pub value: f64,
    pub explanation: String,
}

impl Score {
    /// Create a score, clamping the value into [0, 1]
    pub fn new(value: f64, explanation: impl Into<String>) -> Self {
        let value = if value.is_finite() {
            value.clamp(0.0, 1.0)
        } else {
            0.0
        };
        Self {
            value,
            explanation: explanation.into(),
        }
    }
}

/// Related-story pointer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    pub title: String,
    pub link: String,
}

impl Reference {
    pub fn new(title: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            link: link.into(),
        }
    }

    /// Padding entry used when fewer than four related links were found
    pub fn placeholder(title: impl Into<String>) -> Self {
        Self::new(title, "")
    }

    pub fn is_placeholder(&self) -> bool {
        self.link.is_empty()
    }

    /// Pad (or cut) a reference list to exactly four entries
    pub fn pad_to_four(mut refs: Vec<Reference>, title: &str) -> Vec<Reference> {
        refs.truncate(REFERENCES_PER_STORY);
        while refs.len() < REFERENCES_PER_STORY {
            refs.push(Reference::placeholder(title));
        }
        refs
    }
}

/// A viewpoint label with template text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Perspective {
    /// "left", "center" or "right"
    pub label: String,
    pub text: String,
}

impl Perspective {
    pub fn new(label: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            text: text.into(),
        }
    }
}

/// Fully analyzed story ready for display
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Story {
    /// Unique identifier (hash of link)
    pub id: String,
    pub title: String,
    pub summary: String,
    pub link: String,
    pub source: String,
    pub category: String,
    /// Publication date, or the build time when the article had none
    pub published: DateTime<Utc>,
    pub relevance: Score,
    pub bias: Score,
    pub trending: Score,
    /// Always exactly four entries
    pub references: Vec<Reference>,
    #[serde(default)]
    pub perspectives: Vec<Perspective>,
    /// Numeric tokens pulled from the article page
    #[serde(default)]
    pub stats: Vec<String>,
}

impl Story {
    pub fn relevance_score(&self) -> f64 {
        self.relevance.value
    }

    pub fn bias_score(&self) -> f64 {
        self.bias.value
    }

    pub fn trending_score(&self) -> f64 {
        self.trending.value
    }

    /// Deduplication key for this story
    pub fn dedup_key(&self) -> String {
        normalize_title(&self.title)
    }
}

/// Normalize a title for deduplication: trimmed and lower-cased
pub fn normalize_title(title: &str) -> String {
    title.trim().to_lowercase()
}

/// Generate a short stable id from a link
pub fn story_id(link: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(link.as_bytes());
    hex::encode(&hasher.finalize()[..8])
}
