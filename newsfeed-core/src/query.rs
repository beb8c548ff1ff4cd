//! Ranking and paging parameters

use std::fmt;

use serde::{Deserialize, Serialize};

/// Largest page a single request may ask for
pub const MAX_LIMIT: usize = 100;

/// Default page size for the story endpoint
pub const DEFAULT_LIMIT: usize = 20;

/// Story ordering
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum SortKey {
    /// Newest first
    #[default]
    Latest,
    /// Oldest first
    Oldest,
    /// Highest trend score first
    Trending,
    /// Highest relevance score first
    Top,
}

impl SortKey {
    /// Parse a sort key case-insensitively; anything unknown means `Latest`
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "oldest" => SortKey::Oldest,
            "trending" => SortKey::Trending,
            "top" => SortKey::Top,
            _ => SortKey::Latest,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Latest => "latest",
            SortKey::Oldest => "oldest",
            SortKey::Trending => "trending",
            SortKey::Top => "top",
        }
    }
}

impl From<String> for SortKey {
    fn from(value: String) -> Self {
        SortKey::parse(&value)
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A request for one page of ranked stories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StoryQuery {
    /// Page size, always within [1, MAX_LIMIT]
    pub limit: usize,
    /// Number of ranked stories to skip
    pub offset: usize,
    pub sort: SortKey,
}

impl StoryQuery {
    /// Build a query, clamping out-of-range values
    pub fn new(limit: i64, offset: i64, sort: SortKey) -> Self {
        Self {
            limit: clamp_limit(limit),
            offset: offset.max(0) as usize,
            sort,
        }
    }

    /// Number of stories that have to be built to serve this page
    pub fn build_size(&self) -> usize {
        self.limit.saturating_add(self.offset).min(MAX_LIMIT)
    }
}

impl Default for StoryQuery {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            offset: 0,
            sort: SortKey::Latest,
        }
    }
}

/// Clamp a requested limit into [1, MAX_LIMIT]
pub fn clamp_limit(limit: i64) -> usize {
    limit.clamp(1, MAX_LIMIT as i64) as usize
}
