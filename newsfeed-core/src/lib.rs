//! Core types for the newsfeed story pipeline
//!
//! This crate defines the shared data structures used across the workspace:
//! raw crawled articles, analyzed stories with their scores and references,
//! and the query parameters used to rank and page them.

pub mod error;
pub mod news;
pub mod query;

pub use error::{NewsfeedError, NewsfeedResult};
pub use news::{
    normalize_title, story_id, Article, Perspective, Reference, Score, Story,
    REFERENCES_PER_STORY,
};
pub use query::{clamp_limit, SortKey, StoryQuery, DEFAULT_LIMIT, MAX_LIMIT};
