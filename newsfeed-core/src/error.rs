//! Error types for the newsfeed workspace

use thiserror::Error;

/// Workspace-wide error type
#[derive(Error, Debug)]
pub enum NewsfeedError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl NewsfeedError {
    pub fn network(msg: impl Into<String>) -> Self {
        NewsfeedError::Network(msg.into())
    }

    pub fn parse(msg: impl Into<String>) -> Self {
        NewsfeedError::Parse(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        NewsfeedError::Config(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        NewsfeedError::Internal(msg.into())
    }
}

/// Result type alias for newsfeed operations
pub type NewsfeedResult<T> = Result<T, NewsfeedError>;
