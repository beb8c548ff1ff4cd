//! Error types for the sources crate

use thiserror::Error;

use newsfeed_core::NewsfeedError;

/// Errors that can occur while talking to external sources
#[derive(Debug, Error)]
pub enum SourceError {
    /// HTTP request failed
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Remote returned a non-success response
    #[error("API error (status {status}): {message}")]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Error message
        message: String,
    },

    /// Failed to parse a feed or response body
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Source needs credentials that are not set
    #[error("Not configured: {0}")]
    NotConfigured(String),
}

impl From<reqwest::Error> for SourceError {
    fn from(e: reqwest::Error) -> Self {
        SourceError::RequestFailed(e.to_string())
    }
}

impl From<SourceError> for NewsfeedError {
    fn from(e: SourceError) -> Self {
        match e {
            SourceError::RequestFailed(msg) => NewsfeedError::network(msg),
            SourceError::ApiError { status, message } => {
                NewsfeedError::network(format!("status {}: {}", status, message))
            }
            SourceError::ParseError(msg) => NewsfeedError::parse(msg),
            SourceError::NotConfigured(msg) => NewsfeedError::config(msg),
        }
    }
}
