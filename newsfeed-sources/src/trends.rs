//! Social trend source (Twitter/X trends API)
//!
//! Credential-gated: without a bearer token, or an API key/secret pair that
//! can be exchanged for one, the source reports itself unconfigured and
//! every fetch returns an empty list. Request failures are logged and
//! skipped; there is no retry.

use std::env;

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::error::SourceError;

const TOKEN_URL: &str = "https://api.twitter.com/oauth2/token";
const TRENDS_URL: &str = "https://api.twitter.com/1.1/trends/place.json?id=1";

/// Trend tabs queried, in order
pub const TREND_TABS: [&str; 3] = ["trending", "news", "entertainment"];

/// One trending topic
#[derive(Debug, Clone, PartialEq)]
pub struct TrendTopic {
    pub name: String,
    pub url: String,
    /// Tab the topic was listed under
    pub tab: String,
}

/// A source of trending topics
#[async_trait]
pub trait TrendSource: Send + Sync {
    /// Whether credentials are present
    fn is_configured(&self) -> bool;

    /// Up to `limit` topics; empty on any failure
    async fn fetch_trends(&self, limit: usize) -> Vec<TrendTopic>;
}

/// Trend API credentials
#[derive(Debug, Clone, Default)]
pub struct TrendCredentials {
    pub api_key: Option<String>,
    pub api_secret: Option<String>,
    pub bearer_token: Option<String>,
}

impl TrendCredentials {
    /// Load credentials from environment variables
    ///
    /// Reads:
    /// - TWITTER_API_KEY
    /// - TWITTER_API_SECRET
    /// - TWITTER_BEARER_TOKEN
    pub fn from_env() -> Self {
        Self {
            api_key: non_empty_var("TWITTER_API_KEY"),
            api_secret: non_empty_var("TWITTER_API_SECRET"),
            bearer_token: non_empty_var("TWITTER_BEARER_TOKEN"),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.bearer_token.is_some() || (self.api_key.is_some() && self.api_secret.is_some())
    }

    /// HTTP Basic value for the token exchange
    fn basic_auth(&self) -> Option<String> {
        let key = self.api_key.as_deref()?;
        let secret = self.api_secret.as_deref()?;
        Some(STANDARD.encode(format!("{}:{}", key, secret)))
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TrendLocation {
    #[serde(default)]
    trends: Vec<RawTrend>,
}

#[derive(Debug, Deserialize)]
struct RawTrend {
    name: Option<String>,
    url: Option<String>,
}

/// Twitter trends client
pub struct TwitterTrends {
    client: Client,
    credentials: TrendCredentials,
    token_url: String,
    trends_url: String,
}

impl TwitterTrends {
    pub fn new(client: Client, credentials: TrendCredentials) -> Self {
        Self::with_endpoints(client, credentials, TOKEN_URL, TRENDS_URL)
    }

    /// Point the client at different token and trends endpoints
    pub fn with_endpoints(
        client: Client,
        credentials: TrendCredentials,
        token_url: &str,
        trends_url: &str,
    ) -> Self {
        info!(
            "Initializing trend source (configured: {})",
            credentials.is_configured()
        );
        Self {
            client,
            credentials,
            token_url: token_url.to_string(),
            trends_url: trends_url.to_string(),
        }
    }

    /// Use the configured bearer token, or exchange key/secret for one
    async fn bearer_token(&self) -> Result<String, SourceError> {
        if let Some(token) = &self.credentials.bearer_token {
            return Ok(token.clone());
        }

        let basic = self.credentials.basic_auth().ok_or_else(|| {
            SourceError::NotConfigured("trend API credentials missing".to_string())
        })?;

        let response = self
            .client
            .post(&self.token_url)
            .header(AUTHORIZATION, format!("Basic {}", basic))
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded;charset=UTF-8")
            .body("grant_type=client_credentials")
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(SourceError::ApiError {
                status: response.status().as_u16(),
                message: "Token exchange rejected".to_string(),
            });
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| SourceError::ParseError(e.to_string()))?;

        token
            .access_token
            .ok_or_else(|| SourceError::ParseError("No access_token in response".to_string()))
    }

    async fn fetch_tab(&self, token: &str, tab: &str) -> Result<Vec<TrendTopic>, SourceError> {
        let response = self
            .client
            .get(&self.trends_url)
            .header(AUTHORIZATION, format!("Bearer {}", token))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(SourceError::ApiError {
                status: response.status().as_u16(),
                message: format!("Trends tab '{}' unavailable", tab),
            });
        }

        let body = response.text().await?;
        parse_trends(&body, tab)
    }
}

#[async_trait]
impl TrendSource for TwitterTrends {
    fn is_configured(&self) -> bool {
        self.credentials.is_configured()
    }

    async fn fetch_trends(&self, limit: usize) -> Vec<TrendTopic> {
        if limit == 0 || !self.is_configured() {
            return Vec::new();
        }

        let token = match self.bearer_token().await {
            Ok(token) => token,
            Err(e) => {
                warn!("Trend source authentication failed: {}", e);
                return Vec::new();
            }
        };

        let mut topics = Vec::new();
        for tab in TREND_TABS {
            match self.fetch_tab(&token, tab).await {
                Ok(tab_topics) => {
                    debug!("Trend tab '{}' returned {} topics", tab, tab_topics.len());
                    for topic in tab_topics {
                        topics.push(topic);
                        if topics.len() >= limit {
                            return topics;
                        }
                    }
                }
                Err(e) => warn!("Skipping trend tab '{}': {}", tab, e),
            }
        }

        topics
    }
}

/// Parse a trends/place.json body into topics
fn parse_trends(body: &str, tab: &str) -> Result<Vec<TrendTopic>, SourceError> {
    let locations: Vec<TrendLocation> =
        serde_json::from_str(body).map_err(|e| SourceError::ParseError(e.to_string()))?;

    let trends = locations
        .into_iter()
        .next()
        .map(|loc| loc.trends)
        .unwrap_or_default();

    Ok(trends
        .into_iter()
        .filter_map(|trend| {
            let name = trend.name.filter(|n| !n.trim().is_empty())?;
            let url = trend
                .url
                .filter(|u| !u.is_empty())
                .unwrap_or_else(|| search_url(&name));
            Some(TrendTopic {
                name,
                url,
                tab: tab.to_string(),
            })
        })
        .collect())
}

/// Search link used when the API gives no URL for a topic
pub fn search_url(name: &str) -> String {
    format!("https://twitter.com/search?q={}", urlencoding::encode(name))
}
