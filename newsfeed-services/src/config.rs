//! Story builder configuration

use std::env;

use newsfeed_core::{NewsfeedError, NewsfeedResult};

/// Configuration for StoryBuilder
#[derive(Debug, Clone, PartialEq)]
pub struct BuilderConfig {
    /// Blend social trend topics into the feed
    pub include_trends: bool,
    /// Crawl the niche science/history feeds as well
    pub include_curious: bool,
    /// Fetch article pages for summaries and stats
    pub enrich_pages: bool,
    /// Sentences kept in a page summary
    pub summary_sentences: usize,
    /// Maximum numeric stats per story
    pub max_stats: usize,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            include_trends: true,
            include_curious: false,
            enrich_pages: false,
            summary_sentences: 2,
            max_stats: 5,
        }
    }
}

impl BuilderConfig {
    /// Load configuration from environment variables
    ///
    /// Reads:
    /// - NEWSFEED_INCLUDE_TRENDS
    /// - NEWSFEED_INCLUDE_CURIOUS
    /// - NEWSFEED_ENRICH_PAGES
    pub fn from_env() -> NewsfeedResult<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build from any variable lookup; unset or empty variables keep their defaults
    pub fn from_lookup<F>(lookup: F) -> NewsfeedResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(value) = var("NEWSFEED_INCLUDE_TRENDS") {
            config.include_trends = parse_flag("NEWSFEED_INCLUDE_TRENDS", &value)?;
        }
        if let Some(value) = var("NEWSFEED_INCLUDE_CURIOUS") {
            config.include_curious = parse_flag("NEWSFEED_INCLUDE_CURIOUS", &value)?;
        }
        if let Some(value) = var("NEWSFEED_ENRICH_PAGES") {
            config.enrich_pages = parse_flag("NEWSFEED_ENRICH_PAGES", &value)?;
        }

        Ok(config)
    }
}

fn parse_flag(name: &str, value: &str) -> NewsfeedResult<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        other => Err(NewsfeedError::config(format!(
            "{} must be true/false, got '{}'",
            name, other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = BuilderConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, BuilderConfig::default());
        assert!(config.include_trends);
        assert!(!config.include_curious);
        assert!(!config.enrich_pages);
    }

    #[test]
    fn test_flags_from_lookup() {
        let config = BuilderConfig::from_lookup(lookup(&[
            ("NEWSFEED_INCLUDE_TRENDS", "no"),
            ("NEWSFEED_INCLUDE_CURIOUS", "1"),
            ("NEWSFEED_ENRICH_PAGES", " TRUE "),
        ]))
        .unwrap();
        assert!(!config.include_trends);
        assert!(config.include_curious);
        assert!(config.enrich_pages);
    }

    #[test]
    fn test_empty_flag_keeps_default() {
        let config = BuilderConfig::from_lookup(lookup(&[
            ("NEWSFEED_ENRICH_PAGES", ""),
            ("NEWSFEED_INCLUDE_TRENDS", "  "),
        ]))
        .unwrap();
        assert!(!config.enrich_pages);
        assert!(config.include_trends);
    }

    #[test]
    fn test_invalid_flag_is_config_error() {
        let err = BuilderConfig::from_lookup(lookup(&[("NEWSFEED_ENRICH_PAGES", "maybe")]))
            .unwrap_err();
        assert!(matches!(err, NewsfeedError::Config(_)));
        assert!(err.to_string().contains("NEWSFEED_ENRICH_PAGES"));
    }
}
