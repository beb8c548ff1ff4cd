//! Heuristic news analysis
//!
//! Categorizes an article and produces three independent scores:
//! relevance (keyword match), bias (placeholder) and trend (recency decay).

use chrono::{DateTime, Utc};
use tracing::{debug, instrument};

use newsfeed_core::{Article, Score};

/// Fallback category when no keyword list matches
pub const DEFAULT_CATEGORY: &str = "General";

/// Keyword that marks a title as highly relevant
const RELEVANCE_KEYWORD: &str = "india";

/// Hours over which the trend score decays to zero
const TREND_WINDOW_HOURS: f64 = 24.0;

/// Keyword-list categorizer; the first matching category wins
#[derive(Debug, Clone)]
pub struct Categorizer {
    rules: Vec<(String, Vec<String>)>,
}

impl Categorizer {
    /// Rules in priority order
    pub fn new(rules: Vec<(String, Vec<String>)>) -> Self {
        Self { rules }
    }

    pub fn categorize(&self, title: &str, summary: &str) -> String {
        let text = format!("{} {}", title, summary).to_lowercase();
        self.rules
            .iter()
            .find(|(_, keywords)| keywords.iter().any(|k| text.contains(k.as_str())))
            .map(|(category, _)| category.clone())
            .unwrap_or_else(|| DEFAULT_CATEGORY.to_string())
    }
}

impl Default for Categorizer {
    fn default() -> Self {
        let rule = |category: &str, keywords: &[&str]| {
            (
                category.to_string(),
                keywords.iter().map(|k| k.to_string()).collect(),
            )
        };
        Self::new(vec![
            rule(
                "Politics",
                &["election", "minister", "parliament", "government", "policy"],
            ),
            rule(
                "Tech/Visual",
                &["tech", "science", "ai", "technology", "health", "medical"],
            ),
        ])
    }
}

/// Binary keyword relevance
pub fn relevance_score(article: &Article) -> Score {
    if article.title.to_lowercase().contains(RELEVANCE_KEYWORD) {
        Score::new(1.0, "Higher score for India-related titles")
    } else {
        Score::new(0.5, "Generic relevance")
    }
}

/// Placeholder until bias detection exists
pub fn bias_score(_article: &Article) -> Score {
    Score::new(0.5, "Bias detection not yet implemented")
}

/// Linear recency decay over 24 hours
pub fn trend_score(published: Option<DateTime<Utc>>, now: DateTime<Utc>) -> Score {
    match published {
        Some(published) => {
            let hours_old = (now - published).num_seconds() as f64 / 3600.0;
            Score::new(
                (1.0 - hours_old / TREND_WINDOW_HOURS).max(0.0),
                "Newer articles trend higher",
            )
        }
        None => Score::new(0.5, "Publish time unknown"),
    }
}

/// Result of analyzing one article
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    pub category: String,
    pub relevance: Score,
    pub bias: Score,
    pub trending: Score,
}

/// Combines categorization and scoring into a single step
#[derive(Debug, Clone, Default)]
pub struct Analyzer {
    categorizer: Categorizer,
}

impl Analyzer {
    pub fn new(categorizer: Categorizer) -> Self {
        Self { categorizer }
    }

    pub fn categorizer(&self) -> &Categorizer {
        &self.categorizer
    }

    pub fn analyze(&self, article: &Article) -> Analysis {
        self.analyze_at(article, Utc::now())
    }

    /// Analyze against an explicit reference time
    #[instrument(skip(self, article), fields(title = %article.title))]
    pub fn analyze_at(&self, article: &Article, now: DateTime<Utc>) -> Analysis {
        let analysis = Analysis {
            category: self.categorizer.categorize(&article.title, &article.summary),
            relevance: relevance_score(article),
            bias: bias_score(article),
            trending: trend_score(article.published, now),
        };
        debug!(
            category = %analysis.category,
            relevance = analysis.relevance.value,
            trending = analysis.trending.value,
            "Analyzed article"
        );
        analysis
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn article(title: &str, summary: &str) -> Article {
        Article {
            title: title.to_string(),
            summary: summary.to_string(),
            link: "https://example.com".to_string(),
            source: "Example".to_string(),
            published: None,
        }
    }

    #[test]
    fn test_categorize_first_match_wins() {
        let categorizer = Categorizer::default();
        assert_eq!(
            categorizer.categorize("Minister unveils AI policy", ""),
            "Politics"
        );
        assert_eq!(
            categorizer.categorize("New medical scanner", "hospital trial"),
            "Tech/Visual"
        );
        assert_eq!(
            categorizer.categorize("Cricket final tonight", "stadium sold out"),
            DEFAULT_CATEGORY
        );
    }

    #[test]
    fn test_categorize_uses_summary_and_ignores_case() {
        let categorizer = Categorizer::default();
        assert_eq!(
            categorizer.categorize("Results announced", "ELECTION commission says"),
            "Politics"
        );
    }

    #[test]
    fn test_relevance_score() {
        assert_eq!(relevance_score(&article("India wins series", "")).value, 1.0);
        assert_eq!(relevance_score(&article("INDIAN markets rally", "")).value, 1.0);
        let generic = relevance_score(&article("T0", "India mentioned only here"));
        assert_eq!(generic.value, 0.5);
        assert_eq!(generic.explanation, "Generic relevance");
    }

    #[test]
    fn test_bias_is_placeholder() {
        assert_eq!(bias_score(&article("Anything", "")).value, 0.5);
    }

    #[test]
    fn test_trend_score_decay() {
        let now = Utc.with_ymd_and_hms(2025, 1, 6, 12, 0, 0).unwrap();
        assert_eq!(trend_score(Some(now), now).value, 1.0);
        assert!((trend_score(Some(now - Duration::hours(6)), now).value - 0.75).abs() < 1e-9);
        assert_eq!(trend_score(Some(now - Duration::hours(30)), now).value, 0.0);
        // Future-dated entries are clamped
        assert_eq!(trend_score(Some(now + Duration::hours(3)), now).value, 1.0);
        assert_eq!(trend_score(None, now).value, 0.5);
    }

    #[test]
    fn test_analyze_at() {
        let now = Utc.with_ymd_and_hms(2025, 1, 6, 12, 0, 0).unwrap();
        let mut art = article("India passes health bill", "");
        art.published = Some(now - Duration::hours(12));

        let analysis = Analyzer::default().analyze_at(&art, now);
        assert_eq!(analysis.category, "Tech/Visual");
        assert_eq!(analysis.relevance.value, 1.0);
        assert_eq!(analysis.bias.value, 0.5);
        assert!((analysis.trending.value - 0.5).abs() < 1e-9);
    }
}
