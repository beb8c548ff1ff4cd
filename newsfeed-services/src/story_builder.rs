//! Story Builder
//!
//! Runs the per-request pipeline: crawl, deduplicate, analyze, enrich,
//! attach related links, blend in trend topics, sort and truncate.
//! Every external call is awaited in order; failures only shrink or thin
//! the result, they never surface as errors.

use std::cmp::Ordering;
use std::collections::HashSet;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info, instrument, warn};

use newsfeed_core::{
    normalize_title, story_id, Article, Reference, Score, SortKey, Story, StoryQuery, MAX_LIMIT,
    REFERENCES_PER_STORY,
};
use newsfeed_sources::{
    Crawler, CuriousCrawler, GoogleNewsCrawler, GoogleNewsSearch, HttpClient, HttpConfig,
    RelatedLinks, TrendCredentials, TrendSource, TrendTopic, TwitterTrends,
};

use crate::analyzer::{Analyzer, Categorizer};
use crate::config::BuilderConfig;
use crate::enricher::{perspectives, Enricher};

/// Assembles ranked stories from crawlers, related links and trends
pub struct StoryBuilder {
    crawlers: Vec<Arc<dyn Crawler>>,
    analyzer: Analyzer,
    related: Arc<dyn RelatedLinks>,
    trends: Option<Arc<dyn TrendSource>>,
    enricher: Option<Enricher>,
    config: BuilderConfig,
}

impl StoryBuilder {
    pub fn new(
        crawlers: Vec<Arc<dyn Crawler>>,
        related: Arc<dyn RelatedLinks>,
        config: BuilderConfig,
    ) -> Self {
        Self {
            crawlers,
            analyzer: Analyzer::default(),
            related,
            trends: None,
            enricher: None,
            config,
        }
    }

    /// Wire up the live sources over a single HTTP client
    pub fn from_config(
        http_config: &HttpConfig,
        config: BuilderConfig,
        credentials: TrendCredentials,
    ) -> Self {
        let http = Arc::new(HttpClient::new(http_config));

        let mut crawlers: Vec<Arc<dyn Crawler>> =
            vec![Arc::new(GoogleNewsCrawler::new(http.clone()))];
        if config.include_curious {
            crawlers.push(Arc::new(CuriousCrawler::new(http.clone())));
        }

        info!(
            "Initializing StoryBuilder (crawlers: {}, trends: {}, page enrichment: {})",
            crawlers.len(),
            config.include_trends && credentials.is_configured(),
            config.enrich_pages
        );

        let trends = TwitterTrends::new(http.inner().clone(), credentials);
        let enricher = config.enrich_pages.then(|| {
            Enricher::new(http.clone(), config.summary_sentences, config.max_stats)
        });

        let mut builder = Self::new(crawlers, Arc::new(GoogleNewsSearch::new(http)), config)
            .with_trends(Arc::new(trends));
        builder.enricher = enricher;
        builder
    }

    pub fn with_trends(mut self, trends: Arc<dyn TrendSource>) -> Self {
        self.trends = Some(trends);
        self
    }

    pub fn with_enricher(mut self, enricher: Enricher) -> Self {
        self.enricher = Some(enricher);
        self
    }

    pub fn with_analyzer(mut self, analyzer: Analyzer) -> Self {
        self.analyzer = analyzer;
        self
    }

    pub fn config(&self) -> &BuilderConfig {
        &self.config
    }

    /// Trend source, if enabled and holding credentials
    fn active_trends(&self) -> Option<&Arc<dyn TrendSource>> {
        if !self.config.include_trends {
            return None;
        }
        self.trends.as_ref().filter(|t| t.is_configured())
    }

    /// Articles requested across all crawlers for a given story limit
    pub fn crawl_budget(&self, limit: usize) -> usize {
        if self.active_trends().is_some() {
            (limit / 2).max(1)
        } else {
            limit
        }
    }

    /// Build up to `limit` stories ordered by `sort`
    #[instrument(skip(self))]
    pub async fn build(&self, limit: usize, sort: SortKey) -> Vec<Story> {
        let limit = limit.clamp(1, MAX_LIMIT);
        let budget = self.crawl_budget(limit);
        let now = Utc::now();

        // Crawlers share one budget; later ones only fill what is left
        let mut articles = Vec::new();
        for crawler in &self.crawlers {
            let remaining = budget.saturating_sub(articles.len());
            if remaining == 0 {
                break;
            }
            match crawler.fetch(remaining).await {
                Ok(fetched) => {
                    debug!("{} returned {} articles", crawler.name(), fetched.len());
                    articles.extend(fetched);
                }
                Err(e) => warn!("Crawler {} failed: {}", crawler.name(), e),
            }
        }

        let articles = dedup_articles(articles);

        let mut stories = Vec::with_capacity(articles.len());
        for article in &articles {
            stories.push(self.article_story(article, now).await);
        }

        if let Some(trends) = self.active_trends() {
            let remaining = limit.saturating_sub(stories.len());
            if remaining > 0 {
                let topics = trends.fetch_trends(remaining).await;
                debug!("Blending {} trend topics", topics.len());
                stories.extend(
                    topics
                        .iter()
                        .map(|topic| trend_story(topic, self.analyzer.categorizer(), now)),
                );
            }
        }

        let mut stories = dedup_stories(stories);
        sort_stories(&mut stories, sort);
        stories.truncate(limit);

        info!("Built {} stories (limit {}, sort {})", stories.len(), limit, sort);
        stories
    }

    /// Build enough stories to cover the page, then slice it out
    pub async fn page(&self, query: &StoryQuery) -> Vec<Story> {
        self.build(query.build_size(), query.sort)
            .await
            .into_iter()
            .skip(query.offset)
            .take(query.limit)
            .collect()
    }

    async fn article_story(&self, article: &Article, now: DateTime<Utc>) -> Story {
        let analysis = self.analyzer.analyze_at(article, now);

        let (summary, stats) = match &self.enricher {
            Some(enricher) => {
                let details = enricher.page_details(&article.link, &article.summary).await;
                (details.summary, details.stats)
            }
            None => (article.summary.clone(), Vec::new()),
        };

        let references = self.related.related(&article.title).await;

        Story {
            id: story_id(&article.link),
            title: article.title.clone(),
            summary,
            link: article.link.clone(),
            source: article.source.clone(),
            category: analysis.category,
            published: article.published.unwrap_or(now),
            relevance: analysis.relevance,
            bias: analysis.bias,
            trending: analysis.trending,
            references: Reference::pad_to_four(references, &article.title),
            perspectives: perspectives(&article.title),
            stats,
        }
    }
}

/// Turn a trend topic into a story
pub fn trend_story(topic: &TrendTopic, categorizer: &Categorizer, now: DateTime<Utc>) -> Story {
    Story {
        id: story_id(&topic.url),
        title: topic.name.clone(),
        summary: topic.name.clone(),
        link: topic.url.clone(),
        source: "Twitter".to_string(),
        category: categorizer.categorize(&topic.name, ""),
        published: now,
        relevance: Score::new(0.5, "Derived from Twitter trending"),
        bias: Score::new(0.5, "Bias scoring not available"),
        trending: Score::new(1.0, format!("Trending tab: {}", topic.tab)),
        references: vec![Reference::new(&topic.name, &topic.url); REFERENCES_PER_STORY],
        perspectives: Vec::new(),
        stats: Vec::new(),
    }
}

/// Keep the first article for each normalized title
pub fn dedup_articles(articles: Vec<Article>) -> Vec<Article> {
    let mut seen = HashSet::new();
    articles
        .into_iter()
        .filter(|a| seen.insert(normalize_title(&a.title)))
        .collect()
}

/// Keep the first story for each normalized title
pub fn dedup_stories(stories: Vec<Story>) -> Vec<Story> {
    let mut seen = HashSet::new();
    stories
        .into_iter()
        .filter(|s| seen.insert(s.dedup_key()))
        .collect()
}

/// Stable sort by the requested key
pub fn sort_stories(stories: &mut [Story], sort: SortKey) {
    let by_score = |a: f64, b: f64| b.partial_cmp(&a).unwrap_or(Ordering::Equal);
    match sort {
        SortKey::Trending => {
            stories.sort_by(|a, b| by_score(a.trending_score(), b.trending_score()))
        }
        SortKey::Top => stories.sort_by(|a, b| by_score(a.relevance_score(), b.relevance_score())),
        SortKey::Oldest => stories.sort_by(|a, b| a.published.cmp(&b.published)),
        SortKey::Latest => stories.sort_by(|a, b| b.published.cmp(&a.published)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn story(title: &str, hours_ago: i64, relevance: f64, trending: f64) -> Story {
        let now = Utc.with_ymd_and_hms(2025, 1, 6, 12, 0, 0).unwrap();
        Story {
            id: story_id(title),
            title: title.to_string(),
            summary: String::new(),
            link: format!("https://example.com/{}", title),
            source: "Example".to_string(),
            category: "General".to_string(),
            published: now - Duration::hours(hours_ago),
            relevance: Score::new(relevance, ""),
            bias: Score::new(0.5, ""),
            trending: Score::new(trending, ""),
            references: Reference::pad_to_four(Vec::new(), title),
            perspectives: Vec::new(),
            stats: Vec::new(),
        }
    }

    fn titles(stories: &[Story]) -> Vec<&str> {
        stories.iter().map(|s| s.title.as_str()).collect()
    }

    #[test]
    fn test_sort_latest_and_oldest() {
        let mut stories = vec![
            story("b", 5, 0.5, 0.5),
            story("a", 1, 0.5, 0.5),
            story("c", 9, 0.5, 0.5),
        ];
        sort_stories(&mut stories, SortKey::Latest);
        assert_eq!(titles(&stories), vec!["a", "b", "c"]);
        sort_stories(&mut stories, SortKey::Oldest);
        assert_eq!(titles(&stories), vec!["c", "b", "a"]);
    }

    #[test]
    fn test_sort_by_scores_is_stable() {
        let mut stories = vec![
            story("first", 1, 0.5, 0.2),
            story("india", 2, 1.0, 0.9),
            story("second", 3, 0.5, 0.9),
        ];
        sort_stories(&mut stories, SortKey::Top);
        assert_eq!(titles(&stories), vec!["india", "first", "second"]);

        sort_stories(&mut stories, SortKey::Trending);
        assert_eq!(titles(&stories), vec!["india", "second", "first"]);
    }

    #[test]
    fn test_dedup_stories_first_wins() {
        let stories = vec![
            story("Budget", 1, 1.0, 0.5),
            story(" budget ", 2, 0.5, 0.5),
            story("Rain", 3, 0.5, 0.5),
        ];
        let deduped = dedup_stories(stories);
        assert_eq!(titles(&deduped), vec!["Budget", "Rain"]);
        assert_eq!(deduped[0].relevance_score(), 1.0);
    }

    #[test]
    fn test_trend_story() {
        let now = Utc.with_ymd_and_hms(2025, 1, 6, 12, 0, 0).unwrap();
        let topic = TrendTopic {
            name: "Election results".to_string(),
            url: "https://twitter.com/search?q=Election".to_string(),
            tab: "news".to_string(),
        };
        let story = trend_story(&topic, &Categorizer::default(), now);

        assert_eq!(story.summary, "Election results");
        assert_eq!(story.source, "Twitter");
        assert_eq!(story.category, "Politics");
        assert_eq!(story.published, now);
        assert_eq!(story.trending.value, 1.0);
        assert_eq!(story.trending.explanation, "Trending tab: news");
        assert_eq!(story.references.len(), 4);
        assert!(story.references.iter().all(|r| r.link == topic.url));
        assert!(story.perspectives.is_empty());
    }
}
