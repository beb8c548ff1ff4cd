//! API route definitions

mod health;
mod stories;

use axum::Router;
use tower_http::trace::TraceLayer;

use crate::AppState;

/// Create the full application router
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(stories::routes())
        .merge(health::routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use async_trait::async_trait;
    use chrono::{Duration, Utc};
    use newsfeed_core::{Article, Reference};
    use newsfeed_services::{BuilderConfig, StoryBuilder};
    use newsfeed_sources::{Crawler, RelatedLinks, SourceError};

    use crate::AppState;

    struct StaticCrawler(usize);

    #[async_trait]
    impl Crawler for StaticCrawler {
        fn name(&self) -> &str {
            "static"
        }

        async fn fetch(&self, limit: usize) -> Result<Vec<Article>, SourceError> {
            let now = Utc::now();
            Ok((0..self.0.min(limit))
                .map(|i| Article {
                    title: format!("Story {}", i),
                    summary: format!("Summary {}", i),
                    link: format!("https://news.example/{}", i),
                    source: "Example".to_string(),
                    published: Some(now - Duration::hours(i as i64 + 1)),
                })
                .collect())
        }
    }

    struct NoRelated;

    #[async_trait]
    impl RelatedLinks for NoRelated {
        async fn related(&self, title: &str) -> Vec<Reference> {
            Reference::pad_to_four(Vec::new(), title)
        }
    }

    /// State whose single crawler yields `count` stories
    pub fn state(count: usize) -> AppState {
        let builder = StoryBuilder::new(
            vec![Arc::new(StaticCrawler(count)) as Arc<dyn Crawler>],
            Arc::new(NoRelated),
            BuilderConfig::default(),
        );
        AppState {
            builder: Arc::new(builder),
        }
    }
}
