//! Dashboard and story feed endpoints

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use newsfeed_core::{Perspective, Reference, SortKey, Story, StoryQuery, DEFAULT_LIMIT};

use crate::AppState;

const DASHBOARD_HTML: &str = include_str!("../../templates/index.html");

/// Query parameters for the story feed
#[derive(Debug, Deserialize)]
pub struct StoriesParams {
    /// Stories per page, clamped to [1, 100]
    pub limit: Option<i64>,
    /// Stories to skip
    pub offset: Option<i64>,
    /// latest, oldest, trending or top
    pub sort: Option<String>,
}

impl StoriesParams {
    fn to_query(&self) -> StoryQuery {
        StoryQuery::new(
            self.limit.unwrap_or(DEFAULT_LIMIT as i64),
            self.offset.unwrap_or(0),
            self.sort.as_deref().map(SortKey::parse).unwrap_or_default(),
        )
    }
}

/// One story as rendered by the dashboard
#[derive(Debug, Serialize)]
pub struct StoryResponse {
    pub id: String,
    pub title: String,
    pub summary: String,
    pub link: String,
    pub source: String,
    pub category: String,
    /// RFC 3339 timestamp
    pub published: String,
    pub relevance: f64,
    pub relevance_expl: String,
    pub bias: f64,
    pub bias_expl: String,
    pub trending: f64,
    pub trending_expl: String,
    pub references: Vec<Reference>,
    pub perspectives: Vec<Perspective>,
    pub stats: Vec<String>,
}

impl From<Story> for StoryResponse {
    fn from(story: Story) -> Self {
        Self {
            id: story.id,
            title: story.title,
            summary: story.summary,
            link: story.link,
            source: story.source,
            category: story.category,
            published: story.published.to_rfc3339(),
            relevance: story.relevance.value,
            relevance_expl: story.relevance.explanation,
            bias: story.bias.value,
            bias_expl: story.bias.explanation,
            trending: story.trending.value,
            trending_expl: story.trending.explanation,
            references: story.references,
            perspectives: story.perspectives,
            stats: story.stats,
        }
    }
}

/// Create story routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(dashboard))
        .route("/stories", get(get_stories))
}

/// GET / - Dashboard shell; stories are loaded client-side
async fn dashboard() -> Html<&'static str> {
    Html(DASHBOARD_HTML)
}

/// GET /stories - One page of ranked stories
async fn get_stories(
    State(state): State<AppState>,
    Query(params): Query<StoriesParams>,
) -> impl IntoResponse {
    let query = params.to_query();
    info!(
        "Building stories (limit: {}, offset: {}, sort: {})",
        query.limit, query.offset, query.sort
    );

    let stories: Vec<StoryResponse> = state
        .builder
        .page(&query)
        .await
        .into_iter()
        .map(StoryResponse::from)
        .collect();

    (StatusCode::OK, Json(stories)).into_response()
}
