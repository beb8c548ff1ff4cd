//! Newsfeed API Server
//!
//! Serves the dashboard page and the ranked story feed it renders.

mod routes;

use axum::http::{header, Method};
use std::net::SocketAddr;
use std::sync::Arc;
use newsfeed_services::{BuilderConfig, StoryBuilder};
use newsfeed_sources::{HttpConfig, TrendCredentials};
use tower_http::cors::{Any, CorsLayer};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub builder: Arc<StoryBuilder>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env.local file
    if let Err(e) = dotenvy::from_filename(".env.local") {
        // Not an error if the file doesn't exist
        if !matches!(e, dotenvy::Error::Io(_)) {
            eprintln!("Warning: Failed to load .env.local: {}", e);
        }
    }

    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,newsfeed_api=debug")),
        )
        .init();

    info!("Starting Newsfeed API");

    let config = BuilderConfig::from_env()?;
    let credentials = TrendCredentials::from_env();
    if !credentials.is_configured() {
        info!("Trend credentials not set; serving feed stories only");
    }

    let builder = StoryBuilder::from_config(&HttpConfig::default(), config, credentials);
    let state = AppState {
        builder: Arc::new(builder),
    };

    // Configure CORS for the dashboard
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    let app = routes::app(state).layer(cors);

    // Start server
    let port = std::env::var("SERVER_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(5000);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
