//! Newsfeed brief
//!
//! Builds one round of stories and prints them as markdown. Logs go to
//! stderr so the output can be redirected or piped as-is.

mod cli;

use clap::Parser;
use newsfeed_core::{clamp_limit, SortKey, Story};
use newsfeed_services::{BuilderConfig, StoryBuilder};
use newsfeed_sources::{HttpConfig, TrendCredentials};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::cli::Cli;

/// Render stories as a markdown brief
pub fn render_brief(stories: &[Story]) -> String {
    let mut out = String::new();
    for story in stories {
        out.push_str(&format!("# {}\n\n{}\n\nReferences:\n", story.title, story.summary));
        for reference in &story.references {
            out.push_str(&format!("- {} - {}\n", reference.title, reference.link));
        }
        out.push_str("\n\n");
    }
    out
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Err(e) = dotenvy::from_filename(".env.local") {
        if !matches!(e, dotenvy::Error::Io(_)) {
            eprintln!("Warning: Failed to load .env.local: {}", e);
        }
    }

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let cli = Cli::parse();

    let mut config = BuilderConfig::from_env()?;
    if cli.no_trends {
        config.include_trends = false;
    }
    if cli.curious {
        config.include_curious = true;
    }

    let builder =
        StoryBuilder::from_config(&HttpConfig::default(), config, TrendCredentials::from_env());
    let sort = SortKey::parse(&cli.sort);
    let stories = builder.build(clamp_limit(cli.limit), sort).await;
    info!("Rendering brief with {} stories", stories.len());

    print!("{}", render_brief(&stories));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use newsfeed_core::{Reference, Score};

    fn story(title: &str) -> Story {
        Story {
            id: "0011223344556677".to_string(),
            title: title.to_string(),
            summary: "Parliament convenes for the session.".to_string(),
            link: "https://news.example/budget".to_string(),
            source: "Example".to_string(),
            category: "Politics".to_string(),
            published: Utc::now(),
            relevance: Score::new(0.5, "Generic relevance"),
            bias: Score::new(0.5, "Bias detection not yet implemented"),
            trending: Score::new(0.9, "Newer articles trend higher"),
            references: Reference::pad_to_four(
                vec![Reference::new("Budget explained", "https://news.example/explainer")],
                title,
            ),
            perspectives: Vec::new(),
            stats: Vec::new(),
        }
    }

    #[test]
    fn test_render_brief() {
        let brief = render_brief(&[story("Budget session")]);
        assert!(brief.starts_with(
            "# Budget session\n\nParliament convenes for the session.\n\nReferences:\n"
        ));
        assert!(brief.contains("- Budget explained - https://news.example/explainer\n"));
        assert_eq!(brief.matches("- Budget session - \n").count(), 3);
    }

    #[test]
    fn test_render_empty() {
        assert_eq!(render_brief(&[]), "");
    }
}
