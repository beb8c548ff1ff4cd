//! RSS / Atom feed parsing
//!
//! Turns raw feed bytes into `FeedEntry` values. Both crawlers and the
//! related-link search go through here.

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::error::SourceError;

/// One entry of a parsed feed, before any cleanup
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeedEntry {
    /// Raw title (may still carry a " - Source" suffix)
    pub title: String,
    /// Entry link, empty if the feed had none
    pub link: String,
    /// Raw description/summary HTML
    pub summary_html: String,
    /// Publication date, if parsable
    pub published: Option<DateTime<Utc>>,
}

/// Parse a feed document, trying RSS 2.0 first and Atom second
pub fn parse_feed(content: &[u8]) -> Result<Vec<FeedEntry>, SourceError> {
    if let Ok(channel) = rss::Channel::read_from(content) {
        let entries = parse_rss_channel(&channel);
        debug!("Parsed RSS channel with {} entries", entries.len());
        return Ok(entries);
    }

    if let Ok(atom_feed) = atom_syndication::Feed::read_from(content) {
        let entries = parse_atom_feed(&atom_feed);
        debug!("Parsed Atom feed with {} entries", entries.len());
        return Ok(entries);
    }

    Err(SourceError::ParseError(
        "Content is neither RSS nor Atom".to_string(),
    ))
}

fn parse_rss_channel(channel: &rss::Channel) -> Vec<FeedEntry> {
    channel
        .items()
        .iter()
        .map(|item| FeedEntry {
            title: item.title().unwrap_or_default().to_string(),
            link: item.link().unwrap_or_default().to_string(),
            summary_html: item.description().unwrap_or_default().to_string(),
            published: item.pub_date().and_then(parse_date),
        })
        .collect()
}

fn parse_atom_feed(atom_feed: &atom_syndication::Feed) -> Vec<FeedEntry> {
    atom_feed
        .entries()
        .iter()
        .map(|entry| {
            let link = entry
                .links()
                .first()
                .map(|l| l.href().to_string())
                .unwrap_or_default();

            let summary_html = entry
                .summary()
                .map(|s| s.as_str().to_string())
                .filter(|s| !s.is_empty())
                .or_else(|| {
                    entry
                        .content()
                        .and_then(|c| c.value())
                        .map(|v| v.to_string())
                })
                .unwrap_or_default();

            let published = entry
                .published()
                .or_else(|| Some(entry.updated()))
                .map(|d| d.with_timezone(&Utc));

            FeedEntry {
                title: entry.title().to_string(),
                link,
                summary_html,
                published,
            }
        })
        .collect()
}

/// Parse an RSS date: RFC 2822, falling back to RFC 3339
fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc2822(raw.trim())
        .or_else(|_| DateTime::parse_from_rfc3339(raw.trim()))
        .ok()
        .map(|d| d.with_timezone(&Utc))
}
