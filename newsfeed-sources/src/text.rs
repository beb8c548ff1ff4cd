//! Text cleanup helpers for feed entries

use scraper::{Html, Selector};

/// Extract plain text from a feed summary block
///
/// Google News wraps the summary in an `<ol>` of related headlines; only the
/// first `<li>` is the story itself. Everything else is stripped of tags,
/// entity-decoded and whitespace-collapsed.
pub fn clean_summary(html: &str) -> String {
    if html.trim().is_empty() {
        return String::new();
    }

    let fragment = Html::parse_fragment(html);
    let first_item = Selector::parse("li")
        .ok()
        .and_then(|sel| fragment.select(&sel).next().map(|li| li.text().collect::<String>()));

    let text = match first_item {
        Some(text) => text,
        None => fragment.root_element().text().collect::<String>(),
    };

    collapse_whitespace(&text)
}

/// Split a "Headline - Source" title on its last separator
pub fn split_title_source(raw: &str) -> (String, String) {
    match raw.rfind(" - ") {
        Some(pos) => (raw[..pos].trim().to_string(), raw[pos + 3..].trim().to_string()),
        None => (raw.trim().to_string(), String::new()),
    }
}

/// Collapse runs of whitespace into single spaces and trim
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_summary_first_list_item() {
        let html = r##"<ol><li><a href="https://x">Budget passed</a>&nbsp;&nbsp;<font color="#6f6f6f">The Hindu</font></li><li>Other story</li></ol>"##;
        assert_eq!(clean_summary(html), "Budget passed The Hindu");
    }

    #[test]
    fn test_clean_summary_plain_html() {
        assert_eq!(
            clean_summary("<p>Hello <b>world</b> &amp; friends</p>"),
            "Hello world & friends"
        );
        assert_eq!(clean_summary("  just text  "), "just text");
        assert_eq!(clean_summary(""), "");
    }

    #[test]
    fn test_split_title_source() {
        let (title, source) = split_title_source("Bitcoin surges past $100k - CoinDesk");
        assert_eq!(title, "Bitcoin surges past $100k");
        assert_eq!(source, "CoinDesk");

        let (title, source) = split_title_source("Delhi - Mumbai expressway opens - NDTV");
        assert_eq!(title, "Delhi - Mumbai expressway opens");
        assert_eq!(source, "NDTV");

        let (title, source) = split_title_source("T3");
        assert_eq!(title, "T3");
        assert_eq!(source, "");
    }
}
