use clap::Parser;

/// Print a markdown brief of the top stories
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Number of stories
    #[arg(short, long, default_value_t = 10)]
    pub limit: i64,

    /// latest, oldest, trending or top
    #[arg(short, long, default_value = "latest")]
    pub sort: String,

    /// Skip the social trends source
    #[arg(long)]
    pub no_trends: bool,

    /// Also crawl the niche science and history feeds
    #[arg(long)]
    pub curious: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["newsfeed-brief"]);
        assert_eq!(cli.limit, 10);
        assert_eq!(cli.sort, "latest");
        assert!(!cli.no_trends);
    }

    #[test]
    fn test_flags() {
        let cli = Cli::parse_from(["newsfeed-brief", "--limit", "3", "--sort", "top", "--no-trends"]);
        assert_eq!(cli.limit, 3);
        assert_eq!(cli.sort, "top");
        assert!(cli.no_trends);
    }
}
