//! Command-line interface definitions for the feed.
//!
//! Every option is optional; unset options fall back to the config file
//! (if one is given) and then to the built-in defaults.

use clap::Parser;

/// Command-line arguments for the Hacker News feed.
///
/// # Examples
///
/// ```sh
/// # Run forever with the defaults (refresh every 30 minutes)
/// hacker_news_feed
///
/// # Fetch once and keep a JSON copy of the feed
/// hacker_news_feed --once -j ./json
///
/// # Load settings from a file, override the interval
/// hacker_news_feed -c feed.yaml --interval-minutes 10
/// ```
#[derive(Parser, Debug, Default)]
#[command(author, version, about)]
pub struct Cli {
    /// Optional path to a YAML config file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Page to scrape
    #[arg(long, env = "NEWS_FEED_URL")]
    pub url: Option<String>,

    /// Minutes to wait after a cycle finishes before starting the next one
    #[arg(long, env = "NEWS_FEED_INTERVAL_MINUTES")]
    pub interval_minutes: Option<u64>,

    /// Number of stories that may be buffered between scraper and feed
    #[arg(long)]
    pub channel_capacity: Option<usize>,

    /// Give up on a cycle after this many seconds (0 waits forever)
    #[arg(long)]
    pub cycle_timeout_secs: Option<u64>,

    /// Timeout for the page request in seconds
    #[arg(long)]
    pub request_timeout_secs: Option<u64>,

    /// Output directory for the latest feed as JSON
    #[arg(short, long)]
    pub json_output_dir: Option<String>,

    /// Run a single cycle and exit
    #[arg(long)]
    pub once: bool,
}
