//! # Hacker News Feed
//!
//! Scrapes the latest stories from The Hacker News front page every 30
//! minutes and presents them as a feed.
//!
//! ## Usage
//!
//! ```sh
//! hacker_news_feed                 # run until interrupted
//! hacker_news_feed --once -j ./json
//! ```
//!
//! ## Architecture
//!
//! Each cycle is a small concurrent pipeline:
//! 1. **Producer**: a [`scrapers::Visitor`] walks the page and emits stories
//! 2. **Hand-off**: a bounded channel provides backpressure and carries the
//!    terminal `Done`/`Failed` event
//! 3. **Aggregator**: collects stories in order until the channel closes
//! 4. **Presentation**: the finished feed or the error view is rendered
//!
//! The scheduler waits the configured interval after each cycle finishes
//! and starts the next one.

use clap::Parser;
use std::error::Error;
use tracing::{debug, error, info, instrument};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod cli;
mod config;
mod error;
mod labels;
mod models;
mod outputs;
mod pipeline;
mod presenter;
mod scrapers;
mod utils;

use cli::Cli;
use config::FeedConfig;
use pipeline::coordinator::Coordinator;
use pipeline::scheduler::Scheduler;
use presenter::FeedPresenter;
use scrapers::hackernews::HackerNewsVisitor;
use utils::ensure_writable_dir;

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    info!("hacker_news_feed starting up");

    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    let mut config = match &args.config {
        Some(path) => FeedConfig::load(path)?,
        None => FeedConfig::default(),
    };
    config.apply_cli(&args);
    config.validate()?;
    info!(
        url = %config.url,
        interval_minutes = config.interval_minutes,
        channel_capacity = config.channel_capacity,
        cycle_timeout_secs = config.cycle_timeout_secs,
        "Configuration resolved"
    );

    // Early check: ensure JSON output dir is writable
    if let Some(dir) = &config.json_output_dir {
        if let Err(e) = ensure_writable_dir(dir).await {
            error!(
                path = %dir,
                error = %e,
                "JSON output directory is not writable (fix perms or choose a different path)"
            );
            return Err(e);
        }
    }

    let visitor = HackerNewsVisitor::new(config.request_timeout())?;
    let presenter = FeedPresenter::new(config.json_output_dir.clone());
    let coordinator = Coordinator::new(visitor, presenter, config.pipeline());
    let scheduler = Scheduler::new(coordinator, args.once.then_some(1));

    let mut feed = tokio::spawn(async move { scheduler.run().await });

    tokio::select! {
        finished = &mut feed => match finished {
            Ok(successes) => info!(successes, "Scheduler finished"),
            Err(e) => error!(error = %e, "Scheduler task failed"),
        },
        signal = tokio::signal::ctrl_c() => {
            if let Err(e) = signal {
                error!(error = %e, "Failed to listen for shutdown signal");
            }
            info!("Shutdown requested");
            feed.abort();
        }
    }

    info!("Exited app.");
    Ok(())
}
