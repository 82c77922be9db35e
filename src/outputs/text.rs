//! Plain-text feed and error views.

use crate::models::{FeedSnapshot, Record};
use crate::utils::kitchen_time;
use chrono::{DateTime, Local};
use std::fmt::Write;

pub const FEED_TITLE: &str = "Latest news from The Hacker News";
pub const ERROR_TITLE: &str = "Unfortunately something went wrong with fetching latest news.";

/// Render the full feed: a header with the next update time, if any,
/// followed by one card per story.
pub fn render_feed(snapshot: &FeedSnapshot) -> String {
    let mut out = String::new();
    writeln!(out, "{FEED_TITLE}").unwrap();
    if let Some(next_update) = &snapshot.next_update {
        writeln!(out, "Next update: {}", kitchen_time(next_update)).unwrap();
    }

    if snapshot.records.is_empty() {
        writeln!(out, "\nNo stories right now.").unwrap();
    }
    for record in &snapshot.records {
        out.push('\n');
        write_card(&mut out, record);
    }
    out
}

fn write_card(out: &mut String, record: &Record) {
    writeln!(out, "## {}", record.title).unwrap();
    let byline = record.byline();
    if !byline.is_empty() {
        writeln!(out, "{byline}").unwrap();
    }
    if !record.summary.is_empty() {
        writeln!(out, "{}", record.summary).unwrap();
    }
    writeln!(out, "Read the article: {}", record.source_url).unwrap();
}

/// Render the error view shown until the next attempt.
///
/// Without a next attempt the retry line is left out.
pub fn render_error_view(next_retry: Option<&DateTime<Local>>, cause: &str) -> String {
    let mut out = String::new();
    writeln!(out, "{ERROR_TITLE}").unwrap();
    if let Some(next_retry) = next_retry {
        writeln!(out, "Trying again: {}", kitchen_time(next_retry)).unwrap();
    }
    writeln!(out, "Reason: {cause}").unwrap();
    out
}
