//! Data models for scraped stories and the feed handed to presentation.
//!
//! - [`Record`]: one story as extracted from the front page
//! - [`FeedSnapshot`]: the finished collection of a successful cycle plus
//!   the timing information the feed view displays

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// A single news story discovered on the front page.
///
/// Records are moved into the hand-off channel by value and never mutated
/// afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Record {
    /// Link to the full article.
    pub source_url: String,
    /// Link to the preview image. May be empty.
    pub image_url: String,
    /// Headline text. May be empty if the page layout is unexpected.
    pub title: String,
    /// Publication label for display only; not guaranteed to parse as a date.
    pub published_label: String,
    /// Author or byline label. May be empty.
    pub author: String,
    /// Short description of the story.
    pub summary: String,
}

impl Record {
    /// Byline shown under the title, e.g. `"The Hacker News - Mar 05, 2024"`.
    ///
    /// Empty parts are left out rather than rendered as a dangling dash.
    pub fn byline(&self) -> String {
        use itertools::Itertools;

        [self.author.as_str(), self.published_label.as_str()]
            .into_iter()
            .filter(|part| !part.is_empty())
            .join(" - ")
    }
}

/// The collection produced by one successful cycle.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FeedSnapshot {
    /// Stories in the order they were discovered.
    pub records: Vec<Record>,
    /// When the cycle finished.
    pub fetched_at: DateTime<Local>,
    /// When the scheduler will start the next cycle. `None` after the last
    /// cycle of a bounded run.
    pub next_update: Option<DateTime<Local>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> Record {
        Record {
            source_url: "https://thehackernews.com/2024/03/story.html".to_string(),
            image_url: String::new(),
            title: "Story".to_string(),
            published_label: "Mar 05, 2024".to_string(),
            author: "The Hacker News".to_string(),
            summary: "Summary".to_string(),
        }
    }

    #[test]
    fn test_byline_joins_author_and_date() {
        assert_eq!(record().byline(), "The Hacker News - Mar 05, 2024");
    }

    #[test]
    fn test_byline_skips_empty_parts() {
        let mut r = record();
        r.author.clear();
        assert_eq!(r.byline(), "Mar 05, 2024");
        r.published_label.clear();
        assert_eq!(r.byline(), "");
    }

    #[test]
    fn test_snapshot_serialization() {
        let now = Local::now();
        let snapshot = FeedSnapshot {
            records: vec![record()],
            fetched_at: now,
            next_update: Some(now + chrono::Duration::minutes(30)),
        };

        let json = serde_json::to_string(&snapshot).unwrap();
        assert!(json.contains("\"source_url\""));
        assert!(json.contains("Mar 05, 2024"));

        let back: FeedSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back.records, snapshot.records);
    }
}
