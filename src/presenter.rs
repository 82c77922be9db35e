//! Hand-off from the pipeline to whatever displays the feed.

use crate::models::FeedSnapshot;
use crate::outputs::{json, text};
use chrono::{DateTime, Local};
use std::future::Future;
use tracing::{error, info, instrument};

/// Receives the result of every cycle.
///
/// Called from the scheduler's task, never from a UI thread; implementors
/// that render elsewhere must marshal the data themselves.
pub trait Presenter: Send + Sync + 'static {
    /// Called once per successful cycle with the finished feed.
    fn render_success(&self, snapshot: &FeedSnapshot) -> impl Future<Output = ()> + Send;

    /// Called once per failed cycle with the time of the next attempt, or
    /// `None` when no further attempt will be made.
    fn render_error(
        &self,
        next_retry: Option<DateTime<Local>>,
        cause: &str,
    ) -> impl Future<Output = ()> + Send;
}

/// Prints the feed to stdout and optionally keeps a JSON copy of the
/// latest successful feed.
#[derive(Debug, Default)]
pub struct FeedPresenter {
    json_output_dir: Option<String>,
}

impl FeedPresenter {
    pub fn new(json_output_dir: Option<String>) -> Self {
        Self { json_output_dir }
    }
}

impl Presenter for FeedPresenter {
    #[instrument(level = "info", skip_all, fields(count = snapshot.records.len()))]
    async fn render_success(&self, snapshot: &FeedSnapshot) {
        println!("{}", text::render_feed(snapshot));

        if let Some(dir) = &self.json_output_dir {
            match json::write_snapshot(snapshot, dir).await {
                Ok(path) => info!(path = %path.display(), "Wrote feed JSON"),
                Err(e) => error!(dir = %dir, error = %e, "Failed to write feed JSON"),
            }
        }
    }

    #[instrument(level = "info", skip_all)]
    async fn render_error(&self, next_retry: Option<DateTime<Local>>, cause: &str) {
        println!("{}", text::render_error_view(next_retry.as_ref(), cause));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Record;

    #[tokio::test]
    async fn test_render_success_writes_json_when_configured() {
        let dir = std::env::temp_dir().join(format!("hn_feed_presenter_{}", std::process::id()));
        let presenter = FeedPresenter::new(Some(dir.to_str().unwrap().to_string()));
        let now = Local::now();
        let snapshot = FeedSnapshot {
            records: vec![Record {
                title: "Story".to_string(),
                source_url: "https://thehackernews.com/story.html".to_string(),
                ..Record::default()
            }],
            fetched_at: now,
            next_update: Some(now + chrono::Duration::minutes(30)),
        };

        presenter.render_success(&snapshot).await;

        let written = std::fs::read_to_string(dir.join(json::LATEST_FILE)).unwrap();
        assert!(written.contains("https://thehackernews.com/story.html"));
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn test_render_without_json_dir_only_prints() {
        let presenter = FeedPresenter::default();
        presenter.render_error(Some(Local::now()), "boom").await;
        assert!(presenter.json_output_dir.is_none());
    }
}
