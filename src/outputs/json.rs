//! JSON output of the latest feed.
//!
//! Only the most recent successful cycle is kept. The file is written next
//! to its final name first and then renamed over it, so readers never see
//! a half-written feed.

use crate::models::FeedSnapshot;
use std::io;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{info, instrument};

/// Name of the file inside the output directory.
pub const LATEST_FILE: &str = "latest.json";

/// Write `snapshot` to `{json_output_dir}/latest.json`.
///
/// # Returns
///
/// The path of the written file.
#[instrument(level = "info", skip_all, fields(json_output_dir = %json_output_dir))]
pub async fn write_snapshot(snapshot: &FeedSnapshot, json_output_dir: &str) -> io::Result<PathBuf> {
    let json = serde_json::to_string_pretty(snapshot).map_err(io::Error::other)?;

    fs::create_dir_all(json_output_dir).await?;
    let final_path = Path::new(json_output_dir).join(LATEST_FILE);
    let tmp_path = final_path.with_extension("json.tmp");

    info!(path = %final_path.display(), bytes = json.len(), "Writing JSON");
    fs::write(&tmp_path, json).await?;
    fs::rename(&tmp_path, &final_path).await?;

    Ok(final_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Record;
    use chrono::Local;

    fn snapshot(titles: &[&str]) -> FeedSnapshot {
        let now = Local::now();
        FeedSnapshot {
            records: titles
                .iter()
                .map(|t| Record {
                    title: t.to_string(),
                    source_url: format!("https://thehackernews.com/{t}.html"),
                    ..Record::default()
                })
                .collect(),
            fetched_at: now,
            next_update: Some(now + chrono::Duration::minutes(30)),
        }
    }

    fn temp_dir(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("hn_feed_json_{}_{}", name, std::process::id()))
    }

    #[tokio::test]
    async fn test_write_snapshot_replaces_previous_file() {
        let dir = temp_dir("replace");
        let dir_str = dir.to_str().unwrap();

        write_snapshot(&snapshot(&["first", "second"]), dir_str).await.unwrap();
        let path = write_snapshot(&snapshot(&["third"]), dir_str).await.unwrap();

        assert_eq!(path, dir.join(LATEST_FILE));
        let written: FeedSnapshot =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written.records.len(), 1);
        assert_eq!(written.records[0].title, "third");
        assert!(!dir.join("latest.json.tmp").exists());

        let _ = std::fs::remove_dir_all(&dir);
    }
}
