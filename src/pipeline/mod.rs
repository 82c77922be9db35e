//! The ingestion pipeline: one producer feeding one aggregator over a
//! bounded channel, run once per cycle by the [`coordinator`] and repeated
//! by the [`scheduler`].
//!
//! # Data flow
//!
//! ```text
//! Visitor ──emit──▶ RecordSink ══ mpsc(K) ══▶ aggregate() ──▶ RunOutcome ──▶ Presenter
//!                                                                  │
//!                                            Scheduler ◀── sleep(interval) ◀┘
//! ```
//!
//! The producer ends every cycle with exactly one terminal [`Event`]
//! (`Done` or `Failed`) and then drops its sender. The aggregator reads
//! until the channel is closed, so the terminal event is always observed
//! before the end of the stream.

use crate::error::FetchError;
use crate::models::{FeedSnapshot, Record};
use std::time::Duration;

pub mod aggregator;
pub mod coordinator;
pub mod producer;
pub mod scheduler;

#[cfg(test)]
pub mod testing;

/// Message carried on the hand-off channel.
#[derive(Debug)]
pub enum Event {
    /// One discovered story.
    Item(Record),
    /// The walk finished; `emitted` stories were sent before this event.
    Done { emitted: usize },
    /// The walk failed; no further events follow.
    Failed(FetchError),
}

/// Result of one cycle. Exactly one is produced per cycle.
#[derive(Debug)]
pub enum RunOutcome {
    Success(FeedSnapshot),
    Failure(CycleFailure),
}

impl RunOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, RunOutcome::Success(_))
    }
}

/// Why a cycle failed and how many stories were thrown away because of it.
#[derive(Debug)]
pub struct CycleFailure {
    pub cause: FetchError,
    /// Stories received before the failure. They are never presented.
    /// `None` when the cycle was cut short and the aggregator could not
    /// report its count.
    pub discarded: Option<usize>,
}

/// Settings for the pipeline, resolved from the config file and CLI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Page to scrape.
    pub url: String,
    /// Capacity of the hand-off channel.
    pub channel_capacity: usize,
    /// Pause between the end of one cycle and the start of the next.
    pub interval: Duration,
    /// Upper bound for one cycle. `None` waits forever.
    pub cycle_timeout: Option<Duration>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            url: "https://thehackernews.com".to_string(),
            channel_capacity: 7,
            interval: Duration::from_secs(30 * 60),
            cycle_timeout: Some(Duration::from_secs(120)),
        }
    }
}
