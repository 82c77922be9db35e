//! Test doubles for the pipeline: a visitor that plays back a script and
//! a presenter that records what it was asked to show.

use super::producer::RecordSink;
use crate::error::FetchError;
use crate::models::{FeedSnapshot, Record};
use crate::presenter::Presenter;
use crate::scrapers::Visitor;
use chrono::{DateTime, Local};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::time::Instant;

/// Deterministic story number `i`.
pub fn record(i: usize) -> Record {
    Record {
        source_url: format!("https://example.com/story-{i}.html"),
        image_url: format!("https://example.com/story-{i}.jpg"),
        title: format!("Story {i}"),
        published_label: "Mar 05, 2024".to_string(),
        author: "The Hacker News".to_string(),
        summary: format!("Summary of story {i}"),
    }
}

#[derive(Debug, Clone)]
pub enum Step {
    Item(Record),
    Delay(Duration),
    /// Fail the walk with this HTTP status.
    Fail(u16),
}

/// Plays back the same script on every visit.
#[derive(Debug, Default)]
pub struct ScriptedVisitor {
    steps: Vec<Step>,
    emitted: AtomicUsize,
    starts: Mutex<Vec<Instant>>,
}

impl ScriptedVisitor {
    pub fn new(steps: Vec<Step>) -> Self {
        Self {
            steps,
            ..Self::default()
        }
    }

    pub fn items(n: usize) -> Self {
        Self::new((0..n).map(|i| Step::Item(record(i))).collect())
    }

    pub fn items_then_fail(n: usize, status: u16) -> Self {
        let mut steps: Vec<Step> = (0..n).map(|i| Step::Item(record(i))).collect();
        steps.push(Step::Fail(status));
        Self::new(steps)
    }

    /// Stories accepted by the sink across all visits.
    pub fn emitted(&self) -> usize {
        self.emitted.load(Ordering::SeqCst)
    }

    /// When each visit started.
    pub fn starts(&self) -> Vec<Instant> {
        self.starts.lock().unwrap().clone()
    }
}

impl Visitor for ScriptedVisitor {
    async fn visit(&self, url: &str, sink: &RecordSink) -> Result<(), FetchError> {
        self.starts.lock().unwrap().push(Instant::now());

        for step in &self.steps {
            match step {
                Step::Item(record) => {
                    sink.emit(record.clone()).await?;
                    self.emitted.fetch_add(1, Ordering::SeqCst);
                }
                Step::Delay(d) => tokio::time::sleep(*d).await,
                Step::Fail(status) => {
                    return Err(FetchError::Status {
                        url: url.to_string(),
                        status: *status,
                    });
                }
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub enum Call {
    Success {
        records: Vec<Record>,
        at: Instant,
    },
    Error {
        next_retry: Option<DateTime<Local>>,
        cause: String,
        at: Instant,
    },
}

impl Call {
    pub fn at(&self) -> Instant {
        match self {
            Call::Success { at, .. } | Call::Error { at, .. } => *at,
        }
    }
}

/// Remembers every hook invocation in order.
#[derive(Debug, Default)]
pub struct RecordingPresenter {
    calls: Mutex<Vec<Call>>,
}

impl RecordingPresenter {
    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }
}

impl Presenter for RecordingPresenter {
    async fn render_success(&self, snapshot: &FeedSnapshot) {
        self.calls.lock().unwrap().push(Call::Success {
            records: snapshot.records.clone(),
            at: Instant::now(),
        });
    }

    async fn render_error(&self, next_retry: Option<DateTime<Local>>, cause: &str) {
        self.calls.lock().unwrap().push(Call::Error {
            next_retry,
            cause: cause.to_string(),
            at: Instant::now(),
        });
    }
}
