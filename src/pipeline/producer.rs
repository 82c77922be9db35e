//! Producer side of the hand-off channel.

use super::Event;
use crate::error::FetchError;
use crate::models::Record;
use crate::scrapers::Visitor;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::mpsc;
use tracing::{debug, info, instrument, warn};

/// Sending half handed to a [`Visitor`].
///
/// `emit` waits while the channel is full, which keeps the producer from
/// running ahead of the aggregator.
#[derive(Debug)]
pub struct RecordSink {
    tx: mpsc::Sender<Event>,
    emitted: AtomicUsize,
}

impl RecordSink {
    pub fn new(tx: mpsc::Sender<Event>) -> Self {
        Self {
            tx,
            emitted: AtomicUsize::new(0),
        }
    }

    /// Send one story downstream.
    pub async fn emit(&self, record: Record) -> Result<(), FetchError> {
        self.tx
            .send(Event::Item(record))
            .await
            .map_err(|_| FetchError::SinkClosed)?;
        self.emitted.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    /// Number of stories accepted by the channel so far.
    pub fn emitted(&self) -> usize {
        self.emitted.load(Ordering::Relaxed)
    }

    /// Send the terminal event and close the channel.
    async fn finish(self, terminal: Event) {
        if self.tx.send(terminal).await.is_err() {
            debug!("Aggregator gone before terminal event");
        }
    }
}

/// Run `visitor` against `url`, forwarding every story into `tx`.
///
/// Always ends with exactly one `Done` or `Failed` event followed by
/// closing the channel.
#[instrument(level = "info", skip_all, fields(%url))]
pub async fn produce<V: Visitor>(visitor: &V, url: &str, tx: mpsc::Sender<Event>) {
    let sink = RecordSink::new(tx);
    let result = visitor.visit(url, &sink).await;
    let emitted = sink.emitted();

    let terminal = match result {
        Ok(()) => {
            info!(emitted, "Finished with news scraping");
            Event::Done { emitted }
        }
        Err(e) => {
            warn!(emitted, error = %e, "Something went wrong");
            Event::Failed(e)
        }
    };
    sink.finish(terminal).await;
}
