//! Aggregator side of the hand-off channel.

use super::{CycleFailure, Event};
use crate::error::FetchError;
use crate::models::Record;
use tokio::sync::mpsc;
use tracing::{debug, instrument, warn};

/// Everything the aggregator saw during one cycle.
#[derive(Debug)]
pub struct Aggregate {
    /// Stories in arrival order.
    pub records: Vec<Record>,
    /// `Ok(emitted)` for `Done`, `Err` for `Failed`, `None` if the channel
    /// closed without either.
    pub terminal: Option<Result<usize, FetchError>>,
}

impl Aggregate {
    /// Collapse into the collection or the failure that ended the cycle.
    ///
    /// On failure the partial collection is dropped; only its size is kept.
    pub fn into_result(self) -> Result<Vec<Record>, CycleFailure> {
        let discarded = Some(self.records.len());
        match self.terminal {
            Some(Ok(emitted)) => {
                if emitted != self.records.len() {
                    warn!(emitted, received = self.records.len(), "Producer and aggregator counts differ");
                }
                Ok(self.records)
            }
            Some(Err(cause)) => Err(CycleFailure { cause, discarded }),
            None => Err(CycleFailure {
                cause: FetchError::ProducerVanished,
                discarded,
            }),
        }
    }
}

/// Receive until the channel is closed, appending every story.
///
/// There is no timeout here; only the closing of the channel ends the loop.
#[instrument(level = "info", skip_all)]
pub async fn aggregate(mut rx: mpsc::Receiver<Event>) -> Aggregate {
    let mut records = Vec::new();
    let mut terminal = None;

    while let Some(event) = rx.recv().await {
        match event {
            Event::Item(record) if terminal.is_none() => {
                debug!(index = records.len(), title = %record.title, "Received story");
                records.push(record);
            }
            Event::Item(record) => {
                warn!(title = %record.title, "Story after terminal event ignored");
            }
            Event::Done { emitted } if terminal.is_none() => terminal = Some(Ok(emitted)),
            Event::Failed(e) if terminal.is_none() => terminal = Some(Err(e)),
            Event::Done { .. } | Event::Failed(_) => {
                warn!("Duplicate terminal event ignored");
            }
        }
    }

    debug!(count = records.len(), "Hand-off channel closed");
    Aggregate { records, terminal }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::testing::record;

    #[tokio::test]
    async fn test_collects_in_order_until_closed() {
        let (tx, rx) = mpsc::channel(2);
        let sender = tokio::spawn(async move {
            for i in 0..5 {
                tx.send(Event::Item(record(i))).await.unwrap();
            }
            tx.send(Event::Done { emitted: 5 }).await.unwrap();
        });

        let aggregate = aggregate(rx).await;
        sender.await.unwrap();

        let records = aggregate.into_result().unwrap();
        assert_eq!(records, (0..5).map(record).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn test_failure_discards_partial_collection() {
        let (tx, rx) = mpsc::channel(7);
        tx.send(Event::Item(record(0))).await.unwrap();
        tx.send(Event::Item(record(1))).await.unwrap();
        tx.send(Event::Failed(FetchError::SinkClosed)).await.unwrap();
        drop(tx);

        let failure = aggregate(rx).await.into_result().unwrap_err();
        assert_eq!(failure.discarded, Some(2));
        assert!(matches!(failure.cause, FetchError::SinkClosed));
    }

    #[tokio::test]
    async fn test_close_without_terminal_is_failure() {
        let (tx, rx) = mpsc::channel(7);
        tx.send(Event::Item(record(0))).await.unwrap();
        drop(tx);

        let failure = aggregate(rx).await.into_result().unwrap_err();
        assert!(matches!(failure.cause, FetchError::ProducerVanished));
        assert_eq!(failure.discarded, Some(1));
    }

    #[tokio::test]
    async fn test_events_after_terminal_are_ignored() {
        let (tx, rx) = mpsc::channel(7);
        tx.send(Event::Done { emitted: 0 }).await.unwrap();
        tx.send(Event::Item(record(0))).await.unwrap();
        tx.send(Event::Failed(FetchError::SinkClosed)).await.unwrap();
        drop(tx);

        let records = aggregate(rx).await.into_result().unwrap();
        assert!(records.is_empty());
    }
}
