//! One fetch cycle: wire producer and aggregator together, wait for the
//! channel to drain and report the outcome.

use super::aggregator::aggregate;
use super::producer::produce;
use super::{CycleFailure, PipelineConfig, RunOutcome};
use crate::error::FetchError;
use crate::models::{FeedSnapshot, Record};
use crate::presenter::Presenter;
use crate::scrapers::Visitor;
use crate::utils::{kitchen_time, next_run_at};
use chrono::Local;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{error, info, instrument, warn};

/// Runs cycles against one visitor and reports them to one presenter.
///
/// Every cycle gets its own channel and collection; nothing carries over
/// from the previous cycle.
#[derive(Debug)]
pub struct Coordinator<V, P> {
    visitor: Arc<V>,
    presenter: P,
    config: PipelineConfig,
}

impl<V: Visitor, P: Presenter> Coordinator<V, P> {
    pub fn new(visitor: V, presenter: P, config: PipelineConfig) -> Self {
        Self {
            visitor: Arc::new(visitor),
            presenter,
            config,
        }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    #[cfg(test)]
    pub fn visitor(&self) -> &V {
        &self.visitor
    }

    #[cfg(test)]
    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    /// Run one cycle and invoke exactly one presenter hook.
    pub async fn run_cycle(&self) -> RunOutcome {
        self.run(true).await
    }

    /// Like [`run_cycle`](Self::run_cycle), but no further cycle follows, so
    /// the presenter gets no next update or retry time.
    pub async fn run_final_cycle(&self) -> RunOutcome {
        self.run(false).await
    }

    #[instrument(level = "info", skip_all, fields(url = %self.config.url))]
    async fn run(&self, repeats: bool) -> RunOutcome {
        info!("Fetching latest stories");
        let collected = self.collect().await;
        let next_run = repeats.then(|| next_run_at(self.config.interval));
        let next_time = next_run.as_ref().map(kitchen_time);

        match collected {
            Ok(records) => {
                info!(count = records.len(), next_update = ?next_time, "Done fetching new stories");
                let snapshot = FeedSnapshot {
                    records,
                    fetched_at: Local::now(),
                    next_update: next_run,
                };
                self.presenter.render_success(&snapshot).await;
                RunOutcome::Success(snapshot)
            }
            Err(failure) => {
                warn!(
                    error = %failure.cause,
                    discarded = ?failure.discarded,
                    next_retry = ?next_time,
                    "Couldn't fetch the latest news"
                );
                self.presenter
                    .render_error(next_run, &failure.cause.to_string())
                    .await;
                RunOutcome::Failure(failure)
            }
        }
    }

    /// Spawn producer and aggregator and wait until the channel is drained.
    async fn collect(&self) -> Result<Vec<Record>, CycleFailure> {
        let (tx, rx) = mpsc::channel(self.config.channel_capacity);

        let producer = {
            let visitor = Arc::clone(&self.visitor);
            let url = self.config.url.clone();
            tokio::spawn(async move { produce(visitor.as_ref(), &url, tx).await })
        };
        let aggregator = tokio::spawn(aggregate(rx));

        let producer_abort = producer.abort_handle();
        let aggregator_abort = aggregator.abort_handle();

        let joined = async move {
            let (aggregated, produced) = tokio::join!(aggregator, producer);
            if let Err(e) = produced {
                error!(error = %e, "Producer task failed");
            }
            match aggregated {
                Ok(aggregate) => aggregate.into_result(),
                Err(e) => Err(CycleFailure {
                    cause: FetchError::TaskFailed(e.to_string()),
                    discarded: None,
                }),
            }
        };

        let Some(limit) = self.config.cycle_timeout else {
            return joined.await;
        };
        match tokio::time::timeout(limit, joined).await {
            Ok(result) => result,
            Err(_) => {
                producer_abort.abort();
                aggregator_abort.abort();
                Err(CycleFailure {
                    cause: FetchError::Timeout(limit),
                    discarded: None,
                })
            }
        }
    }
}
