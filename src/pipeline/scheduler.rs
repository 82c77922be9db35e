//! Repeats cycles for the lifetime of the process.

use super::coordinator::Coordinator;
use crate::presenter::Presenter;
use crate::scrapers::Visitor;
use crate::utils::{kitchen_time, next_run_at};
use tokio::time::sleep;
use tracing::{info, instrument};

/// Runs one cycle right away, then one more each time `interval` has passed
/// since the previous cycle *finished*.
#[derive(Debug)]
pub struct Scheduler<V, P> {
    coordinator: Coordinator<V, P>,
    max_cycles: Option<usize>,
}

impl<V: Visitor, P: Presenter> Scheduler<V, P> {
    /// `max_cycles` of `None` runs until the task is dropped.
    pub fn new(coordinator: Coordinator<V, P>, max_cycles: Option<usize>) -> Self {
        Self {
            coordinator,
            max_cycles,
        }
    }

    #[cfg(test)]
    pub fn coordinator(&self) -> &Coordinator<V, P> {
        &self.coordinator
    }

    /// Run cycles until the cycle limit is reached.
    ///
    /// Returns the number of successful cycles.
    #[instrument(level = "info", skip_all, fields(max_cycles = ?self.max_cycles))]
    pub async fn run(&self) -> usize {
        let interval = self.coordinator.config().interval;
        let mut cycles = 0usize;
        let mut successes = 0usize;

        loop {
            let last = self.max_cycles.is_some_and(|max| cycles + 1 >= max);
            let outcome = if last {
                self.coordinator.run_final_cycle().await
            } else {
                self.coordinator.run_cycle().await
            };
            cycles += 1;
            if outcome.is_success() {
                successes += 1;
            }

            if last {
                info!(cycles, successes, "Cycle limit reached");
                return successes;
            }

            info!(
                cycles,
                ?interval,
                next_cycle = %kitchen_time(&next_run_at(interval)),
                "Waiting for next cycle"
            );
            sleep(interval).await;
        }
    }
}
