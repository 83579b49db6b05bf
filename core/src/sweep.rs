//! Bounded-concurrency fan-out/fan-in over the probe executor.
//!
//! The coordinator dispatches one probe per address with at most
//! `max_workers` in flight, then drains completions in whatever order they
//! finish. Outcomes fan in through the join handles on this single task, so
//! the two result collections are only ever appended from one place and no
//! shared-mutable state exists.

use std::net::Ipv4Addr;
use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{error, info};

use crate::probe::{ProbeExecutor, ProbeOutcome, ProbeStatus};

const PROGRESS_INTERVAL: usize = 10;

/// Invoked after every completed probe with (completed, total).
pub type ProgressCallback = Box<dyn Fn(usize, usize) + Send + Sync>;

/// The two append-only outcome collections of a run, unsorted.
#[derive(Debug, Default)]
pub struct SweepOutcomes {
    pub reachable: Vec<Ipv4Addr>,
    pub unreachable: Vec<Ipv4Addr>,
}

impl SweepOutcomes {
    pub fn total(&self) -> usize {
        self.reachable.len() + self.unreachable.len()
    }

    fn record(&mut self, outcome: ProbeOutcome) {
        match outcome.status {
            ProbeStatus::Reachable => self.reachable.push(outcome.addr),
            ProbeStatus::Unreachable => self.unreachable.push(outcome.addr),
        }
    }
}

/// Probes every address with at most `max_workers` probes in flight.
///
/// Every dispatched probe is awaited before this returns; once dispatched,
/// probes run to completion and cannot be cancelled. A probe task that
/// fails is contained and logged without aborting its siblings. Dispatch
/// imposes no ordering on completion.
pub async fn run_sweep(
    addrs: Vec<Ipv4Addr>,
    executor: Arc<dyn ProbeExecutor>,
    max_workers: usize,
    on_progress: Option<ProgressCallback>,
) -> SweepOutcomes {
    let total = addrs.len();
    info!("starting sweep of {total} addresses");

    let semaphore = Arc::new(Semaphore::new(max_workers.max(1)));
    let mut tasks: JoinSet<ProbeOutcome> = JoinSet::new();

    for addr in addrs {
        let semaphore = Arc::clone(&semaphore);
        let executor = Arc::clone(&executor);
        tasks.spawn(async move {
            // Never closed while the set is being driven.
            let _permit = semaphore
                .acquire_owned()
                .await
                .expect("sweep semaphore closed");
            executor.probe(addr).await
        });
    }

    let mut outcomes = SweepOutcomes::default();
    let mut completed = 0;

    while let Some(joined) = tasks.join_next().await {
        completed += 1;

        match joined {
            Ok(outcome) => outcomes.record(outcome),
            Err(err) => error!("probe task failed: {err}"),
        }

        if completed % PROGRESS_INTERVAL == 0 {
            let percent = completed as f64 / total as f64 * 100.0;
            info!("progress: {completed}/{total} ({percent:.1}%)");
        }

        if let Some(callback) = &on_progress {
            callback(completed, total);
        }
    }

    info!("sweep complete: {completed}/{total}");
    outcomes
}
