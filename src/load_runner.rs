use crate::domain::RequestOutcome;
use crate::probe_client::ProbeClient;
use crate::report::LoadReport;
use chrono::Utc;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;
use tokio::task::JoinSet;
use tracing::{Span, field::display};
use uuid::Uuid;

/// How many requests to issue and how many of them may be in flight at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadPlan {
    pub total_requests: usize,
    pub workers: usize,
}

impl LoadPlan {
    pub fn new(total_requests: usize, workers: usize) -> Self {
        Self {
            total_requests,
            workers,
        }
    }

    /// Number of worker tasks actually spawned: at least one, never more
    /// than there are requests to issue.
    pub fn worker_count(&self) -> usize {
        if self.total_requests == 0 {
            return 0;
        }
        self.workers.clamp(1, self.total_requests)
    }
}

/// Fan `plan.total_requests` GETs out over a fixed pool of workers and wait
/// for all of them.
///
/// Requests are independent: workers only share the counter handing out
/// request slots. Outcomes lost to a worker that panicked count as failures,
/// so the report always accounts for every planned request.
#[tracing::instrument(
    name = "Running load",
    skip_all,
    fields(
        run_id = tracing::field::Empty,
        total_requests = plan.total_requests,
        workers = plan.worker_count()
    )
)]
pub async fn run_load(client: &ProbeClient, plan: &LoadPlan) -> LoadReport {
    let run_id = Uuid::new_v4();
    Span::current().record("run_id", display(run_id));
    let started_at = Utc::now();
    let start = Instant::now();

    let next_slot = Arc::new(AtomicUsize::new(0));
    let mut workers = JoinSet::new();
    for _ in 0..plan.worker_count() {
        workers.spawn(worker_loop(
            client.clone(),
            Arc::clone(&next_slot),
            plan.total_requests,
        ));
    }

    let (outcomes, unfinished) = collect_outcomes(workers, plan.total_requests).await;
    let elapsed = start.elapsed();

    let report = LoadReport::from_outcomes(run_id, started_at, &outcomes, unfinished, elapsed);
    tracing::info!(
        attempted = report.attempted,
        succeeded = report.succeeded,
        elapsed_ms = report.elapsed_ms,
        p95_ms = report.latency.p95_ms,
        "Load run finished."
    );
    report
}

/// Join every worker. Returns the recorded outcomes and the number of planned
/// requests no finished worker accounted for.
async fn collect_outcomes(
    mut workers: JoinSet<Vec<RequestOutcome>>,
    total_requests: usize,
) -> (Vec<RequestOutcome>, usize) {
    let mut outcomes = Vec::with_capacity(total_requests);
    while let Some(joined) = workers.join_next().await {
        match joined {
            Ok(batch) => outcomes.extend(batch),
            Err(e) => {
                tracing::error!(
                    error.cause_chain = ?e,
                    error.message = %e,
                    "A load worker did not finish. Its requests count as failed."
                );
            }
        }
    }
    let unfinished = total_requests.saturating_sub(outcomes.len());
    (outcomes, unfinished)
}

async fn worker_loop(
    client: ProbeClient,
    next_slot: Arc<AtomicUsize>,
    total_requests: usize,
) -> Vec<RequestOutcome> {
    let mut outcomes = Vec::new();
    while next_slot.fetch_add(1, Ordering::Relaxed) < total_requests {
        outcomes.push(client.probe().await);
    }
    outcomes
}
