use crate::domain::RequestOutcome;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use std::time::Duration;
use uuid::Uuid;

/// Key under which requests that never received a response are counted.
pub const TRANSPORT_ERROR_KEY: &str = "error";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LatencySummary {
    pub min_ms: u64,
    pub max_ms: u64,
    pub mean_ms: f64,
    pub p50_ms: u64,
    pub p95_ms: u64,
}

impl LatencySummary {
    pub fn from_latencies(latencies: &[Duration]) -> Self {
        if latencies.is_empty() {
            return Self {
                min_ms: 0,
                max_ms: 0,
                mean_ms: 0.0,
                p50_ms: 0,
                p95_ms: 0,
            };
        }
        let mut millis: Vec<u64> = latencies.iter().map(|d| d.as_millis() as u64).collect();
        millis.sort_unstable();
        let total: u64 = millis.iter().sum();
        Self {
            min_ms: millis[0],
            max_ms: millis[millis.len() - 1],
            mean_ms: total as f64 / millis.len() as f64,
            p50_ms: nearest_rank(&millis, 50),
            p95_ms: nearest_rank(&millis, 95),
        }
    }
}

// `sorted` must be non-empty and ascending.
fn nearest_rank(sorted: &[u64], percentile: usize) -> u64 {
    let rank = (percentile * sorted.len()).div_ceil(100).max(1);
    sorted[rank - 1]
}

/// Aggregate result of one load run.
#[derive(Debug, Clone, Serialize)]
pub struct LoadReport {
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub attempted: usize,
    pub succeeded: usize,
    /// Planned requests whose worker never reported back. Counted as failed.
    pub unfinished: usize,
    pub elapsed_ms: u64,
    pub latency: LatencySummary,
    pub status_counts: BTreeMap<String, usize>,
}

impl LoadReport {
    pub fn from_outcomes(
        run_id: Uuid,
        started_at: DateTime<Utc>,
        outcomes: &[RequestOutcome],
        unfinished: usize,
        elapsed: Duration,
    ) -> Self {
        let mut status_counts = BTreeMap::new();
        for outcome in outcomes {
            let key = match outcome.status {
                Some(status) => status.to_string(),
                None => TRANSPORT_ERROR_KEY.to_string(),
            };
            *status_counts.entry(key).or_insert(0) += 1;
        }
        let latencies: Vec<Duration> = outcomes.iter().map(|o| o.latency).collect();
        Self {
            run_id,
            started_at,
            attempted: outcomes.len() + unfinished,
            succeeded: outcomes.iter().filter(|o| o.is_success()).count(),
            unfinished,
            elapsed_ms: elapsed.as_millis() as u64,
            latency: LatencySummary::from_latencies(&latencies),
            status_counts,
        }
    }

    pub fn failed(&self) -> usize {
        self.attempted - self.succeeded
    }

    pub fn success_ratio(&self) -> f64 {
        if self.attempted == 0 {
            return 0.0;
        }
        self.succeeded as f64 / self.attempted as f64
    }

    pub fn meets(&self, required_successes: usize) -> bool {
        self.succeeded >= required_successes
    }
}
