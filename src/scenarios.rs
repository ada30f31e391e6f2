use crate::configuration::LoadSettings;
use crate::load_runner::{LoadPlan, run_load};
use crate::probe_client::{ProbeClient, ProbeError};
use crate::report::LoadReport;
use crate::utils::error_chain_fmt;
use reqwest::StatusCode;
use serde::Serialize;
use tracing::Span;

#[derive(thiserror::Error)]
pub enum ScenarioError {
    #[error("Expected HTTP 200 from {target} for basic uptime check, got {status}")]
    UnexpectedStatus { target: String, status: StatusCode },
    #[error("Could not reach {target} for basic uptime check.")]
    Unreachable {
        target: String,
        #[source]
        source: ProbeError,
    },
    #[error("Expected at least {required} successful responses, got {succeeded}")]
    BelowThreshold {
        required: usize,
        succeeded: usize,
        report: Box<LoadReport>,
    },
    #[error("Invalid load settings: {0}")]
    InvalidSettings(String),
}

impl std::fmt::Debug for ScenarioError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Scenario {
    BasicUptime,
    SimultaneousUsers,
}

impl Scenario {
    pub const ALL: [Scenario; 2] = [Scenario::BasicUptime, Scenario::SimultaneousUsers];

    pub fn name(&self) -> &'static str {
        match self {
            Scenario::BasicUptime => "basic_uptime",
            Scenario::SimultaneousUsers => "simultaneous_users",
        }
    }
}

impl std::fmt::Display for Scenario {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// One GET against the target must come back with HTTP 200.
#[tracing::instrument(name = "Basic uptime", skip(client), fields(target = %client.target()))]
pub async fn basic_uptime(client: &ProbeClient) -> Result<(), ScenarioError> {
    let status = client
        .get_status()
        .await
        .map_err(|source| ScenarioError::Unreachable {
            target: client.target().to_string(),
            source,
        })?;
    if status != StatusCode::OK {
        return Err(ScenarioError::UnexpectedStatus {
            target: client.target().to_string(),
            status,
        });
    }
    Ok(())
}

/// Many simultaneous GETs; enough of them must come back with HTTP 200.
#[tracing::instrument(
    name = "Simultaneous users",
    skip(client, settings),
    fields(
        total_requests = settings.total_requests,
        workers = settings.workers,
        success_ratio = tracing::field::Empty,
        required_successes = tracing::field::Empty
    )
)]
pub async fn simultaneous_users(
    client: &ProbeClient,
    settings: &LoadSettings,
) -> Result<LoadReport, ScenarioError> {
    let threshold = Threshold::from_settings(settings)?;
    Span::current()
        .record("success_ratio", threshold.success_ratio)
        .record("required_successes", threshold.required_successes);
    let required = threshold.required_successes;
    let plan = LoadPlan::new(settings.total_requests, settings.workers);
    let report = run_load(client, &plan).await;
    if !report.meets(required) {
        return Err(ScenarioError::BelowThreshold {
            required,
            succeeded: report.succeeded,
            report: Box::new(report),
        });
    }
    Ok(report)
}

/// Pass mark of the load scenario, as configured.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Threshold {
    pub success_ratio: f64,
    pub required_successes: usize,
}

impl Threshold {
    pub fn from_settings(settings: &LoadSettings) -> Result<Self, ScenarioError> {
        let ratio = settings
            .success_ratio()
            .map_err(ScenarioError::InvalidSettings)?;
        Ok(Self {
            success_ratio: ratio.as_f64(),
            required_successes: ratio.required_successes(settings.total_requests),
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ScenarioResult {
    pub scenario: Scenario,
    pub passed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threshold: Option<Threshold>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<LoadReport>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScenarioSummary {
    pub target: String,
    pub results: Vec<ScenarioResult>,
}

impl ScenarioSummary {
    pub fn passed(&self) -> bool {
        self.results.iter().all(|r| r.passed)
    }
}

/// Run every scenario in order. A failing scenario does not stop the
/// ones after it.
pub async fn run_all(client: &ProbeClient, settings: &LoadSettings) -> ScenarioSummary {
    let mut results = Vec::with_capacity(Scenario::ALL.len());
    for scenario in Scenario::ALL {
        let threshold = match scenario {
            Scenario::BasicUptime => None,
            Scenario::SimultaneousUsers => Threshold::from_settings(settings).ok(),
        };
        let result = match scenario {
            Scenario::BasicUptime => basic_uptime(client).await.map(|()| None),
            Scenario::SimultaneousUsers => simultaneous_users(client, settings).await.map(Some),
        };
        let result = match result {
            Ok(report) => {
                tracing::info!(%scenario, "Scenario passed.");
                ScenarioResult {
                    scenario,
                    passed: true,
                    threshold,
                    message: None,
                    report,
                }
            }
            Err(e) => {
                tracing::error!(
                    %scenario,
                    error.cause_chain = ?e,
                    error.message = %e,
                    "Scenario failed."
                );
                let message = Some(e.to_string());
                let report = match e {
                    ScenarioError::BelowThreshold { report, .. } => Some(*report),
                    _ => None,
                };
                ScenarioResult {
                    scenario,
                    passed: false,
                    threshold,
                    message,
                    report,
                }
            }
        };
        results.push(result);
    }
    ScenarioSummary {
        target: client.target().to_string(),
        results,
    }
}
