use crate::domain::{RequestOutcome, TargetUrl};
use crate::utils::error_chain_fmt;
use reqwest::{Client, StatusCode, redirect};
use std::time::{Duration, Instant};

#[derive(thiserror::Error)]
pub enum ProbeError {
    #[error("Invalid target: {0}")]
    InvalidTarget(String),
    #[error("Failed to build the HTTP client.")]
    ClientBuild(#[source] reqwest::Error),
    #[error("Failed to reach the target.")]
    Transport(#[source] reqwest::Error),
}

impl std::fmt::Debug for ProbeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

/// Redirect hops followed before the 3xx itself is reported.
const MAX_REDIRECTS: usize = 20;

// Follow redirects while they stay on the original scheme. A scheme switch
// or too many hops leaves the redirect response as the final status.
fn same_scheme_redirects() -> redirect::Policy {
    redirect::Policy::custom(|attempt| {
        let same_scheme = attempt
            .previous()
            .last()
            .is_none_or(|previous| previous.scheme() == attempt.url().scheme());
        if !same_scheme || attempt.previous().len() > MAX_REDIRECTS {
            attempt.stop()
        } else {
            attempt.follow()
        }
    })
}

/// Issues GET requests against a single target URL.
///
/// Cloning is cheap: clones share the underlying connection pool.
#[derive(Clone, Debug)]
pub struct ProbeClient {
    target: TargetUrl,
    http_client: Client,
}

impl ProbeClient {
    pub fn new(
        target: TargetUrl,
        connect_timeout: Duration,
        read_timeout: Duration,
    ) -> Result<Self, ProbeError> {
        let http_client = Client::builder()
            .connect_timeout(connect_timeout)
            .read_timeout(read_timeout)
            // Upper bound on the whole exchange, connect plus read.
            .timeout(connect_timeout + read_timeout)
            .redirect(same_scheme_redirects())
            .build()
            .map_err(ProbeError::ClientBuild)?;
        Ok(Self {
            target,
            http_client,
        })
    }

    pub fn target(&self) -> &TargetUrl {
        &self.target
    }

    #[tracing::instrument(name = "Probing target", skip(self), fields(target = %self.target))]
    pub async fn get_status(&self) -> Result<StatusCode, ProbeError> {
        let response = self
            .http_client
            .get(self.target.as_url().clone())
            .send()
            .await
            .map_err(ProbeError::Transport)?;
        Ok(response.status())
    }

    /// Single GET whose failures are folded into the returned outcome.
    pub async fn probe(&self) -> RequestOutcome {
        let start = Instant::now();
        match self.get_status().await {
            Ok(status) => RequestOutcome::responded(status.as_u16(), start.elapsed()),
            Err(e) => {
                tracing::debug!(
                    error.cause_chain = ?e,
                    error.message = %e,
                    "Request failed."
                );
                RequestOutcome::failed(start.elapsed())
            }
        }
    }
}
