use std::time::Duration;

/// Result of a single GET against the target.
///
/// `status` is `None` when no response was received at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestOutcome {
    pub status: Option<u16>,
    pub latency: Duration,
}

impl RequestOutcome {
    pub fn responded(status: u16, latency: Duration) -> Self {
        Self {
            status: Some(status),
            latency,
        }
    }

    pub fn failed(latency: Duration) -> Self {
        Self {
            status: None,
            latency,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == Some(200)
    }
}
