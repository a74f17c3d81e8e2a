//! Probe targets and their recorded results.
//!
//! # Invariants
//! - Every outcome carries either a status code or an error, never both
//! - Health is derived from the status code alone
//! - Duration is always populated

use std::time::Duration;
use thiserror::Error;

/// A named network target to be health-checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    /// Display label used in reports.
    pub name: String,
    /// Address to probe. Not validated before the request is issued.
    pub url: String,
}

impl Endpoint {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }
}

/// Failure that prevented a probe from yielding a status code.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProbeError {
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    #[error("invalid request: {0}")]
    InvalidUrl(String),

    #[error("connection failed: {0}")]
    Connect(String),

    #[error("request failed: {0}")]
    Request(String),

    /// The probe future panicked before completing.
    #[error("probe aborted: {0}")]
    Aborted(String),
}

impl ProbeError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, ProbeError::Timeout(_))
    }
}

/// What a probe produced: a status code or an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeResult {
    Status(u16),
    Failed(ProbeError),
}

/// Recorded result of probing one endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeOutcome {
    pub endpoint: Endpoint,
    /// Time from request start to response headers or failure.
    pub duration: Duration,
    pub result: ProbeResult,
}

impl ProbeOutcome {
    pub fn status(endpoint: Endpoint, status: u16, duration: Duration) -> Self {
        Self {
            endpoint,
            duration,
            result: ProbeResult::Status(status),
        }
    }

    pub fn failed(endpoint: Endpoint, error: ProbeError, duration: Duration) -> Self {
        Self {
            endpoint,
            duration,
            result: ProbeResult::Failed(error),
        }
    }

    /// Status code, present only when a response was received.
    pub fn status_code(&self) -> Option<u16> {
        match self.result {
            ProbeResult::Status(code) => Some(code),
            ProbeResult::Failed(_) => None,
        }
    }

    /// Error, present only when no response was received.
    pub fn error(&self) -> Option<&ProbeError> {
        match &self.result {
            ProbeResult::Status(_) => None,
            ProbeResult::Failed(e) => Some(e),
        }
    }

    /// True iff a response arrived with a status in `[200, 400)`.
    pub fn is_healthy(&self) -> bool {
        self.status_code().is_some_and(is_healthy_status)
    }
}

/// Classify a status code. 2xx and 3xx are healthy.
pub fn is_healthy_status(code: u16) -> bool {
    (200..400).contains(&code)
}

/// All outcomes of one dispatch plus total wall time.
#[derive(Debug, Clone, Default)]
pub struct CheckRun {
    /// One outcome per endpoint, in input order.
    pub outcomes: Vec<ProbeOutcome>,
    /// Time from dispatch start until every probe finished.
    pub elapsed: Duration,
}

impl CheckRun {
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    pub fn healthy_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_healthy()).count()
    }

    pub fn unhealthy_count(&self) -> usize {
        self.len() - self.healthy_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn endpoint() -> Endpoint {
        Endpoint::new("svc", "http://127.0.0.1:1")
    }

    #[test]
    fn test_not_found_is_unhealthy_without_error() {
        let outcome = ProbeOutcome::status(endpoint(), 404, Duration::from_millis(3));
        assert!(!outcome.is_healthy());
        assert_eq!(outcome.status_code(), Some(404));
        assert!(outcome.error().is_none());
    }

    #[test]
    fn test_no_content_is_healthy() {
        let outcome = ProbeOutcome::status(endpoint(), 204, Duration::from_millis(3));
        assert!(outcome.is_healthy());
        assert_eq!(outcome.status_code(), Some(204));
    }

    #[test]
    fn test_status_boundaries() {
        assert!(!is_healthy_status(199));
        assert!(is_healthy_status(200));
        assert!(is_healthy_status(301));
        assert!(is_healthy_status(399));
        assert!(!is_healthy_status(400));
        assert!(!is_healthy_status(503));
    }

    #[test]
    fn test_error_is_never_healthy() {
        let err = ProbeError::Timeout(Duration::from_secs(1));
        let outcome = ProbeOutcome::failed(endpoint(), err.clone(), Duration::from_secs(1));
        assert!(!outcome.is_healthy());
        assert_eq!(outcome.status_code(), None);
        assert_eq!(outcome.error(), Some(&err));
        assert!(err.is_timeout());
    }

    #[test]
    fn test_check_run_counts() {
        let run = CheckRun {
            outcomes: vec![
                ProbeOutcome::status(endpoint(), 200, Duration::ZERO),
                ProbeOutcome::status(endpoint(), 500, Duration::ZERO),
                ProbeOutcome::failed(
                    endpoint(),
                    ProbeError::Connect("refused".into()),
                    Duration::ZERO,
                ),
            ],
            elapsed: Duration::from_millis(10),
        };
        assert_eq!(run.len(), 3);
        assert_eq!(run.healthy_count(), 1);
        assert_eq!(run.unhealthy_count(), 2);
    }
}
