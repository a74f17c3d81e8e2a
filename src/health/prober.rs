//! Single-endpoint HTTP probe.
//!
//! # Responsibilities
//! - Issue one GET against an endpoint
//! - Bound it by a deadline
//! - Measure elapsed time on every exit path
//! - Classify the result as a status code or a transport error
//!
//! # Design Decisions
//! - Transport failures are returned as data, never propagated
//! - Idle pooling is disabled so each probe owns its connection and
//!   nothing outlives the call
//! - A panic inside the request future is caught and recorded

use std::any::Any;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::time::Duration;

use futures_util::FutureExt;
use reqwest::{redirect, Client};
use tokio::time::{self, Instant};

use crate::config::HttpConfig;
use crate::health::outcome::{is_healthy_status, Endpoint, ProbeError, ProbeOutcome, ProbeResult};
use crate::observability::metrics;

/// Issues health probes through a shared HTTP client.
#[derive(Debug, Clone)]
pub struct Prober {
    client: Client,
}

impl Prober {
    /// Build a prober from HTTP client settings.
    pub fn new(config: &HttpConfig) -> Result<Self, reqwest::Error> {
        let redirects = if config.max_redirects == 0 {
            redirect::Policy::none()
        } else {
            redirect::Policy::limited(config.max_redirects)
        };

        let mut builder = Client::builder()
            .user_agent(config.user_agent.clone())
            .redirect(redirects)
            .pool_max_idle_per_host(0);
        if !config.system_proxy {
            builder = builder.no_proxy();
        }
        let client = builder.build()?;

        Ok(Self { client })
    }

    /// Probe one endpoint, giving up after `timeout`.
    pub async fn probe(&self, endpoint: &Endpoint, timeout: Duration) -> ProbeOutcome {
        let (result, duration) = measure(self.send(&endpoint.url, timeout)).await;

        match &result {
            ProbeResult::Status(status) if is_healthy_status(*status) => {
                tracing::debug!(
                    endpoint = %endpoint.name,
                    url = %endpoint.url,
                    status = *status,
                    duration_ms = duration.as_millis() as u64,
                    "Probe succeeded"
                );
            }
            ProbeResult::Status(status) => {
                tracing::warn!(
                    endpoint = %endpoint.name,
                    url = %endpoint.url,
                    status = *status,
                    "Probe failed: non-success status"
                );
            }
            ProbeResult::Failed(e) => {
                tracing::warn!(
                    endpoint = %endpoint.name,
                    url = %endpoint.url,
                    error = %e,
                    "Probe failed"
                );
            }
        }

        let outcome = ProbeOutcome {
            endpoint: endpoint.clone(),
            duration,
            result,
        };
        metrics::record_probe(&outcome);
        outcome
    }

    async fn send(&self, url: &str, timeout: Duration) -> ProbeResult {
        match time::timeout(timeout, self.client.get(url).send()).await {
            Ok(Ok(response)) => {
                let status = response.status().as_u16();
                // Releases the connection; the body is never read.
                drop(response);
                ProbeResult::Status(status)
            }
            Ok(Err(e)) => ProbeResult::Failed(classify(&e, timeout)),
            Err(_) => ProbeResult::Failed(ProbeError::Timeout(timeout)),
        }
    }
}

/// Run a request future, timing it and turning a panic into an error.
async fn measure<F>(request: F) -> (ProbeResult, Duration)
where
    F: Future<Output = ProbeResult>,
{
    let start = Instant::now();
    let result = match AssertUnwindSafe(request).catch_unwind().await {
        Ok(result) => result,
        Err(panic) => ProbeResult::Failed(ProbeError::Aborted(panic_message(&*panic))),
    };
    (result, start.elapsed())
}

fn classify(err: &reqwest::Error, timeout: Duration) -> ProbeError {
    if err.is_timeout() {
        return ProbeError::Timeout(timeout);
    }

    let detail = error_chain(err);
    if err.is_builder() {
        ProbeError::InvalidUrl(detail)
    } else if err.is_connect() {
        ProbeError::Connect(detail)
    } else {
        ProbeError::Request(detail)
    }
}

/// Flatten an error and its sources into one line.
fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
