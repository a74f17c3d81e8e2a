//! Concurrent fan-out and collection of probes.
//!
//! # Responsibilities
//! - Spawn one probe task per endpoint
//! - Surface each outcome as soon as its task completes
//! - Wait for every task before returning (join barrier)
//! - Return outcomes in input order with total elapsed time
//!
//! # Design Decisions
//! - Probe failures are outcomes, never dispatch errors
//! - No fail-fast: a slow or failing probe never cancels its siblings
//! - Fan-out is unbounded unless `max_concurrency` is set, in which case a
//!   semaphore gates admission and the probe timer starts after admission
//! - Tasks return `(index, outcome)`; the collector writes per-index slots
//!   that are only read after the barrier

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tokio::sync::{AcquireError, Semaphore};
use tokio::task::{JoinError, JoinSet};
use tokio::time::Instant;
use tracing::Instrument;
use uuid::Uuid;

use crate::config::CheckerConfig;
use crate::health::outcome::{CheckRun, Endpoint, ProbeOutcome};
use crate::health::prober::Prober;

/// Systemic failure of a check run. Individual probe errors never end up here.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),

    #[error("probe task did not complete: {0}")]
    Join(#[from] JoinError),

    #[error("failed to acquire probe slot: {0}")]
    Admission(#[from] AcquireError),

    #[error("no outcome recorded for endpoint #{index}")]
    MissingOutcome { index: usize },
}

/// Runs probes for a set of endpoints concurrently.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    prober: Prober,
    admission: Option<Arc<Semaphore>>,
    max_concurrency: Option<usize>,
}

impl Dispatcher {
    /// Create a dispatcher. `max_concurrency` of `None` means unbounded fan-out.
    pub fn new(prober: Prober, max_concurrency: Option<usize>) -> Self {
        let max_concurrency = max_concurrency.map(|limit| limit.max(1));
        Self {
            prober,
            admission: max_concurrency.map(|limit| Arc::new(Semaphore::new(limit))),
            max_concurrency,
        }
    }

    /// Build the prober and dispatcher from configuration.
    pub fn from_config(config: &CheckerConfig) -> Result<Self, DispatchError> {
        let prober = Prober::new(&config.http)?;
        Ok(Self::new(prober, config.max_concurrency))
    }

    /// Probe every endpoint and wait for all of them.
    pub async fn run_all(
        &self,
        endpoints: Vec<Endpoint>,
        timeout: Duration,
    ) -> Result<CheckRun, DispatchError> {
        self.run_all_with(endpoints, timeout, |_| {}).await
    }

    /// Like [`run_all`](Self::run_all), calling `on_outcome` for each result
    /// in completion order as it arrives.
    pub async fn run_all_with<F>(
        &self,
        endpoints: Vec<Endpoint>,
        timeout: Duration,
        mut on_outcome: F,
    ) -> Result<CheckRun, DispatchError>
    where
        F: FnMut(&ProbeOutcome),
    {
        let start = Instant::now();

        if endpoints.is_empty() {
            tracing::debug!("No endpoints to check");
            return Ok(CheckRun {
                outcomes: Vec::new(),
                elapsed: start.elapsed(),
            });
        }

        let total = endpoints.len();
        let span = tracing::info_span!("check_run", run_id = %Uuid::new_v4(), endpoints = total);

        async move {
            tracing::info!(
                timeout_ms = timeout.as_millis() as u64,
                max_concurrency = ?self.max_concurrency,
                "Dispatching probes"
            );

            let mut tasks = JoinSet::new();
            for (index, endpoint) in endpoints.into_iter().enumerate() {
                tasks.spawn(
                    run_unit(
                        self.prober.clone(),
                        self.admission.clone(),
                        index,
                        endpoint,
                        timeout,
                    )
                    .in_current_span(),
                );
            }

            let mut slots: Vec<Option<ProbeOutcome>> = vec![None; total];
            let mut fatal: Option<DispatchError> = None;

            // Barrier: drain every task, even after a fatal error.
            while let Some(joined) = tasks.join_next().await {
                match joined {
                    Ok(Ok((index, outcome))) => {
                        on_outcome(&outcome);
                        slots[index] = Some(outcome);
                    }
                    Ok(Err(e)) => {
                        tracing::error!(error = %e, "Probe task failed to run");
                        fatal.get_or_insert(e);
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "Probe task did not complete");
                        fatal.get_or_insert(DispatchError::Join(e));
                    }
                }
            }

            let elapsed = start.elapsed();

            if let Some(e) = fatal {
                return Err(e);
            }

            let outcomes = slots
                .into_iter()
                .enumerate()
                .map(|(index, slot)| slot.ok_or(DispatchError::MissingOutcome { index }))
                .collect::<Result<Vec<_>, _>>()?;

            let run = CheckRun { outcomes, elapsed };
            tracing::info!(
                healthy = run.healthy_count(),
                unhealthy = run.unhealthy_count(),
                elapsed_ms = elapsed.as_millis() as u64,
                "Check run complete"
            );
            Ok(run)
        }
        .instrument(span)
        .await
    }

    /// Configured in-flight limit, if any.
    pub fn max_concurrency(&self) -> Option<usize> {
        self.max_concurrency
    }
}

async fn run_unit(
    prober: Prober,
    admission: Option<Arc<Semaphore>>,
    index: usize,
    endpoint: Endpoint,
    timeout: Duration,
) -> Result<(usize, ProbeOutcome), DispatchError> {
    let _permit = match admission {
        Some(semaphore) => Some(semaphore.acquire_owned().await?),
        None => None,
    };

    let outcome = prober.probe(&endpoint, timeout).await;
    Ok((index, outcome))
}
