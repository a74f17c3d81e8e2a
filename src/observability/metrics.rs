//! Probe metrics.
//!
//! # Metrics
//! - `healthcheck_probes_total` (counter): probes by endpoint and health
//! - `healthcheck_probe_duration_seconds` (histogram): probe latency
//!
//! # Design Decisions
//! - Recorded through the `metrics` facade; a no-op unless the embedding
//!   application installs a recorder

use crate::health::ProbeOutcome;

/// Record one finished probe.
pub fn record_probe(outcome: &ProbeOutcome) {
    let endpoint = outcome.endpoint.name.clone();
    let healthy = if outcome.is_healthy() { "true" } else { "false" };

    metrics::counter!(
        "healthcheck_probes_total",
        "endpoint" => endpoint.clone(),
        "healthy" => healthy
    )
    .increment(1);

    metrics::histogram!("healthcheck_probe_duration_seconds", "endpoint" => endpoint)
        .record(outcome.duration.as_secs_f64());
}
