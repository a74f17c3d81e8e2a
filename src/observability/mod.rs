//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Prober and dispatcher produce:
//!     → logging.rs (structured log events, one span per check run)
//!     → metrics.rs (probe counters and latency histograms)
//! ```

pub mod logging;
pub mod metrics;
