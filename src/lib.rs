//! Concurrent HTTP endpoint health checking.

pub mod config;
pub mod health;
pub mod observability;
pub mod report;

pub use config::CheckerConfig;
pub use health::{CheckRun, DispatchError, Dispatcher, Endpoint, ProbeOutcome, Prober};
pub use report::TextRenderer;
