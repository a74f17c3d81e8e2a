//! Health checking subsystem.
//!
//! # Data Flow
//! ```text
//! Dispatcher (dispatcher.rs):
//!     Endpoint list + timeout
//!     → Spawn one probe task per endpoint
//!     → Collect outcomes as tasks complete
//!     → Join barrier, then CheckRun in input order
//!
//! Prober (prober.rs):
//!     GET endpoint.url under a deadline
//!     → ProbeOutcome (status code or error, always a duration)
//!
//! Outcome model (outcome.rs):
//!     Endpoint, ProbeOutcome, ProbeError, CheckRun
//! ```
//!
//! # Design Decisions
//! - Per-endpoint failures are data, only systemic failures are errors
//! - 2xx and 3xx are healthy, everything else is not
//! - Completion order is never relied upon; results are re-ordered at the
//!   collection boundary

pub mod dispatcher;
pub mod outcome;
pub mod prober;

pub use dispatcher::{DispatchError, Dispatcher};
pub use outcome::{is_healthy_status, CheckRun, Endpoint, ProbeError, ProbeOutcome, ProbeResult};
pub use prober::Prober;
