//! Human-readable reporting of check runs.
//!
//! # Data Flow
//! ```text
//! CLI
//!     → header (banner, timeout when verbose)
//!     → outcome per probe, in completion order
//!     → summary after the join barrier
//! ```

pub mod text;

pub use text::TextRenderer;
