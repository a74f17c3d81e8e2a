//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the tracing subscriber before anything else logs
//! - Resolve the log level from config, overridable via `RUST_LOG`
//! - Allow the level to change once the config file has been read
//!
//! # Design Decisions
//! - Logs go to stderr so the report on stdout stays clean
//! - The filter sits behind a reload layer: the subscriber is installed with
//!   a provisional level, then switched to the configured one

use tracing::Subscriber;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::{layer::SubscriberExt, reload, EnvFilter, Registry};

/// Build the filter: `RUST_LOG` wins, otherwise `healthcheck=<level>`.
pub fn filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| format!("healthcheck={}", level).into())
}

/// Handle for changing the log level after the subscriber is installed.
#[derive(Clone)]
pub struct LogHandle {
    inner: reload::Handle<EnvFilter, Registry>,
}

impl LogHandle {
    /// Switch to `level`. `RUST_LOG` still takes precedence.
    pub fn set_level(&self, level: &str) -> Result<(), reload::Error> {
        self.inner.reload(filter(level))
    }
}

/// Build a subscriber writing to `writer`, plus its level handle.
pub fn subscriber<W>(level: &str, writer: W) -> (impl Subscriber + Send + Sync + 'static, LogHandle)
where
    W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    let (filter_layer, inner) = reload::Layer::new(filter(level));
    let subscriber = tracing_subscriber::registry()
        .with(filter_layer)
        .with(tracing_subscriber::fmt::layer().with_writer(writer));

    (subscriber, LogHandle { inner })
}

/// Install the global subscriber on stderr.
///
/// Returns `None` when a global subscriber is already set.
pub fn init(level: &str) -> Option<LogHandle> {
    let (subscriber, handle) = subscriber(level, std::io::stderr);
    tracing::subscriber::set_global_default(subscriber)
        .ok()
        .map(|_| handle)
}


#[cfg(test)]
mod tests {
    use super::capture::CapturedLogs;
    use super::*;

    #[test]
    fn test_level_can_be_raised_after_install() {
        let logs = CapturedLogs::default();
        let sink = logs.clone();
        let (subscriber, handle) = subscriber("warn", move || sink.clone());

        tracing::subscriber::with_default(subscriber, || {
            tracing::debug!("hidden at warn");
            handle.set_level("debug").unwrap();
            tracing::debug!("shown at debug");
        });

        let contents = logs.contents();
        assert!(!contents.contains("hidden at warn"));
        assert!(contents.contains("shown at debug"));
    }
}
