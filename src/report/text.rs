//! Plain-text renderer.

use std::io::{self, Write};
use std::time::Duration;

use crate::health::{CheckRun, ProbeOutcome, ProbeResult};

const RULE: &str = "━━━━━━━━━━━━━━━━━━━━━━━";

/// Writes a check report to any `Write` sink.
pub struct TextRenderer<W> {
    out: W,
}

impl<W: Write> TextRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Banner printed before any probe starts.
    pub fn header(&mut self, timeout: Duration, verbose: bool) -> io::Result<()> {
        writeln!(self.out, "Health Checker v{}", env!("CARGO_PKG_VERSION"))?;
        writeln!(self.out, "{}", RULE)?;
        if verbose {
            writeln!(self.out, "⚙️ Timeout: {:?}", timeout)?;
        }
        writeln!(self.out)?;
        self.out.flush()
    }

    /// One block per probe.
    pub fn outcome(&mut self, outcome: &ProbeOutcome) -> io::Result<()> {
        let status = if outcome.is_healthy() {
            "✓ HEALTHY"
        } else {
            "✗ UNHEALTHY"
        };

        writeln!(self.out, "{} [{}]", status, outcome.endpoint.name)?;
        writeln!(self.out, "  URL: {}", outcome.endpoint.url)?;

        match &outcome.result {
            ProbeResult::Failed(e) => {
                writeln!(self.out, "  Error: {}", e)?;
            }
            ProbeResult::Status(code) => {
                writeln!(self.out, "  Status: {}", code)?;
                writeln!(self.out, "  Response Time: {:.2?}", outcome.duration)?;
            }
        }
        writeln!(self.out)?;
        self.out.flush()
    }

    /// Closing summary once every probe has finished.
    pub fn summary(&mut self, run: &CheckRun) -> io::Result<()> {
        writeln!(self.out, "{}", RULE)?;
        writeln!(
            self.out,
            "✓ Health check complete: {} endpoints ({} healthy, {} unhealthy) in {:.2?}",
            run.len(),
            run.healthy_count(),
            run.unhealthy_count(),
            run.elapsed
        )?;
        self.out.flush()
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
