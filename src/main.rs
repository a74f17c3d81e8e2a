//! healthcheck: concurrent HTTP health checks from the command line.
//!
//! # Architecture Overview
//!
//! ```text
//!   flags / config file
//!          │
//!          ▼
//!   ┌─────────────┐   one task per endpoint   ┌──────────┐
//!   │ Dispatcher  │──────────────────────────▶│  Prober  │──▶ GET url
//!   │             │◀──────────────────────────│          │
//!   └──────┬──────┘   ProbeOutcome (any order)└──────────┘
//!          │ join barrier
//!          ▼
//!   ┌─────────────┐
//!   │TextRenderer │──▶ stdout
//!   └─────────────┘
//! ```
//!
//! Exit code is 0 whenever the run completes, whatever the endpoints report.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use healthcheck::config::{load_config, schema::custom_endpoints, CheckerConfig, ObservabilityConfig};
use healthcheck::observability::logging;
use healthcheck::{Dispatcher, TextRenderer};

#[derive(Parser)]
#[command(name = "healthcheck", version)]
#[command(about = "A CLI tool for health checking endpoints", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check the health of configured endpoints
    Check(CheckArgs),
}

#[derive(Args)]
struct CheckArgs {
    /// Request timeout in seconds
    #[arg(short, long, value_parser = clap::value_parser!(u64).range(1..))]
    timeout: Option<u64>,

    /// Comma-separated list of endpoints to check
    #[arg(short, long, value_delimiter = ',')]
    urls: Vec<String>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Maximum probes in flight (unbounded by default)
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    max_concurrency: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Check(args) => run_check(args).await,
    }
}

async fn run_check(args: CheckArgs) -> Result<(), Box<dyn std::error::Error>> {
    // Installed before the config is read so load-time warnings are kept.
    let initial_level = if args.verbose {
        "debug".to_string()
    } else {
        ObservabilityConfig::default().log_level
    };
    let log = logging::init(&initial_level);

    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => CheckerConfig::default(),
    };

    if let Some(timeout) = args.timeout {
        config.timeout_secs = timeout;
    }
    if let Some(limit) = args.max_concurrency {
        config.max_concurrency = Some(usize::try_from(limit)?);
    }
    if args.verbose {
        config.observability.log_level = "debug".to_string();
    }
    if let Some(log) = &log {
        log.set_level(&config.observability.log_level)?;
    }

    let endpoints = if args.urls.is_empty() {
        config.resolved_endpoints()
    } else {
        custom_endpoints(args.urls)
    };

    tracing::debug!(
        endpoints = endpoints.len(),
        timeout_secs = config.timeout_secs,
        max_concurrency = ?config.max_concurrency,
        "Starting health check"
    );

    let dispatcher = Dispatcher::from_config(&config)?;
    let mut renderer = TextRenderer::new(std::io::stdout().lock());
    renderer.header(config.timeout(), args.verbose)?;

    let mut write_error = None;
    let run = dispatcher
        .run_all_with(endpoints, config.timeout(), |outcome| {
            if write_error.is_none() {
                if let Err(e) = renderer.outcome(outcome) {
                    write_error = Some(e);
                }
            }
        })
        .await?;

    if let Some(e) = write_error {
        return Err(e.into());
    }

    renderer.summary(&run)?;
    Ok(())
}
