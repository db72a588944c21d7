//! Temporal cluster health checker.
//!
//! Dials the frontend, history and matching services, asks each for its
//! gRPC health status, then checks cluster metadata, namespaces and peer
//! replication through the frontend. One pass per invocation.
//!
//! # Architecture Overview
//!
//! ```text
//!   config.toml ──▶ config ──▶ CheckerConfig
//!                                   │
//!                                   ▼
//!                ┌────────────────────────────────────┐
//!                │              Checker               │
//!                │  ConnectionSet (frontend/history/  │
//!                │  matching tonic channels)          │
//!                │                                    │
//!                │  basic_check ─▶ grpc.health.v1     │──▶ each service
//!                │  full_check  ─▶ WorkflowService    │──▶ frontend
//!                │               ─▶ OperatorService   │
//!                └─────────────────┬──────────────────┘
//!                                  ▼
//!                    ErrorList ──▶ report on stderr, exit code
//! ```
//!
//! Exit codes: 0 healthy, 1 a check failed, 2 configuration or dial error.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use temporal_healthcheck::config::{load_config, ConfigError, ObservabilityConfig};
use temporal_healthcheck::lifecycle::{run_checks, RunOutcome};
use temporal_healthcheck::observability::logging::init_logging;
use temporal_healthcheck::observability::metrics;
use temporal_healthcheck::transport::GrpcConnector;

#[derive(Parser)]
#[command(name = "temporal-healthcheck")]
#[command(about = "Health checker for Temporal frontend, history and matching services", long_about = None)]
struct Cli {
    /// TOML config file
    #[arg(short, long, env = "HEALTHCHECK_CONFIG")]
    config: PathBuf,

    /// Override the configured log level
    #[arg(long)]
    log_level: Option<String>,

    /// Write a Prometheus text snapshot to this file on exit
    #[arg(long)]
    metrics_out: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut config = match load_config(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            let _ = init_logging(&ObservabilityConfig::default());
            tracing::error!(path = %cli.config.display(), error = %e, "Failed to load configuration");
            match &e {
                ConfigError::Validation(errs) => eprintln!("{}", errs.report()),
                other => eprintln!("{}", other),
            }
            return RunOutcome::Misconfigured(Default::default()).exit_code();
        }
    };

    if let Some(level) = cli.log_level {
        config.observability.log_level = level;
    }
    if let Err(e) = init_logging(&config.observability) {
        eprintln!("Failed to initialize logging: {}", e);
    }

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "temporal-healthcheck starting");

    let metrics_handle = match &cli.metrics_out {
        Some(_) => match metrics::install_recorder() {
            Ok(handle) => Some(handle),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to install metrics recorder");
                None
            }
        },
        None => None,
    };

    let outcome = run_checks(config.services, &GrpcConnector).await;

    if let Some(errs) = outcome.errors() {
        tracing::error!(failures = errs.len(), "Health check failed");
        eprintln!("{}", errs.report());
    }

    if let (Some(handle), Some(path)) = (&metrics_handle, &cli.metrics_out) {
        if let Err(e) = metrics::write_snapshot(handle, path) {
            tracing::error!(path = %path.display(), error = %e, "Failed to write metrics snapshot");
        }
    }

    outcome.exit_code()
}
