//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Checker, probes, transport produce:
//!     → logging.rs (structured log events)
//!     → metrics.rs (counters, gauges, histograms)
//!
//! Consumers:
//!     → stderr (pretty or JSON lines)
//!     → Prometheus textfile snapshot (optional)
//! ```
//!
//! # Design Decisions
//! - Structured fields on every event (service, step, elapsed)
//! - Metrics are cheap and optional

pub mod logging;
pub mod metrics;
