//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the checker.
//! All types derive Serde traits for deserialization from config files.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Root configuration file layout.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Per-service probe settings (`[frontend]`, `[history]`, `[matching]`).
    #[serde(flatten)]
    pub services: CheckerConfig,

    /// Logging settings.
    pub observability: ObservabilityConfig,
}

/// The three backend services of a Temporal cluster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceKind {
    Frontend,
    History,
    Matching,
}

impl ServiceKind {
    /// Every kind, in probe order.
    pub const ALL: [ServiceKind; 3] = [
        ServiceKind::Frontend,
        ServiceKind::History,
        ServiceKind::Matching,
    ];

    /// Fully-qualified gRPC service name registered with the health server.
    pub fn health_service_name(&self) -> &'static str {
        match self {
            ServiceKind::Frontend => "temporal.api.workflowservice.v1.WorkflowService",
            ServiceKind::History => "temporal.server.api.historyservice.v1.HistoryService",
            ServiceKind::Matching => "temporal.server.api.matchingservice.v1.MatchingService",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceKind::Frontend => "frontend",
            ServiceKind::History => "history",
            ServiceKind::Matching => "matching",
        }
    }
}

impl fmt::Display for ServiceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Probe settings for the whole cluster, one section per service.
///
/// Immutable once handed to a [`Checker`](crate::check::Checker).
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct CheckerConfig {
    pub frontend: ServiceConfig,
    pub history: ServiceConfig,
    pub matching: ServiceConfig,
}

impl CheckerConfig {
    /// Settings for one service kind.
    pub fn service(&self, kind: ServiceKind) -> &ServiceConfig {
        match kind {
            ServiceKind::Frontend => &self.frontend,
            ServiceKind::History => &self.history,
            ServiceKind::Matching => &self.matching,
        }
    }

    /// Kinds with `enabled = true`, in probe order.
    pub fn enabled_services(&self) -> impl Iterator<Item = ServiceKind> + '_ {
        ServiceKind::ALL
            .into_iter()
            .filter(move |kind| self.service(*kind).enabled)
    }
}

/// Settings for a single backend service.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct ServiceConfig {
    /// Probe this service.
    pub enabled: bool,

    /// gRPC address (e.g., "localhost:7233"). `http://` is assumed when no
    /// scheme is given.
    pub address: String,

    /// Per-call deadline in seconds. Non-positive values clamp to zero.
    pub timeout_secs: i64,
}

impl ServiceConfig {
    /// Convenience constructor for an enabled service.
    pub fn enabled(address: impl Into<String>, timeout_secs: i64) -> Self {
        Self {
            enabled: true,
            address: address.into(),
            timeout_secs,
        }
    }

    /// Configured deadline, clamped at zero.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(0) as u64)
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            address: String::new(),
            timeout_secs: 5,
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level or filter directive (trace, debug, info, warn, error).
    pub log_level: String,

    /// Human-readable or JSON log lines.
    pub log_format: LogFormat,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
        }
    }
}
