//! Check failure taxonomy and the error aggregator.
//!
//! # Design Decisions
//! - Independent probes never short-circuit each other; each failure is
//!   appended to an [`ErrorList`]
//! - An empty list converts to `Ok(())` at every boundary via
//!   [`ErrorList::into_result`], so "no error" has exactly one representation
//! - Human formatting lives in [`ErrorList::report`], the list itself stays typed

use std::fmt;

use thiserror::Error;

use crate::config::ServiceKind;

/// Prefix applied to every entry of a rendered report.
pub const REPORT_PREFIX: &str = "Health check failed: ";

/// Consistency sub-check that produced a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckStep {
    InitializeClients,
    ClusterInfo,
    SystemInfo,
    Namespaces,
    PeerClusters,
}

impl fmt::Display for CheckStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CheckStep::InitializeClients => "failed to initialize full check clients",
            CheckStep::ClusterInfo => "failed to check cluster info",
            CheckStep::SystemInfo => "failed to check system info",
            CheckStep::Namespaces => "failed to check namespaces",
            CheckStep::PeerClusters => "failed to check clusters",
        };
        f.write_str(s)
    }
}

/// A single check failure.
#[derive(Debug, Error)]
pub enum CheckError {
    /// An enabled service has no address.
    #[error("{service} service address is empty")]
    Configuration { service: ServiceKind },

    /// The channel to a service could not be set up.
    #[error("failed to connect to {service} service at '{address}': {reason}")]
    Connection {
        service: ServiceKind,
        address: String,
        reason: String,
    },

    /// The RPC itself failed (transport error, deadline, server error).
    #[error("failed to {operation}: {:?}: {}", .status.code(), .status.message())]
    Probe {
        operation: String,
        status: tonic::Status,
    },

    /// Health RPC succeeded but the service is not serving.
    #[error("health check of {service} failed with status {status}")]
    Unhealthy { service: String, status: String },

    /// Returned data violates an expected invariant.
    #[error("{0}")]
    Validation(String),

    /// Client handles for the consistency checks could not be created.
    #[error("{0}")]
    Initialization(String),

    /// A peer cluster reports its replication connection disabled.
    #[error("cluster {index} is not connected")]
    Replication { index: usize, cluster_name: String },

    /// A failure raised inside a consistency sub-check.
    #[error("{step}: {source}")]
    Step {
        step: CheckStep,
        #[source]
        source: Box<CheckError>,
    },
}

impl CheckError {
    pub(crate) fn probe(operation: impl Into<String>, status: tonic::Status) -> Self {
        CheckError::Probe {
            operation: operation.into(),
            status,
        }
    }

    /// Wrap in the prefix of a consistency sub-check.
    pub fn in_step(self, step: CheckStep) -> Self {
        CheckError::Step {
            step,
            source: Box::new(self),
        }
    }

    /// The underlying failure with any step context peeled off.
    pub fn root(&self) -> &CheckError {
        match self {
            CheckError::Step { source, .. } => source.root(),
            other => other,
        }
    }

    /// Sub-check that produced this failure, if any.
    pub fn step(&self) -> Option<CheckStep> {
        match self {
            CheckError::Step { step, .. } => Some(*step),
            _ => None,
        }
    }
}

/// Ordered, append-only collection of failures from one check pass.
#[derive(Debug, Default)]
pub struct ErrorList {
    errors: Vec<CheckError>,
}

impl ErrorList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, error: CheckError) {
        self.errors.push(error);
    }

    /// Append the error of a failed result; `Ok` contributes nothing.
    pub fn record<T>(&mut self, result: Result<T, CheckError>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(e) => {
                self.push(e);
                None
            }
        }
    }

    /// Append every entry of `other`, each tagged with `step`.
    pub fn extend_in_step(&mut self, step: CheckStep, other: ErrorList) {
        self.errors
            .extend(other.errors.into_iter().map(|e| e.in_step(step)));
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CheckError> {
        self.errors.iter()
    }

    /// `Ok(())` when nothing was recorded, otherwise the list itself.
    pub fn into_result(self) -> Result<(), ErrorList> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }

    /// Human-readable rendering: one prefixed line per failure.
    pub fn report(&self) -> String {
        self.errors
            .iter()
            .map(|e| format!("{}{}", REPORT_PREFIX, e))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl From<CheckError> for ErrorList {
    fn from(error: CheckError) -> Self {
        Self {
            errors: vec![error],
        }
    }
}

impl IntoIterator for ErrorList {
    type Item = CheckError;
    type IntoIter = std::vec::IntoIter<CheckError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

impl<'a> IntoIterator for &'a ErrorList {
    type Item = &'a CheckError;
    type IntoIter = std::slice::Iter<'a, CheckError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

impl fmt::Display for ErrorList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.errors.len() {
            0 => write!(f, "no errors"),
            1 => write!(f, "{}", self.errors[0]),
            n => {
                write!(f, "{} errors occurred:", n)?;
                for err in &self.errors {
                    write!(f, "\n\t* {}", err)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ErrorList {}
