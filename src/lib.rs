//! Health checker for Temporal clusters.

pub mod check;
pub mod config;
pub mod lifecycle;
pub mod observability;
pub mod proto;
pub mod resilience;
pub mod transport;

pub use check::{CheckError, Checker, ErrorList};
pub use config::{CheckerConfig, ServiceConfig, ServiceKind};
pub use lifecycle::run_checks;
