//! Health checking subsystem.
//!
//! # Data Flow
//! ```text
//! Checker::connect (checker.rs):
//!     Validate config → dial every enabled service → ConnectionSet
//!
//! basic_check (liveness.rs):
//!     For each enabled service
//!     → grpc.health.v1 Check with the service's timeout
//!     → SERVING or a ProbeError / UnhealthyError
//!
//! full_check (consistency.rs), frontend only:
//!     Initialize clients → cluster info → system info
//!     → namespaces → peer clusters
//!
//! Every failure → ErrorList (error.rs)
//! ```
//!
//! # Design Decisions
//! - Probes collect failures instead of stopping at the first one; the
//!   peer-cluster walk is the single exception
//! - One lock serializes both check tiers
//! - Snapshots (snapshot.rs) are logged, never stored

pub mod checker;
pub mod consistency;
pub mod error;
pub mod liveness;
pub mod snapshot;

#[cfg(test)]
pub(crate) mod fake;

pub use checker::Checker;
pub use error::{CheckError, CheckStep, ErrorList};
