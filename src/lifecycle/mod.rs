//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Connect → BasicCheck → FullCheck → RunOutcome (exit code)
//!
//! Shutdown (shutdown.rs):
//!     Scoped use of the Checker → close every channel on every path
//! ```
//!
//! # Design Decisions
//! - One pass per process; scheduling is left to the caller
//! - FullCheck only runs once BasicCheck passed
//! - Channels are closed before the outcome is returned

pub mod shutdown;
pub mod startup;

pub use shutdown::with_checker;
pub use startup::{run_checks, RunOutcome};
