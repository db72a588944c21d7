//! Resilience primitives.
//!
//! # Design Decisions
//! - Deadlines only; the checker never retries or backs off
//! - Repeated probing is the caller's job (re-run the process)

pub mod timeouts;

pub use timeouts::with_deadline;
