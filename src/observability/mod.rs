//! Observability subsystem.
//!
//! # Design Decisions
//! - Structured logging via the tracing crate
//! - The library only emits events (skipped entries, decisions); the host
//!   or test harness owns subscriber initialization

pub mod logging;
