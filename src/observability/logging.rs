//! Structured logging setup.
//!
//! # Responsibilities
//! - Initialize the tracing subscriber for hosts and tests
//! - Honor RUST_LOG over the configured level

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize logging at the given level.
///
/// The environment filter takes precedence when set. Repeated calls are
/// no-ops, so tests can call this freely.
pub fn init_logging(level: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("stagegate={level}").into());

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}
