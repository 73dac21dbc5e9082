//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → GateConfig (validated, immutable)
//!     → handed to the access subsystem as plain text/flags
//!
//! Evaluation stays lenient: a malformed allow-list line that slips past
//! validation is skipped at match time, never a runtime failure.
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require a reload by the host
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks
//! - Strict at load, lenient at evaluation: an operator typo is surfaced
//!   when the config is saved, not by crashing request handling

pub mod loader;
pub mod schema;
pub mod validation;

pub use schema::AccessConfig;
pub use schema::GateConfig;
pub use schema::ObservabilityConfig;
