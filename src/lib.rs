//! Staging Access Gate Library
//!
//! Decides whether a client address may reach a staging deployment. The
//! host (whatever intercepts requests) resolves the client address through
//! the trust policy in [`access::client_ip`], asks [`access::allow_list`]
//! for a verdict, and acts on the boolean.
//!
//! ```text
//! peer address + forwarded headers
//!     → access::client_ip (resolve trusted client address)
//!     → access::allow_list (parse entries, test membership)
//!     → bool (host denies with 403, or lets the request through)
//! ```
//!
//! Configuration lives in [`config`]: a TOML schema holding the gate
//! toggle and the raw allow-list text, validated on load.

// Core subsystems
pub mod access;
pub mod config;

// Cross-cutting concerns
pub mod observability;

pub use access::allow_list::{is_allowed, AllowList, AllowRule};
pub use access::client_ip::{resolve_client_address, AddressSources};
pub use config::GateConfig;
