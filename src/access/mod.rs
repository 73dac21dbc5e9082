//! Access control subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request (host side):
//!     → client_ip.rs (resolve trusted client address)
//!     → allow_list.rs (parse configured entries, test membership)
//!     → host acts on the boolean (deny with 403, or pass through)
//! ```
//!
//! # Design Decisions
//! - Pure functions: configuration text and candidate in, decision out
//! - Fail closed: anything unparseable is a non-match, never a grant
//! - Loopback can never be locked out
//! - No trust in client-controlled headers unless the peer is a proxy

pub mod allow_list;
pub mod client_ip;
