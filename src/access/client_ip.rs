//! Client address resolution.
//!
//! # Responsibilities
//! - Pick the address the gate should judge from the transport-level
//!   sources the host hands over
//! - Apply the proxy trust policy before believing any forwarded header
//!
//! # Design Decisions
//! - The direct peer address wins whenever it is publicly routable;
//!   forwarded headers are client-controlled and trivially spoofed
//! - A private/reserved peer is treated as a proxy position, and only then
//!   are X-Forwarded-For / X-Real-IP style values consulted
//! - A forwarded chain yields its first entry (the original client)
//! - Anything that is not a well-formed IP literal is rejected

use std::net::IpAddr;

/// Transport-level inputs for resolving the client address.
///
/// The host fills these from whatever its request layer exposes: the
/// socket peer address and the forwarded-for / real-ip header values,
/// when present.
#[derive(Debug, Clone, Copy, Default)]
pub struct AddressSources<'a> {
    /// Connection-level peer address.
    pub remote_addr: Option<&'a str>,

    /// Forwarded-for style header value, possibly a comma-separated chain.
    pub forwarded_for: Option<&'a str>,

    /// Real-ip style header value.
    pub real_ip: Option<&'a str>,
}

/// Resolve the client address to feed the allow-list matcher.
///
/// Returns `None` when no trustworthy, well-formed address can be
/// established; the host should treat that as a denied candidate.
pub fn resolve_client_address(sources: &AddressSources<'_>) -> Option<String> {
    let remote = sources.remote_addr?.trim();
    let remote_ip: IpAddr = remote.parse().ok()?;

    // A public peer speaks for itself.
    if !is_private_or_reserved(remote_ip) {
        return Some(remote.to_string());
    }

    // Private peer: a proxy position, so forwarded headers may be trusted.
    if let Some(chain) = sources.forwarded_for {
        if let Some(first) = chain.split(',').next() {
            let first = first.trim();
            if first.parse::<IpAddr>().is_ok() {
                return Some(first.to_string());
            }
        }
    }

    if let Some(real) = sources.real_ip {
        let real = real.trim();
        if real.parse::<IpAddr>().is_ok() {
            return Some(real.to_string());
        }
    }

    // No usable header; the peer itself is still a valid candidate.
    Some(remote.to_string())
}

/// Whether an address sits in a private or reserved range.
///
/// IPv4: RFC 1918, loopback, link-local, unspecified, and 240.0.0.0/4.
/// IPv6: loopback, unspecified, unique-local (fc00::/7), link-local
/// (fe80::/10).
pub fn is_private_or_reserved(ip: IpAddr) -> bool {
    match ip {
        IpAddr::V4(v4) => {
            v4.is_private()
                || v4.is_loopback()
                || v4.is_link_local()
                || v4.is_unspecified()
                || v4.octets()[0] >= 240
        }
        IpAddr::V6(v6) => {
            v6.is_loopback()
                || v6.is_unspecified()
                || (v6.segments()[0] & 0xfe00) == 0xfc00
                || (v6.segments()[0] & 0xffc0) == 0xfe80
        }
    }
}
