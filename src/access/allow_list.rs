//! Allow-list parsing and membership matching.
//!
//! # Responsibilities
//! - Parse newline-separated allow-list text into rules
//! - Classify tokens as exact address, CIDR block, or IPv4 range
//! - Answer membership queries for candidate addresses
//!
//! # Design Decisions
//! - Loopback (127.0.0.1, ::1) always precedes configured entries, so the
//!   gate can never lock out local callers
//! - Malformed lines are skipped with a warning, never a hard failure
//! - Exact rules compare literal text; CIDR and range rules compare
//!   numerically, so only those paths are normalization-independent
//! - Rules are a boolean OR: first match wins, but order carries no
//!   priority semantics

use std::net::{IpAddr, Ipv4Addr};

use thiserror::Error;

/// Entries consulted ahead of any configured rule.
const DEFAULT_ALLOWED: [&str; 2] = ["127.0.0.1", "::1"];

/// Why a single allow-list token failed to parse.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RuleParseError {
    /// Token (or a component of it) is not a well-formed IP literal.
    #[error("invalid address '{0}'")]
    InvalidAddress(String),

    /// CIDR prefix length is not a number.
    #[error("invalid prefix length '{0}'")]
    InvalidPrefix(String),

    /// CIDR prefix length exceeds the address family's bit width.
    #[error("prefix length {prefix_len} out of range (max {max})")]
    PrefixOutOfRange { prefix_len: u8, max: u8 },

    /// Range bounds must both be IPv4; ranges are IPv4-only.
    #[error("range bounds must be IPv4 addresses")]
    NonIpv4Range,
}

/// A single parsed allow-list entry.
///
/// Classification is by token shape: a `/` makes it a CIDR block, otherwise
/// a `-` makes it an IPv4 range, otherwise it is an exact address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllowRule {
    /// A literal address, matched by trimmed string equality.
    Exact(String),

    /// A CIDR block: candidate matches when its top `prefix_len` bits
    /// equal the subnet's.
    Cidr { subnet: IpAddr, prefix_len: u8 },

    /// An inclusive IPv4 range. Reversed bounds are legal and simply
    /// never match.
    Range { start: Ipv4Addr, end: Ipv4Addr },
}

impl AllowRule {
    /// Parse a single trimmed token into a rule.
    pub fn parse(token: &str) -> Result<AllowRule, RuleParseError> {
        if let Some((subnet, prefix)) = token.split_once('/') {
            let subnet: IpAddr = subnet
                .trim()
                .parse()
                .map_err(|_| RuleParseError::InvalidAddress(subnet.trim().to_string()))?;

            let prefix = prefix.trim();
            let prefix_len: u8 = prefix
                .parse()
                .map_err(|_| RuleParseError::InvalidPrefix(prefix.to_string()))?;

            let max = if subnet.is_ipv4() { 32 } else { 128 };
            if prefix_len > max {
                return Err(RuleParseError::PrefixOutOfRange { prefix_len, max });
            }

            Ok(AllowRule::Cidr { subnet, prefix_len })
        } else if let Some((start, end)) = token.split_once('-') {
            let start: IpAddr = start
                .trim()
                .parse()
                .map_err(|_| RuleParseError::InvalidAddress(start.trim().to_string()))?;
            let end: IpAddr = end
                .trim()
                .parse()
                .map_err(|_| RuleParseError::InvalidAddress(end.trim().to_string()))?;

            match (start, end) {
                (IpAddr::V4(start), IpAddr::V4(end)) => Ok(AllowRule::Range { start, end }),
                _ => Err(RuleParseError::NonIpv4Range),
            }
        } else {
            // Exact entries are validated as literals so typos surface at
            // config-validation time, but the original text is what gets
            // compared at match time.
            token
                .parse::<IpAddr>()
                .map_err(|_| RuleParseError::InvalidAddress(token.to_string()))?;
            Ok(AllowRule::Exact(token.to_string()))
        }
    }

    /// Test whether a candidate matches this rule.
    ///
    /// `candidate_text` is the trimmed literal form (for the exact path);
    /// `candidate` is its parsed value (for the numeric paths).
    pub fn matches(&self, candidate_text: &str, candidate: IpAddr) -> bool {
        match self {
            AllowRule::Exact(entry) => entry == candidate_text,
            AllowRule::Cidr { subnet, prefix_len } => {
                cidr_contains(*subnet, *prefix_len, candidate)
            }
            AllowRule::Range { start, end } => match candidate {
                IpAddr::V4(candidate) => {
                    let ip = u32::from(candidate);
                    u32::from(*start) <= ip && ip <= u32::from(*end)
                }
                // Ranges are IPv4-only.
                IpAddr::V6(_) => false,
            },
        }
    }
}

/// Compare the top `prefix_len` bits of candidate and subnet.
/// A family mismatch is a non-match, not an error.
fn cidr_contains(subnet: IpAddr, prefix_len: u8, candidate: IpAddr) -> bool {
    match (subnet, candidate) {
        (IpAddr::V4(net), IpAddr::V4(ip)) => {
            let mask = if prefix_len == 0 {
                0
            } else {
                u32::MAX << (32 - prefix_len)
            };
            (u32::from(ip) & mask) == (u32::from(net) & mask)
        }
        (IpAddr::V6(net), IpAddr::V6(ip)) => {
            let mask = if prefix_len == 0 {
                0
            } else {
                u128::MAX << (128 - prefix_len)
            };
            (u128::from(ip) & mask) == (u128::from(net) & mask)
        }
        _ => false,
    }
}

/// An ordered set of allow rules, built fresh from raw text per evaluation.
#[derive(Debug, Clone)]
pub struct AllowList {
    rules: Vec<AllowRule>,
}

impl AllowList {
    /// Parse newline-separated allow-list text.
    ///
    /// Lines are trimmed, blank lines dropped, and the loopback defaults
    /// prepended. Malformed lines are skipped with a warning so one typo
    /// never disables the rest of the list.
    pub fn parse(raw: &str) -> Self {
        let mut rules: Vec<AllowRule> = DEFAULT_ALLOWED
            .iter()
            .map(|entry| AllowRule::Exact((*entry).to_string()))
            .collect();

        for line in raw.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            match AllowRule::parse(line) {
                Ok(rule) => rules.push(rule),
                Err(error) => {
                    tracing::warn!(entry = %line, %error, "Skipping malformed allow-list entry");
                }
            }
        }

        Self { rules }
    }

    /// Test whether a candidate address is permitted.
    ///
    /// An unparseable candidate is denied outright; nothing short of a
    /// well-formed IP literal can match.
    pub fn permits(&self, candidate: &str) -> bool {
        let candidate = candidate.trim();
        let Ok(addr) = candidate.parse::<IpAddr>() else {
            tracing::debug!(candidate = %candidate, "Rejecting unparseable candidate address");
            return false;
        };

        self.rules.iter().any(|rule| rule.matches(candidate, addr))
    }
}

/// Decide whether `candidate` is permitted by `raw_allow_list`.
///
/// Stateless: the list is parsed fresh on every call, so concurrent callers
/// share nothing.
pub fn is_allowed(candidate: &str, raw_allow_list: &str) -> bool {
    AllowList::parse(raw_allow_list).permits(candidate)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loopback_always_allowed() {
        assert!(is_allowed("127.0.0.1", ""));
        assert!(is_allowed("::1", ""));
        // Only the literal loopback addresses are implicit
        assert!(!is_allowed("127.0.0.2", ""));
    }

    #[test]
    fn exact_match_is_literal() {
        assert!(is_allowed("203.0.113.7", "203.0.113.7"));
        assert!(!is_allowed("203.0.113.8", "203.0.113.7"));
        // No zero-compression normalization on the exact path
        assert!(!is_allowed("0:0:0:0:0:0:0:2", "::2"));
    }

    #[test]
    fn cidr_v4_containment() {
        assert!(is_allowed("192.168.1.5", "192.168.1.0/24"));
        assert!(!is_allowed("192.168.2.5", "192.168.1.0/24"));
    }

    #[test]
    fn cidr_v4_boundaries() {
        assert!(is_allowed("192.168.1.0", "192.168.1.0/32"));
        assert!(!is_allowed("192.168.1.1", "192.168.1.0/32"));
        assert!(is_allowed("8.8.8.8", "0.0.0.0/0"));
        assert!(is_allowed("255.255.255.255", "0.0.0.0/0"));
    }

    #[test]
    fn cidr_v6_containment() {
        assert!(is_allowed("2001:db8::5", "2001:db8::/32"));
        assert!(!is_allowed("2001:db9::5", "2001:db8::/32"));
        assert!(is_allowed("2001:db8::5", "::/0"));
    }

    #[test]
    fn cidr_family_mismatch_is_non_match() {
        assert!(!is_allowed("2001:db8::5", "192.168.1.0/24"));
        assert!(!is_allowed("192.168.1.5", "2001:db8::/32"));
    }

    #[test]
    fn range_containment_is_inclusive() {
        let list = "192.168.1.1-192.168.1.10";
        assert!(is_allowed("192.168.1.1", list));
        assert!(is_allowed("192.168.1.5", list));
        assert!(is_allowed("192.168.1.10", list));
        assert!(!is_allowed("192.168.1.11", list));
        assert!(!is_allowed("192.168.0.255", list));
    }

    #[test]
    fn range_is_ipv4_only() {
        assert!(!is_allowed("2001:db8::2", "2001:db8::1-2001:db8::10"));
        // ::1 still passes, via the implicit default rather than the range
        assert!(is_allowed("::1", "2001:db8::1-2001:db8::10"));
    }

    #[test]
    fn reversed_range_never_matches() {
        assert!(!is_allowed("192.168.1.5", "192.168.1.10-192.168.1.1"));
    }

    #[test]
    fn malformed_entries_are_skipped() {
        assert!(is_allowed("10.0.0.1", "not-an-ip\n10.0.0.1"));
        assert!(is_allowed("10.0.0.1", "10.0.0.0/33\n300.1.2.3\n10.0.0.1"));
        assert!(!is_allowed("10.0.0.2", "not-an-ip\n10.0.0.1"));
    }

    #[test]
    fn blank_lines_and_whitespace_ignored() {
        assert!(is_allowed("10.0.0.1", "\n   \n  10.0.0.1  \n\n"));
    }

    #[test]
    fn invalid_candidate_is_denied() {
        assert!(!is_allowed("not-an-address", "0.0.0.0/0"));
        assert!(!is_allowed("", "0.0.0.0/0"));
        assert!(!is_allowed("192.168.1", "0.0.0.0/0"));
    }

    #[test]
    fn rule_classification_by_token_shape() {
        assert!(matches!(
            AllowRule::parse("10.0.0.1"),
            Ok(AllowRule::Exact(_))
        ));
        assert!(matches!(
            AllowRule::parse("10.0.0.0/8"),
            Ok(AllowRule::Cidr { .. })
        ));
        assert!(matches!(
            AllowRule::parse("10.0.0.1 - 10.0.0.9"),
            Ok(AllowRule::Range { .. })
        ));
    }

    #[test]
    fn rule_parse_rejects_bad_tokens() {
        assert_eq!(
            AllowRule::parse("10.0.0.0/33"),
            Err(RuleParseError::PrefixOutOfRange {
                prefix_len: 33,
                max: 32
            })
        );
        assert_eq!(
            AllowRule::parse("2001:db8::/129"),
            Err(RuleParseError::PrefixOutOfRange {
                prefix_len: 129,
                max: 128
            })
        );
        assert!(matches!(
            AllowRule::parse("10.0.0.0/abc"),
            Err(RuleParseError::InvalidPrefix(_))
        ));
        assert!(matches!(
            AllowRule::parse("example.com"),
            Err(RuleParseError::InvalidAddress(_))
        ));
        assert_eq!(
            AllowRule::parse("2001:db8::1-2001:db8::10"),
            Err(RuleParseError::NonIpv4Range)
        );
    }

    #[test]
    fn evaluation_is_idempotent() {
        let list = "192.168.1.0/24\n10.0.0.1";
        for _ in 0..3 {
            assert!(is_allowed("192.168.1.5", list));
            assert!(!is_allowed("10.0.0.2", list));
        }
    }
}
