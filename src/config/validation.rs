//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Lint every allow-list line as exact address / CIDR / range
//! - Validate the configured log level
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Validation is a pure function: GateConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system; the matcher itself
//!   stays lenient so a typo that got past here still cannot crash or
//!   accidentally grant access

use thiserror::Error;

use crate::access::allow_list::AllowRule;
use crate::config::schema::GateConfig;

/// A single semantic problem in a configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// An allow-list line is not a parseable entry.
    #[error("allowed_ips line {line}: {reason}")]
    BadAllowListEntry { line: usize, reason: String },

    /// The configured log level is not one tracing understands.
    #[error("unknown log level '{0}'")]
    UnknownLogLevel(String),
}

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Check a configuration for semantic problems, collecting every error.
pub fn validate_config(config: &GateConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    for (idx, line) in config.access.allowed_ips.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if let Err(err) = AllowRule::parse(line) {
            errors.push(ValidationError::BadAllowListEntry {
                line: idx + 1,
                reason: err.to_string(),
            });
        }
    }

    if !LOG_LEVELS.contains(&config.observability.log_level.as_str()) {
        errors.push(ValidationError::UnknownLogLevel(
            config.observability.log_level.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(validate_config(&GateConfig::default()).is_ok());
    }

    #[test]
    fn accepts_well_formed_entries() {
        let mut config = GateConfig::default();
        config.access.allowed_ips =
            "203.0.113.7\n192.168.1.0/24\n2001:db8::/32\n10.0.0.1-10.0.0.9\n\n".to_string();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn flags_each_bad_line_with_its_number() {
        let mut config = GateConfig::default();
        config.access.allowed_ips = "not-an-ip\n10.0.0.1\n10.0.0.0/99".to_string();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(matches!(
            errors[0],
            ValidationError::BadAllowListEntry { line: 1, .. }
        ));
        assert!(matches!(
            errors[1],
            ValidationError::BadAllowListEntry { line: 3, .. }
        ));
    }

    #[test]
    fn flags_unknown_log_level() {
        let mut config = GateConfig::default();
        config.observability.log_level = "verbose".to_string();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![ValidationError::UnknownLogLevel("verbose".to_string())]
        );
    }
}
