//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the gate.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the staging access gate.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct GateConfig {
    /// Access restriction settings.
    pub access: AccessConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Access restriction configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AccessConfig {
    /// Enable the IP restriction gate.
    pub enabled: bool,

    /// Allow-list text: one entry per line. An entry is an exact address
    /// (v4 or v6), a CIDR block (e.g. "192.168.1.0/24"), or an inclusive
    /// IPv4 range (e.g. "192.168.1.1-192.168.1.10"). Loopback is always
    /// allowed and need not be listed.
    pub allowed_ips: String,
}

impl Default for AccessConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            allowed_ips: String::new(),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}
