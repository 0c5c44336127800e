//! Server settings read from the environment: HOST, PORT, INACTIVITY_HOURS.

use std::time::Duration;

/// Listen address and in-memory cleanup threshold.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Tournaments untouched for this long are dropped.
    pub inactivity_timeout: Duration,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. Missing or unparsable values fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let host = lookup("HOST").unwrap_or_else(default_host);
        let port = lookup("PORT")
            .and_then(|p| p.parse().ok())
            .unwrap_or_else(default_port);
        let hours: u64 = lookup("INACTIVITY_HOURS")
            .and_then(|h| h.parse().ok())
            .unwrap_or_else(default_inactivity_hours);
        Self {
            host,
            port,
            inactivity_timeout: Duration::from_secs(hours.saturating_mul(3600)),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_inactivity_hours() -> u64 {
    12
}
