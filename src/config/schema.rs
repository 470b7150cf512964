//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from a TOML file.
//! Every field has a default so an empty file is a valid config.

use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

/// Drain timeouts never go below this, so a zero delay still drains.
const MIN_DRAIN_TIMEOUT: Duration = Duration::from_secs(1);

/// Root configuration for the server.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ServerConfig {
    /// Listener configuration (bind address, body limit).
    pub listener: ListenerConfig,

    /// Artificial response delay.
    pub delay: DelayConfig,

    /// Graceful shutdown settings.
    pub shutdown: ShutdownConfig,

    /// Accepted shutdown credentials.
    pub credentials: CredentialsConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl ServerConfig {
    /// Delay applied to every response.
    pub fn response_delay(&self) -> Duration {
        Duration::from_millis(self.delay.response_ms)
    }

    /// Upper bound on the drain: `timeout_multiplier` × response delay.
    pub fn drain_timeout(&self) -> Duration {
        self.response_delay()
            .saturating_mul(self.shutdown.timeout_multiplier)
            .max(MIN_DRAIN_TIMEOUT)
    }
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,

    /// Maximum accepted request body, in bytes.
    pub max_body_bytes: usize,
}

impl ListenerConfig {
    /// Default bind address for a port.
    pub fn address_for_port(port: u16) -> String {
        format!("0.0.0.0:{}", port)
    }
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: Self::address_for_port(8080),
            max_body_bytes: 64 * 1024,
        }
    }
}

/// Artificial delay configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DelayConfig {
    /// Delay before every response completes, in milliseconds.
    pub response_ms: u64,
}

impl Default for DelayConfig {
    fn default() -> Self {
        Self { response_ms: 5000 }
    }
}

/// Graceful shutdown configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ShutdownConfig {
    /// Drain timeout as a multiple of the response delay.
    pub timeout_multiplier: u32,
}

impl Default for ShutdownConfig {
    fn default() -> Self {
        Self {
            timeout_multiplier: 3,
        }
    }
}

/// Credential file location.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CredentialsConfig {
    /// Newline-delimited file of accepted digests.
    pub path: PathBuf,
}

impl Default for CredentialsConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("./etc/shadow"),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error) or a full filter directive.
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.listener.bind_address, "0.0.0.0:8080");
        assert_eq!(config.response_delay(), Duration::from_secs(5));
        assert_eq!(config.drain_timeout(), Duration::from_secs(15));
        assert_eq!(config.credentials.path, PathBuf::from("./etc/shadow"));
    }

    #[test]
    fn zero_delay_keeps_a_drain_floor() {
        let mut config = ServerConfig::default();
        config.delay.response_ms = 0;
        assert_eq!(config.drain_timeout(), MIN_DRAIN_TIMEOUT);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let config: ServerConfig = toml::from_str(
            r#"
            [delay]
            response_ms = 200

            [credentials]
            path = "/etc/cryptserver/shadow"
            "#,
        )
        .unwrap();

        assert_eq!(config.response_delay(), Duration::from_millis(200));
        assert_eq!(config.drain_timeout(), Duration::from_secs(1));
        assert_eq!(config.credentials.path, PathBuf::from("/etc/cryptserver/shadow"));
        assert_eq!(config.listener.bind_address, "0.0.0.0:8080");
    }
}
