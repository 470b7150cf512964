//! Command-line interface.
//!
//! Flags override the config file, the config file overrides defaults.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::config::{load_config, validate_config, ConfigError, ListenerConfig, ServerConfig};

#[derive(Debug, Parser)]
#[command(name = "cryptserver")]
#[command(about = "Password digest service with authenticated graceful shutdown", long_about = None)]
pub struct Cli {
    /// Port number for server connections, 0 for any free port [default: 8080]
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Delay applied to every response, e.g. "5s", "250ms" [default: 5s]
    #[arg(short, long, value_parser = parse_duration)]
    pub delay: Option<Duration>,

    /// File of digests accepted by /shutdown [default: ./etc/shadow]
    #[arg(long)]
    pub credentials: Option<PathBuf>,

    /// Optional TOML config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Log level or filter directive [default: info]
    #[arg(long)]
    pub log_level: Option<String>,
}

impl Cli {
    /// Build the effective config: defaults, then the file, then flags.
    pub fn resolve(self) -> Result<ServerConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => ServerConfig::default(),
        };

        if let Some(port) = self.port {
            config.listener.bind_address = ListenerConfig::address_for_port(port);
        }
        if let Some(delay) = self.delay {
            config.delay.response_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
        }
        if let Some(path) = self.credentials {
            config.credentials.path = path;
        }
        if let Some(level) = self.log_level {
            config.observability.log_level = level;
        }

        validate_config(&config).map_err(ConfigError::Validation)?;
        Ok(config)
    }
}

/// Parse a duration with a unit suffix: `ms`, `s`, `m` or `h`.
/// Fractions are allowed ("1.5s"); a bare number is rejected.
pub fn parse_duration(input: &str) -> Result<Duration, String> {
    let input = input.trim();
    let split = input
        .find(|c: char| !(c.is_ascii_digit() || c == '.'))
        .ok_or_else(|| format!("missing unit in {:?} (use ms, s, m or h)", input))?;
    let (value, unit) = input.split_at(split);

    let value: f64 = value
        .parse()
        .map_err(|_| format!("invalid number in {:?}", input))?;
    let seconds = match unit {
        "ms" => value / 1000.0,
        "s" => value,
        "m" => value * 60.0,
        "h" => value * 3600.0,
        _ => return Err(format!("unknown unit {:?} in {:?}", unit, input)),
    };

    Duration::try_from_secs_f64(seconds).map_err(|e| format!("{:?}: {}", input, e))
}
