//! Configuration loading and management.
//!
//! A single TOML file with one recognized setting, the listen address. A
//! missing file yields defaults so the relay runs with no configuration at
//! all; the `PORT` environment variable overrides the configured port.

use std::net::SocketAddr;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid PORT override: {0}")]
    Port(#[from] std::num::ParseIntError),
}

/// Server configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Server settings.
    #[serde(default)]
    pub server: ServerConfig,
}

/// Listener settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Address to listen on (default: `0.0.0.0:3000`).
    #[serde(default = "default_listen")]
    pub listen: SocketAddr,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: default_listen(),
        }
    }
}

fn default_listen() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 3000))
}

impl Config {
    /// Load configuration from a TOML file; a missing file yields defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Effective listen address, with the `PORT` environment variable
    /// overriding the configured port.
    pub fn listen_addr(&self) -> Result<SocketAddr, ConfigError> {
        let mut addr = self.server.listen;
        if let Ok(port) = std::env::var("PORT") {
            addr.set_port(port.parse()?);
        }
        Ok(addr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_unconfigured() {
        let config = Config::default();
        assert_eq!(config.server.listen, "0.0.0.0:3000".parse().unwrap());
    }

    #[test]
    fn parses_listen_address() {
        let config: Config = toml::from_str(
            r#"
            [server]
            listen = "127.0.0.1:9100"
            "#,
        )
        .expect("valid config");
        assert_eq!(config.server.listen, "127.0.0.1:9100".parse().unwrap());
    }

    #[test]
    fn missing_file_yields_defaults() {
        let config = Config::load("/nonexistent/lectern.toml").expect("defaults");
        assert_eq!(config.server.listen.port(), 3000);
    }
}
