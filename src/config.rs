//! Configuration loading.
//!
//! Loaded from a TOML file whose path is the binary's first argument.
//! Every field has a default, so a missing section (or no config file at
//! all) yields a server listening on `0.0.0.0:3000`.

use serde::Deserialize;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::Path;
use thiserror::Error;

/// Default listen port.
pub const DEFAULT_PORT: u16 = 3000;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Server configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Server identity.
    #[serde(default)]
    pub server: ServerConfig,
    /// Network listen configuration.
    #[serde(default)]
    pub listen: ListenConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}

/// Server identity configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Server name used in startup logs.
    #[serde(default = "default_server_name")]
    pub name: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            name: default_server_name(),
        }
    }
}

/// Network listener configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ListenConfig {
    /// Address to bind to (e.g., "0.0.0.0:3000").
    #[serde(default = "default_listen_address")]
    pub address: SocketAddr,
}

impl Default for ListenConfig {
    fn default() -> Self {
        Self {
            address: default_listen_address(),
        }
    }
}

fn default_server_name() -> String {
    "relayd".to_string()
}

fn default_listen_address() -> SocketAddr {
    SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), DEFAULT_PORT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_listen_on_port_3000() {
        let config = Config::default();
        assert_eq!(config.listen.address.port(), DEFAULT_PORT);
        assert_eq!(config.server.name, "relayd");
    }

    #[test]
    fn empty_toml_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.listen.address.port(), DEFAULT_PORT);
    }

    #[test]
    fn listen_address_overrides_default() {
        let config: Config = toml::from_str(
            r#"
            [listen]
            address = "127.0.0.1:4040"
            "#,
        )
        .unwrap();
        assert_eq!(config.listen.address.port(), 4040);
        assert!(config.listen.address.ip().is_loopback());
    }

    #[test]
    fn load_reads_a_config_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[server]\nname = \"testrelay\"").unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.server.name, "testrelay");
        assert_eq!(config.listen.address.port(), DEFAULT_PORT);
    }

    #[test]
    fn load_reports_missing_file() {
        let err = Config::load("/nonexistent/relayd.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
