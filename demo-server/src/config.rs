//! Listener configuration read from the environment.
//!
//! `HOST` and `PORT` default to `127.0.0.1` and `3000`. The port also feeds
//! the example URLs embedded in usage payloads, so the hints a client sees
//! point back at the server that produced them.

use std::net::{AddrParseError, IpAddr, Ipv4Addr, SocketAddr};
use std::num::ParseIntError;

pub const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid PORT value {value:?}")]
    InvalidPort {
        value: String,
        #[source]
        source: ParseIntError,
    },

    #[error("invalid HOST value {value:?}")]
    InvalidHost {
        value: String,
        #[source]
        source: AddrParseError,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: DEFAULT_PORT,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup. Unset keys keep their
    /// defaults; set-but-unparsable keys are errors.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(value) = lookup("HOST") {
            config.host = value
                .trim()
                .parse()
                .map_err(|source| ConfigError::InvalidHost { value, source })?;
        }
        if let Some(value) = lookup("PORT") {
            config.port = value
                .trim()
                .parse()
                .map_err(|source| ConfigError::InvalidPort { value, source })?;
        }
        Ok(config)
    }

    pub fn bind_address(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Base URL quoted in usage hints and example curl commands.
    pub fn public_url(&self) -> String {
        format!("http://localhost:{}", self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_set() {
        let config = ServerConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, ServerConfig::default());
        assert_eq!(config.bind_address().to_string(), "127.0.0.1:3000");
        assert_eq!(config.public_url(), "http://localhost:3000");
    }

    #[test]
    fn reads_host_and_port() {
        let config =
            ServerConfig::from_lookup(lookup(&[("HOST", "0.0.0.0"), ("PORT", " 8080 ")])).unwrap();
        assert_eq!(config.bind_address().to_string(), "0.0.0.0:8080");
        assert_eq!(config.public_url(), "http://localhost:8080");
    }

    #[test]
    fn rejects_bad_port() {
        let err = ServerConfig::from_lookup(lookup(&[("PORT", "http")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPort { ref value, .. } if value == "http"));
    }

    #[test]
    fn rejects_out_of_range_port() {
        let err = ServerConfig::from_lookup(lookup(&[("PORT", "70000")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPort { .. }));
    }

    #[test]
    fn rejects_bad_host() {
        let err = ServerConfig::from_lookup(lookup(&[("HOST", "localhost")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidHost { .. }));
    }
}
