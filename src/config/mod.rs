//! Configuration loading and management

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable naming the YAML configuration file
pub const CONFIG_PATH_ENV: &str = "CATALOG_CONFIG";

/// Environment variable overriding the listening port
pub const PORT_ENV: &str = "CATALOG_PORT";

/// Server and storage configuration
///
/// Every field has a default, so an empty YAML document is valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind to
    #[serde(default = "default_port")]
    pub port: u16,

    /// JSON snapshot file
    #[serde(default = "default_data_file")]
    pub data_file: PathBuf,

    /// Records generated when no snapshot exists
    #[serde(default = "default_sample_size")]
    pub sample_size: usize,

    /// Seed of the sample generator
    #[serde(default = "default_seed")]
    pub seed: u64,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_data_file() -> PathBuf {
    PathBuf::from("data.json")
}

fn default_sample_size() -> usize {
    1000
}

fn default_seed() -> u64 {
    42
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            data_file: default_data_file(),
            sample_size: default_sample_size(),
            seed: default_seed(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file '{}'", path))?;
        Self::from_yaml_str(&content)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    /// Load from `CATALOG_CONFIG` when set, then apply `CATALOG_PORT`
    pub fn from_env() -> Result<Self> {
        let mut config = match std::env::var(CONFIG_PATH_ENV) {
            Ok(path) => Self::from_yaml_file(&path)?,
            Err(_) => Self::default(),
        };
        if let Ok(port) = std::env::var(PORT_ENV) {
            config.port = port
                .parse()
                .with_context(|| format!("{} must be a port number, got '{}'", PORT_ENV, port))?;
        }
        Ok(config)
    }

    /// Get the socket address string
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.socket_addr(), "0.0.0.0:8000");
        assert_eq!(config.data_file, PathBuf::from("data.json"));
        assert_eq!(config.sample_size, 1000);
        assert_eq!(config.seed, 42);
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = ServerConfig::from_yaml_str("port: 9000\nsample_size: 10\n").unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.sample_size, 10);
        assert_eq!(config.host, "0.0.0.0");
    }

    #[test]
    fn test_empty_yaml_is_default() {
        assert_eq!(ServerConfig::from_yaml_str("").unwrap(), ServerConfig::default());
    }

    #[test]
    fn test_yaml_serialization() {
        let config = ServerConfig {
            port: 1234,
            ..Default::default()
        };
        let yaml = serde_yaml::to_string(&config).unwrap();
        assert_eq!(ServerConfig::from_yaml_str(&yaml).unwrap(), config);
    }

    #[test]
    fn test_invalid_yaml_is_an_error() {
        assert!(ServerConfig::from_yaml_str("port: [not a port]").is_err());
        assert!(ServerConfig::from_yaml_file("/definitely/not/here.yaml").is_err());
    }
}
