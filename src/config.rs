//! Configuration management for the registry
//!
//! Supports loading configuration from:
//! - Default values
//! - Config file (schemabank.toml)
//! - Environment variables (SCHEMABANK_*)
//!
//! ## Example config file (schemabank.toml):
//! ```toml
//! [server]
//! bind = "127.0.0.1:8081"
//!
//! [registration]
//! lock_timeout_ms = 5000
//! format = "avro"
//! ```

use config_crate::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::validator::SchemaFormat;

/// Main configuration for the registry
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Registration engine settings
    #[serde(default)]
    pub registration: RegistrationConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address to bind the HTTP listener to
    #[serde(default = "default_bind")]
    pub bind: String,
}

/// Registration engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistrationConfig {
    /// Bound on waiting for a subject's registration lock, in milliseconds
    #[serde(default = "default_lock_timeout_ms")]
    pub lock_timeout_ms: u64,

    /// Schema format accepted by the validator
    #[serde(default)]
    pub format: SchemaFormat,
}

fn default_bind() -> String {
    "127.0.0.1:8081".to_string()
}

fn default_lock_timeout_ms() -> u64 {
    5000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

impl Default for RegistrationConfig {
    fn default() -> Self {
        Self {
            lock_timeout_ms: default_lock_timeout_ms(),
            format: SchemaFormat::default(),
        }
    }
}

impl RegistrationConfig {
    /// Lock timeout as a `Duration`
    pub fn lock_timeout(&self) -> Duration {
        Duration::from_millis(self.lock_timeout_ms)
    }
}

impl RegistryConfig {
    /// Load configuration from default locations
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(None)
    }

    /// Load configuration from a specific file
    pub fn load_from(config_path: Option<&str>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();

        let config_locations = ["schemabank.toml", ".schemabank.toml", "config/schemabank.toml"];
        for location in config_locations {
            builder = builder.add_source(File::with_name(location).required(false));
        }

        // XDG config directory
        if let Some(config_dir) = directories::ProjectDirs::from("dev", "familiar", "schemabank") {
            let xdg_config = config_dir.config_dir().join("schemabank.toml");
            if xdg_config.exists() {
                builder = builder.add_source(File::from(xdg_config).required(false));
            }
        }

        if let Some(path) = config_path {
            builder = builder.add_source(File::with_name(path).required(true));
        }

        // Environment variables (SCHEMABANK_*)
        builder = builder.add_source(
            Environment::with_prefix("SCHEMABANK")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// Save configuration to a file
    pub fn save(&self, path: &str) -> std::io::Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        std::fs::write(path, content)
    }
}
