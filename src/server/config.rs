//! Server configuration
//!
//! Defaults, overlaid by an optional `config.toml`, overlaid by `SANDBOX_FS_*`
//! environment variables. Everything here is read once at startup.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;

use crate::storage::ListLimits;

/// Locations searched for the configuration file, lowest priority first.
const CONFIG_PATHS: [&str; 2] = [
    "sandbox-fs-server/config", // when launched from the workspace root
    "config",                   // ./config.toml
];

const ENV_PREFIX: &str = "SANDBOX_FS";

/// Server configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Address the HTTP listener binds to
    pub bind_address: String,
    pub port: u16,

    /// Directory all logical paths are resolved against
    pub base_dir: String,

    /// Prefix removed from list request paths before resolution
    #[serde(default)]
    pub strip_prefix: Option<String>,

    /// Deepest subdirectory level a recursive listing expands
    #[serde(default)]
    pub max_list_depth: Option<usize>,

    /// Most files a single listing may return
    #[serde(default)]
    pub max_list_entries: Option<usize>,

    /// Reject paths whose real location leaves the base directory through a symlink
    pub reject_symlink_escapes: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1".to_string(),
            port: 8080,
            base_dir: "./assets".to_string(),
            strip_prefix: None,
            max_list_depth: None,
            max_list_entries: None,
            reject_symlink_escapes: true,
        }
    }
}

impl ServerConfig {
    /// Load configuration from the default locations with environment overrides
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&CONFIG_PATHS)
    }

    /// Load configuration from the given file stems (missing files are skipped)
    pub fn load_from(paths: &[&str]) -> Result<Self, ConfigError> {
        let defaults = ServerConfig::default();

        let mut builder = Config::builder()
            .set_default("bind_address", defaults.bind_address)?
            .set_default("port", i64::from(defaults.port))?
            .set_default("base_dir", defaults.base_dir)?
            .set_default("reject_symlink_escapes", defaults.reject_symlink_escapes)?;

        for path in paths {
            builder = builder.add_source(File::with_name(path).required(false));
        }

        let settings = builder
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?;

        let config: ServerConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validation for all configuration values
    fn validate(&self) -> Result<(), ConfigError> {
        if self.port == 0 {
            return Err(ConfigError::Message("port cannot be 0".into()));
        }

        if self.base_dir.trim().is_empty() {
            return Err(ConfigError::Message("base_dir cannot be empty".into()));
        }

        if self.max_list_entries == Some(0) {
            return Err(ConfigError::Message(
                "max_list_entries must be greater than 0".into(),
            ));
        }

        Ok(())
    }

    /// Get bind address and port as socket address
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }

    /// Get base directory as PathBuf
    pub fn base_dir_path(&self) -> PathBuf {
        PathBuf::from(&self.base_dir)
    }

    pub fn list_limits(&self) -> ListLimits {
        ListLimits {
            max_depth: self.max_list_depth,
            max_entries: self.max_list_entries,
        }
    }
}
