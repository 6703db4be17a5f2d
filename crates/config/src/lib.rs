//! Configuration management for the quick tools service
//!
//! Supports loading configuration from:
//! - YAML/TOML files (`config/default.*`, then `config/{env}.*`)
//! - Environment variables (`MADURAAI__` prefix, `__` separator)
//!
//! Calculator bounds, GST slabs and password limits live under `tools`.
//! A custom quick tools catalogue can be supplied as a YAML file.

pub mod catalog;
pub mod constants;
pub mod settings;

pub use catalog::load_tool_catalog;
pub use settings::{
    load_settings, load_settings_from, GstConfig, ObservabilityConfig, RuntimeEnvironment,
    ServerConfig, Settings, ToolsConfig,
};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },
}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}

impl ConfigError {
    /// Wrap a core validation error under a settings path prefix
    pub(crate) fn from_core(prefix: &str, err: maduraai_core::Error) -> Self {
        match err {
            maduraai_core::Error::InvalidInput { param, message } => ConfigError::InvalidValue {
                field: format!("{}.{}", prefix, param),
                message,
            },
            other => ConfigError::InvalidValue {
                field: prefix.to_string(),
                message: other.to_string(),
            },
        }
    }
}
