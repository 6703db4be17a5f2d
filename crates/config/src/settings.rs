//! Main settings module

use std::path::Path;

use config::{Config, Environment, File};
use maduraai_core::{LoanLimits, PasswordLimits, DEFAULT_GST_RATE, GST_SLABS, MAX_TAX_RATE_PERCENT};
use serde::{Deserialize, Serialize};

use crate::constants::{loading, observability, server, tools};
use crate::ConfigError;

/// Runtime environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RuntimeEnvironment {
    /// Relaxed validation, permissive CORS
    #[default]
    Development,
    Staging,
    /// Explicit CORS origins required
    Production,
}

impl RuntimeEnvironment {
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    /// Check if strict validation should be applied
    pub fn is_strict(&self) -> bool {
        matches!(self, Self::Production | Self::Staging)
    }
}

/// Main application settings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Settings {
    #[serde(default)]
    pub environment: RuntimeEnvironment,

    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Calculator bounds and tool execution
    #[serde(default)]
    pub tools: ToolsConfig,

    /// Logging and metrics
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

impl Settings {
    /// Validate all sections
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_server()?;
        self.validate_tools()?;
        Ok(())
    }

    fn validate_server(&self) -> Result<(), ConfigError> {
        let server = &self.server;

        if server.port == 0 {
            return Err(ConfigError::InvalidValue {
                field: "server.port".to_string(),
                message: "Port cannot be 0".to_string(),
            });
        }

        if server.timeout_seconds == 0 {
            return Err(ConfigError::InvalidValue {
                field: "server.timeout_seconds".to_string(),
                message: "Timeout must be at least 1 second".to_string(),
            });
        }

        if self.environment.is_production() && server.cors_enabled && server.cors_origins.is_empty()
        {
            return Err(ConfigError::InvalidValue {
                field: "server.cors_origins".to_string(),
                message: "Production requires explicit CORS origins".to_string(),
            });
        }

        Ok(())
    }

    fn validate_tools(&self) -> Result<(), ConfigError> {
        let tools = &self.tools;

        tools
            .emi
            .validate()
            .map_err(|e| ConfigError::from_core("tools.emi", e))?;
        tools
            .password
            .validate()
            .map_err(|e| ConfigError::from_core("tools.password", e))?;
        tools.gst.validate()?;

        if tools.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "tools.timeout_secs".to_string(),
                message: "Timeout must be at least 1 second".to_string(),
            });
        }

        if let Some(path) = &tools.catalog_path {
            if path.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: "tools.catalog_path".to_string(),
                    message: "Path cannot be blank".to_string(),
                });
            }
        }

        Ok(())
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    #[serde(default = "default_true")]
    pub cors_enabled: bool,

    /// CORS allowed origins; empty means the local development origin
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

fn default_host() -> String {
    server::DEFAULT_HOST.to_string()
}

fn default_port() -> u16 {
    server::DEFAULT_PORT
}

fn default_timeout() -> u64 {
    server::DEFAULT_TIMEOUT_SECS
}

fn default_true() -> bool {
    true
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            timeout_seconds: default_timeout(),
            cors_enabled: true,
            cors_origins: Vec::new(),
        }
    }
}

/// Quick tools configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolsConfig {
    /// EMI slider bounds and defaults
    #[serde(default)]
    pub emi: LoanLimits,

    #[serde(default)]
    pub gst: GstConfig,

    #[serde(default)]
    pub password: PasswordLimits,

    /// YAML file replacing the built-in catalogue
    #[serde(default)]
    pub catalog_path: Option<String>,

    /// Per-call execution timeout
    #[serde(default = "default_tool_timeout")]
    pub timeout_secs: u64,
}

fn default_tool_timeout() -> u64 {
    tools::DEFAULT_TIMEOUT_SECS
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            emi: LoanLimits::default(),
            gst: GstConfig::default(),
            password: PasswordLimits::default(),
            catalog_path: None,
            timeout_secs: default_tool_timeout(),
        }
    }
}

impl ToolsConfig {
    /// The configured catalogue, or the built-in one
    pub fn tool_catalog(&self) -> Result<maduraai_core::ToolCatalog, ConfigError> {
        match &self.catalog_path {
            Some(path) => crate::catalog::load_tool_catalog(path),
            None => Ok(maduraai_core::ToolCatalog::builtin()),
        }
    }
}

/// GST slab configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GstConfig {
    /// Offered rates in percent
    #[serde(default = "default_gst_rates")]
    pub rates: Vec<f64>,

    #[serde(default = "default_gst_rate")]
    pub default_rate: f64,
}

fn default_gst_rates() -> Vec<f64> {
    GST_SLABS.to_vec()
}

fn default_gst_rate() -> f64 {
    DEFAULT_GST_RATE
}

impl Default for GstConfig {
    fn default() -> Self {
        Self {
            rates: default_gst_rates(),
            default_rate: default_gst_rate(),
        }
    }
}

impl GstConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rates.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "tools.gst.rates".to_string(),
                message: "At least one rate is required".to_string(),
            });
        }

        if let Some(rate) = self
            .rates
            .iter()
            .find(|r| !(0.0..=MAX_TAX_RATE_PERCENT).contains(*r))
        {
            return Err(ConfigError::InvalidValue {
                field: "tools.gst.rates".to_string(),
                message: format!("Rate {} outside 0-{}", rate, MAX_TAX_RATE_PERCENT),
            });
        }

        if !self.rates.contains(&self.default_rate) {
            return Err(ConfigError::InvalidValue {
                field: "tools.gst.default_rate".to_string(),
                message: format!("{} is not one of the configured rates", self.default_rate),
            });
        }

        Ok(())
    }
}

/// Observability configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Emit logs as JSON
    #[serde(default)]
    pub log_json: bool,

    /// Serve Prometheus metrics at /metrics
    #[serde(default = "default_true")]
    pub metrics_enabled: bool,
}

fn default_log_level() -> String {
    observability::DEFAULT_LOG_LEVEL.to_string()
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_json: false,
            metrics_enabled: true,
        }
    }
}

/// Load settings from `config/` in the working directory and the environment
pub fn load_settings(env: Option<&str>) -> Result<Settings, ConfigError> {
    load_settings_from(Path::new(loading::DEFAULT_CONFIG_DIR), env)
}

/// Load settings from `config_dir/default.*`, then `config_dir/{env}.*`,
/// then `MADURAAI__*` environment variables
pub fn load_settings_from(config_dir: &Path, env: Option<&str>) -> Result<Settings, ConfigError> {
    let mut builder = Config::builder();

    let base = config_dir.join("default");
    builder = builder.add_source(File::with_name(&base.to_string_lossy()).required(false));

    if let Some(env_name) = env {
        let overlay = config_dir.join(env_name);
        builder =
            builder.add_source(File::with_name(&overlay.to_string_lossy()).required(false));
    }

    builder = builder.add_source(
        Environment::with_prefix(loading::ENV_PREFIX)
            .separator(loading::ENV_SEPARATOR)
            .try_parsing(true),
    );

    let config = builder.build()?;
    let settings: Settings = config.try_deserialize()?;

    settings.validate()?;

    tracing::debug!(
        environment = ?settings.environment,
        port = settings.server.port,
        "Settings loaded"
    );

    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.server.port, 8080);
        assert_eq!(settings.tools.gst.default_rate, 18.0);
        assert_eq!(settings.tools.emi.default_principal, 750_000.0);
        assert_eq!(settings.tools.password.default_length, 12);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_server_validation() {
        let mut settings = Settings::default();
        settings.server.port = 0;
        assert!(settings.validate().is_err());

        settings.server.port = 8080;
        settings.server.timeout_seconds = 0;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_production_requires_cors_origins() {
        let mut settings = Settings::default();
        settings.environment = RuntimeEnvironment::Production;
        assert!(settings.validate().is_err());

        settings.server.cors_origins = vec!["https://maduraai.example".to_string()];
        assert!(settings.validate().is_ok());

        settings.server.cors_origins.clear();
        settings.server.cors_enabled = false;
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_gst_validation() {
        let mut gst = GstConfig::default();
        assert!(gst.validate().is_ok());

        gst.default_rate = 7.0;
        assert!(gst.validate().is_err());

        gst.rates = vec![];
        assert!(gst.validate().is_err());

        gst.rates = vec![18.0, 150.0];
        gst.default_rate = 18.0;
        assert!(gst.validate().is_err());
    }

    #[test]
    fn test_emi_validation_field_path() {
        let mut settings = Settings::default();
        settings.tools.emi.min_principal = 10_000_000.0;
        match settings.validate() {
            Err(ConfigError::InvalidValue { field, .. }) => {
                assert_eq!(field, "tools.emi.min_principal")
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_password_validation() {
        let mut settings = Settings::default();
        settings.tools.password.default_length = 100;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_environment_flags() {
        assert!(RuntimeEnvironment::Production.is_production());
        assert!(RuntimeEnvironment::Staging.is_strict());
        assert!(!RuntimeEnvironment::Development.is_strict());
    }

    #[test]
    fn test_load_from_yaml_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("default.yaml"),
            "server:\n  port: 9100\ntools:\n  emi:\n    max_tenure_years: 30\n    max_tenure_months: 360\n",
        )
        .unwrap();
        fs::write(
            dir.path().join("staging.yaml"),
            "environment: staging\nserver:\n  port: 9200\n",
        )
        .unwrap();

        let settings = load_settings_from(dir.path(), None).unwrap();
        assert_eq!(settings.server.port, 9100);
        assert_eq!(settings.tools.emi.max_tenure_years, 30);
        // Unset fields keep their defaults
        assert_eq!(settings.tools.emi.min_rate, 5.0);

        let settings = load_settings_from(dir.path(), Some("staging")).unwrap();
        assert_eq!(settings.environment, RuntimeEnvironment::Staging);
        assert_eq!(settings.server.port, 9200);
        assert_eq!(settings.tools.emi.max_tenure_years, 30);
    }

    #[test]
    fn test_load_rejects_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("default.yaml"),
            "tools:\n  gst:\n    default_rate: 3\n",
        )
        .unwrap();

        assert!(matches!(
            load_settings_from(dir.path(), None),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_missing_directory_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = load_settings_from(&dir.path().join("absent"), None).unwrap();
        assert_eq!(settings.tools.gst.rates, GST_SLABS.to_vec());
    }

    #[test]
    fn test_env_override() {
        let dir = tempfile::tempdir().unwrap();
        std::env::set_var("MADURAAI__OBSERVABILITY__LOG_LEVEL", "trace");
        let settings = load_settings_from(dir.path(), None);
        std::env::remove_var("MADURAAI__OBSERVABILITY__LOG_LEVEL");

        assert_eq!(settings.unwrap().observability.log_level, "trace");
    }
}
