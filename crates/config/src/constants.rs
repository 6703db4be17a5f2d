//! Defaults shared across the workspace
//!
//! Calculator bounds default through `maduraai_core` (`LoanLimits`,
//! `PasswordLimits`, `GST_SLABS`); these are the service-level values.

/// HTTP server defaults
pub mod server {
    pub const DEFAULT_HOST: &str = "0.0.0.0";
    pub const DEFAULT_PORT: u16 = 8080;
    pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
    /// Origin of the Next.js site in local development
    pub const DEFAULT_DEV_ORIGIN: &str = "http://localhost:9002";
}

/// Tool execution defaults
pub mod tools {
    /// Calculators return instantly; anything slower is a bug
    pub const DEFAULT_TIMEOUT_SECS: u64 = 5;
}

/// Configuration loading
pub mod loading {
    /// Environment variable prefix (`MADURAAI__SERVER__PORT=9000`)
    pub const ENV_PREFIX: &str = "MADURAAI";
    pub const ENV_SEPARATOR: &str = "__";
    /// Variable naming the environment overlay file (`config/{env}.yaml`)
    pub const ENV_NAME_VAR: &str = "MADURAAI_ENV";
    pub const DEFAULT_CONFIG_DIR: &str = "config";
}

/// Observability defaults
pub mod observability {
    pub const DEFAULT_LOG_LEVEL: &str = "info";
}
