//! Application State
//!
//! Shared state across all handlers.

use metrics_exporter_prometheus::PrometheusHandle;
use parking_lot::RwLock;
use std::path::PathBuf;
use std::sync::Arc;

use maduraai_config::{load_settings_from, Settings};
use maduraai_tools::{create_registry, ToolRegistry};

use crate::metrics::init_metrics;
use crate::ServerError;

/// Application state
#[derive(Clone)]
pub struct AppState {
    /// Configuration, replaced on reload
    pub config: Arc<RwLock<Settings>>,
    /// Registry built from the current configuration
    tools: Arc<RwLock<Arc<ToolRegistry>>>,
    /// Prometheus handle when metrics are enabled
    pub metrics: Option<PrometheusHandle>,
    /// Where reload reads configuration from
    config_dir: PathBuf,
    /// Environment overlay name for reload
    env: Option<String>,
}

impl AppState {
    /// Create state from loaded settings
    pub fn new(config: Settings) -> Result<Self, ServerError> {
        let registry = create_registry(&config)?;
        let metrics = if config.observability.metrics_enabled {
            init_metrics()
        } else {
            None
        };

        Ok(Self {
            config: Arc::new(RwLock::new(config)),
            tools: Arc::new(RwLock::new(Arc::new(registry))),
            metrics,
            config_dir: PathBuf::from(maduraai_config::constants::loading::DEFAULT_CONFIG_DIR),
            env: None,
        })
    }

    /// Set where `reload_config` reads from
    pub fn with_reload_source(mut self, config_dir: impl Into<PathBuf>, env: Option<String>) -> Self {
        self.config_dir = config_dir.into();
        self.env = env;
        self
    }

    /// Current tool registry
    ///
    /// Returns an owned handle so no lock is held across `.await`.
    pub fn tools(&self) -> Arc<ToolRegistry> {
        self.tools.read().clone()
    }

    /// Reload configuration from disk and rebuild the tool registry
    ///
    /// On failure the running configuration is left untouched. Settings and
    /// registry are swapped while both write locks are held.
    ///
    /// Router layers (CORS origins, request timeout) are built once in
    /// `create_router` and keep their startup values until restart.
    pub fn reload_config(&self) -> Result<(), ServerError> {
        let new_config = load_settings_from(&self.config_dir, self.env.as_deref())?;
        let registry = create_registry(&new_config)?;

        // Lock order: config, then tools
        let mut config = self.config.write();
        let mut tools = self.tools.write();
        *config = new_config;
        *tools = Arc::new(registry);
        drop(tools);
        drop(config);

        tracing::info!("Configuration reloaded successfully");
        Ok(())
    }

    /// Get a read guard to the current configuration
    pub fn get_config(&self) -> parking_lot::RwLockReadGuard<'_, Settings> {
        self.config.read()
    }
}
