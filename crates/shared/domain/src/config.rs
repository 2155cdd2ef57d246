use serde::Deserialize;
use std::ops::{Deref, DerefMut};
use std::path::PathBuf;
use std::sync::Arc;

/// Top-level configuration shared across slices.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfigInner {
    pub engine: EngineConfig,
    pub catalog: CatalogConfig,
    pub session: SessionConfig,
    pub logging: LoggingConfig,
}

/// Thin Arc-wrapped config for inexpensive cloning into subsystems.
#[derive(Default, Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(flatten, default)]
    inner: Arc<AppConfigInner>,
}

impl Deref for AppConfig {
    type Target = AppConfigInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl DerefMut for AppConfig {
    fn deref_mut(&mut self) -> &mut AppConfigInner {
        Arc::make_mut(&mut self.inner)
    }
}

/// Resolution loop limits and request policy.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Upper bound on applied changes plus sweeps within one resolution pass.
    pub max_iterations: usize,
    /// Reject requests for values whose choice is currently hidden.
    pub reject_hidden_choices: bool,
}

/// Where the rule catalog comes from.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// JSON catalog replacing the built-in vanity catalog.
    pub path: Option<PathBuf>,
}

/// Session document defaults.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub product: String,
    pub directory: PathBuf,
}

/// Subscriber settings consumed by the logger.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// Extra `EnvFilter` directives such as `vanity_engine=trace`.
    pub filter: Option<String>,
    /// Daily rolling log files are written here when set.
    pub directory: Option<PathBuf>,
    /// Rolled files kept in `directory`.
    pub max_files: usize,
    pub json: bool,
}

// --- Default ---

impl Default for EngineConfig {
    fn default() -> Self {
        Self { max_iterations: 512, reject_hidden_choices: true }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self { product: "vanity".to_owned(), directory: PathBuf::from("sessions") }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_owned(), filter: None, directory: None, max_files: 10, json: false }
    }
}
