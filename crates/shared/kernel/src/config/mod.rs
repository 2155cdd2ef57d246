use config::{Config, Environment, File, Map};
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use tracing::info;
use vanity_domain::config::AppConfig;

/// File loaded when no explicit path is given; the extension is resolved by `config`.
pub const DEFAULT_CONFIG_FILE: &str = "vanity";

/// Prefix of environment overrides, e.g. `VANITY__ENGINE__MAX_ITERATIONS=64`.
pub const ENV_PREFIX: &str = "VANITY";

/// Custom error type for config loading.
#[vanity_derive::vanity_error]
pub enum ConfigError {
    #[error("Config error{}: {source}", format_context(.context))]
    Config { source: config::ConfigError, context: Option<Cow<'static, str>> },
}

/// Layered configuration loader: a required file source overlaid with environment variables.
///
/// 1. **Base File**: settings from `path` (defaults to `vanity` in the working directory;
///    `config` probes the usual extensions such as `.toml` and `.json`).
/// 2. **Environment Overrides**: variables prefixed with `VANITY__`; nested keys are separated
///    by double underscores (`VANITY__CATALOG__PATH` maps to `catalog.path`).
///
/// # Errors
/// Returns [`ConfigError::Config`] if the file is missing, an override is malformed, or the
/// merged tree does not deserialize into `T`.
///
/// # Example
/// ```rust
/// use vanity_kernel::config::load_config;
///
/// #[derive(Default, serde::Deserialize)]
/// struct ShellConfig {
///     verbose: bool,
/// }
///
/// let cfg: ShellConfig = load_config(Some("config/local")).unwrap_or_default();
/// ```
pub fn load_config<T>(path: Option<impl AsRef<Path>>) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    let effective_path =
        path.map_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE), |p| p.as_ref().to_path_buf());
    layered(&effective_path, true, None)
}

/// Loads the application config.
///
/// An explicit `path` must exist. Without one, the default `vanity` file is optional and
/// built-in defaults plus environment overrides apply when it is absent.
///
/// # Errors
/// Returns [`ConfigError::Config`] for missing explicit files, malformed files or overrides.
pub fn load_app_config(path: Option<impl AsRef<Path>>) -> Result<AppConfig, ConfigError> {
    match path {
        Some(path) => layered(path.as_ref(), true, None),
        None => layered(Path::new(DEFAULT_CONFIG_FILE), false, None),
    }
}

/// `env` replaces the process environment when set.
fn layered<T>(path: &Path, required: bool, env: Option<Map<String, String>>) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    let builder = Config::builder().add_source(File::from(path).required(required)).add_source(
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("__")
            .separator("__")
            .convert_case(config::Case::Snake)
            .source(env),
    );

    info!(path = %path.display(), required, "Loading config");

    let config = builder
        .build()
        .context("Failed to build config")?
        .try_deserialize::<T>()
        .context("Failed to deserialize config")?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn environment_overrides_file_values() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let path = dir.path().join("vanity.toml");
        fs::write(&path, "[engine]\nmax_iterations = 32\n")?;

        let env = Map::from([
            ("VANITY__ENGINE__MAX_ITERATIONS".to_owned(), "99".to_owned()),
            ("VANITY__SESSION__PRODUCT".to_owned(), "vanity-xl".to_owned()),
        ]);
        let cfg: AppConfig = layered(&path, true, Some(env))?;

        assert_eq!(cfg.engine.max_iterations, 99);
        assert_eq!(cfg.session.product, "vanity-xl");
        Ok(())
    }

    #[test]
    fn optional_default_file_falls_back_to_defaults() -> Result<(), ConfigError> {
        let dir = tempdir().map_err(|e| ConfigError::Config {
            source: config::ConfigError::Message(e.to_string()),
            context: Some("Failed to create temp dir".into()),
        })?;
        let cfg: AppConfig = layered(&dir.path().join("vanity"), false, Some(Map::new()))?;

        assert_eq!(cfg.engine.max_iterations, 512);
        Ok(())
    }
}
