use config::{Config, Environment, File};
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use tracing::info;

/// Default configuration file stem, resolved against the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "admin";
/// Prefix of environment overrides (`ADMIN__SERVER__PORT=8080`).
pub const ENV_PREFIX: &str = "ADMIN";

/// Custom error type for config loading.
#[admin_derive::admin_error]
pub enum ConfigError {
    #[error("Config error{}: {source}", format_context(.context))]
    Config { source: config::ConfigError, context: Option<Cow<'static, str>> },
}

/// Layered configuration loader: a file overlaid with environment variables.
///
/// 1. **Base file**: `path` (extension optional, any format the `config` crate knows),
///    defaulting to [`DEFAULT_CONFIG_PATH`].
/// 2. **Environment overrides**: variables prefixed with `ADMIN__`, nested with double
///    underscores (`ADMIN__LOGGING__LEVEL` maps to `logging.level`).
///
/// Keys keep the case they were written with in the file. Environment overrides come in
/// lower snake case; the host's [`ConfigStore`](crate::store::ConfigStore) upper-cases
/// every key it stores.
///
/// # Errors
/// Returns an error if the file is missing, or the merged sources do not deserialize
/// into `T`.
///
/// # Example
/// ```rust
/// use admin_kernel::config::load_config;
///
/// #[derive(Default, serde::Deserialize)]
/// struct AppConfig {
///     port: u16,
/// }
///
/// let cfg: AppConfig = load_config(Some("config/local")).unwrap_or_default();
/// ```
pub fn load_config<T>(path: Option<impl AsRef<Path>>) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    let effective_path =
        path.map_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH), |p| p.as_ref().to_path_buf());

    let builder = Config::builder()
        .add_source(File::from(effective_path.as_path()).required(true))
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .convert_case(config::Case::Snake),
        );

    info!(path = %effective_path.display(), "Loading configuration");

    let config = builder
        .build()
        .context("Failed to build config")?
        .try_deserialize::<T>()
        .context("Failed to deserialize config")?;

    Ok(config)
}
