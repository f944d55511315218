use config::{Config, Environment, File};
use ragcfg_domain::Settings;
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info};

/// File stem looked up in the working directory when no path is given (`ragcfg.toml`, ...).
pub const DEFAULT_SETTINGS_FILE: &str = "ragcfg";

/// Prefix of environment overrides (`RAGCFG__BLOB__ROOT` maps to `blob.root`).
pub const ENV_PREFIX: &str = "RAGCFG";

#[ragcfg_derive::ragcfg_error]
pub enum SettingsError {
    #[error("Settings error{}: {source}", format_context(.context))]
    Config { source: config::ConfigError, context: Option<Cow<'static, str>> },
}

/// Loads layered settings into `T`.
///
/// 1. **File**: `path` when given (must exist), otherwise an optional
///    `ragcfg.{toml,json,yaml,...}` in the working directory.
/// 2. **Environment**: variables prefixed with `RAGCFG__`; nested keys are
///    separated by `__`.
///
/// Keys absent from both layers fall back to `T`'s serde defaults.
///
/// # Errors
/// [`SettingsError::Config`] when an explicit file is missing or unreadable,
/// or the merged values do not match `T`.
///
/// # Example
/// ```rust
/// use ragcfg_kernel::settings::load;
///
/// #[derive(Default, serde::Deserialize)]
/// #[serde(default)]
/// struct Local {
///     port: u16,
/// }
///
/// let local: Local = load(None::<&str>).unwrap_or_default();
/// ```
pub fn load<T>(path: Option<impl AsRef<Path>>) -> Result<T, SettingsError>
where
    T: DeserializeOwned,
{
    build(path, environment())
}

/// Like [`load`], but reads overrides from `vars` instead of the process
/// environment. Keys keep the `RAGCFG__` prefix.
///
/// # Errors
/// See [`load`].
pub fn load_with_vars<T>(
    path: Option<impl AsRef<Path>>,
    vars: HashMap<String, String>,
) -> Result<T, SettingsError>
where
    T: DeserializeOwned,
{
    build(path, environment().source(Some(vars)))
}

fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX).prefix_separator("__").separator("__").try_parsing(true)
}

fn build<T>(path: Option<impl AsRef<Path>>, env: Environment) -> Result<T, SettingsError>
where
    T: DeserializeOwned,
{
    let file = match path.as_ref() {
        Some(path) => {
            info!("Loading settings from {}", path.as_ref().display());
            File::from(path.as_ref()).required(true)
        },
        None => {
            debug!("Looking for optional {DEFAULT_SETTINGS_FILE} settings file");
            File::with_name(DEFAULT_SETTINGS_FILE).required(false)
        },
    };

    let settings = Config::builder()
        .add_source(file)
        .add_source(env)
        .build()
        .context("Failed to build settings")?
        .try_deserialize::<T>()
        .context("Failed to deserialize settings")?;

    Ok(settings)
}

/// Loads the `ragcfg` tool [`Settings`].
///
/// # Errors
/// See [`load`].
pub fn load_settings(path: Option<impl AsRef<Path>>) -> Result<Settings, SettingsError> {
    let settings: Settings = load(path)?;
    debug!(
        root = %settings.blob.root.display(),
        compression = ?settings.blob.compression,
        level = %settings.log.level,
        "Settings loaded"
    );
    Ok(settings)
}
