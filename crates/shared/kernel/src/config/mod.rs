mod resolved;

pub use resolved::ResolvedConfig;

use config::{Config, Environment, File};
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::path::Path;
use tracing::{info, warn};

/// Custom error type for config loading and resolution.
#[ggp_derive::ggp_error]
pub enum ConfigError {
    /// The configuration file does not exist at the declared location.
    #[error("Configuration file not found{}: {message}", format_context(.context))]
    FileNotFound { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// Parse, lookup or deserialization failure reported by the `config` crate.
    #[error("Config error{}: {source}", format_context(.context))]
    Config { source: config::ConfigError, context: Option<Cow<'static, str>> },
}

/// A reusable configuration loader that combines file-based settings with environment overrides.
///
/// This function implements a layered configuration strategy:
/// 1. **Base File**: Loads settings from `path`; the format is inferred from the extension.
/// 2. **Environment Overrides**: When `env_prefix` is set, overlays values from environment
///    variables prefixed with `<PREFIX>__`. Nested structures are accessed using double
///    underscores (e.g., `GGP__BUILD_DIRECTORY` maps to `build_directory`).
///
/// # Type Parameters
/// * `T`: The target configuration structure. Must implement [`serde::Deserialize`].
///
/// # Errors
/// This function will return an error if:
/// * The configuration file cannot be found.
/// * The content of the file does not match the structure of type `T`.
///
/// # Example
/// ```rust,no_run
/// use ggp_kernel::config::load_config;
///
/// #[derive(Default, serde::Deserialize)]
/// struct Settings {
///     build_directory: String,
/// }
///
/// let settings: Settings = load_config("provisioner.toml", Some("GGP")).unwrap_or_default();
/// ```
pub fn load_config<T>(path: impl AsRef<Path>, env_prefix: Option<&str>) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    let path = path.as_ref();
    ensure_exists(path)?;

    let mut builder = Config::builder().add_source(File::from(path).required(true));

    if let Some(prefix) = env_prefix {
        let marker = format!("{prefix}__");
        let overrides = std::env::vars().filter(|(key, _)| key.starts_with(&marker)).count();
        if overrides > 0 {
            warn!(prefix, overrides, "Environment overrides applied on top of {}", path.display());
        }

        builder = builder.add_source(
            Environment::with_prefix(prefix).separator("__").convert_case(config::Case::Snake),
        );
    }

    info!("Loading config from {}", path.display());

    let config = builder
        .build()
        .context(format!("Failed to build config from {}", path.display()))?
        .try_deserialize::<T>()
        .context(format!("Failed to deserialize config from {}", path.display()))?;

    Ok(config)
}

fn ensure_exists(path: &Path) -> Result<(), ConfigError> {
    if path.is_file() {
        return Ok(());
    }
    Err(ConfigError::FileNotFound {
        message: path.display().to_string().into(),
        context: Some("Expected configuration file is missing".into()),
    })
}
