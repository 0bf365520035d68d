use super::{ConfigError, ConfigErrorExt, ensure_exists};
use config::{Config, File, FileFormat, Value, ValueKind};
use ggp_domain::TopicSubscriptions;
use ggp_domain::constants::{
    CONF_FROM_CLOUD_SUBSCRIPTIONS, CONF_INPUT_TOPICS, CONF_OUTPUT_TOPICS,
    CONF_TO_CLOUD_SUBSCRIPTIONS,
};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use tracing::info;

/// A configuration tree parsed from a single TOML defaults file.
///
/// Values are read once at [`ResolvedConfig::load`] and never refreshed; call `load` again
/// to observe later edits on disk. Lookups use dotted keys (`conf.greengrassContainer`).
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    source: PathBuf,
    inner: Config,
}

impl ResolvedConfig {
    /// Parses the file at `path`. No environment layer is applied.
    ///
    /// # Errors
    /// Returns [`ConfigError::FileNotFound`] if the file does not exist and
    /// [`ConfigError::Config`] if it is not valid TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        ensure_exists(path)?;

        let inner = Config::builder()
            .add_source(File::from(path).format(FileFormat::Toml).required(true))
            .build()
            .context(format!("Failed to parse {}", path.display()))?;

        info!(path = %path.display(), "Resolved configuration file");

        Ok(Self { source: path.to_path_buf(), inner })
    }

    /// The file this configuration was parsed from.
    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Returns `true` if `key` resolves to any value.
    pub fn contains(&self, key: &str) -> bool {
        self.inner.get::<config::Value>(key).is_ok()
    }

    /// Reads a TOML boolean. Strings and integers are not coerced.
    ///
    /// # Errors
    /// Fails if `key` is absent or does not hold a boolean.
    pub fn get_bool(&self, key: &str) -> Result<bool, ConfigError> {
        let value = self.inner.get::<Value>(key).context(self.key_context(key))?;
        match value.kind {
            ValueKind::Boolean(flag) => Ok(flag),
            other => Err(config::ConfigError::Message(format!(
                "invalid type: {other}, expected a boolean"
            )))
            .context(self.key_context(key)),
        }
    }

    /// # Errors
    /// Fails if `key` is absent or does not hold a string.
    pub fn get_string(&self, key: &str) -> Result<String, ConfigError> {
        self.inner.get_string(key).context(self.key_context(key))
    }

    /// # Errors
    /// Fails if `key` is absent or is not an array of strings.
    pub fn get_string_list(&self, key: &str) -> Result<Vec<String>, ConfigError> {
        self.get(key)
    }

    /// Deserializes the value (or whole section) at `key` into `T`.
    ///
    /// # Errors
    /// Fails if `key` is absent or its value does not match `T`.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<T, ConfigError> {
        self.inner.get::<T>(key).context(self.key_context(key))
    }

    /// Deserializes the whole tree into `T`.
    ///
    /// # Errors
    /// Fails if the tree does not match `T`.
    pub fn try_deserialize<T: DeserializeOwned>(&self) -> Result<T, ConfigError> {
        self.inner
            .clone()
            .try_deserialize::<T>()
            .context(format!("Failed to deserialize {}", self.source.display()))
    }

    /// Reads the four topic-subscription categories.
    ///
    /// The keys are fixed (`conf.fromCloudSubscriptions`, `conf.toCloudSubscriptions`,
    /// `conf.outputTopics`, `conf.inputTopics`) and not taken from the registry.
    /// Every category must be present; an empty list is written as `[]`.
    ///
    /// # Errors
    /// Fails on the first missing or mistyped category.
    pub fn subscriptions(&self) -> Result<TopicSubscriptions, ConfigError> {
        Ok(TopicSubscriptions {
            from_cloud_subscriptions: self.get_string_list(CONF_FROM_CLOUD_SUBSCRIPTIONS)?,
            to_cloud_subscriptions: self.get_string_list(CONF_TO_CLOUD_SUBSCRIPTIONS)?,
            output_topics: self.get_string_list(CONF_OUTPUT_TOPICS)?,
            input_topics: self.get_string_list(CONF_INPUT_TOPICS)?,
        })
    }

    fn key_context(&self, key: &str) -> String {
        format!("Reading `{key}` from {}", self.source.display())
    }
}
