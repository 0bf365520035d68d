//! Facade crate for the provisioning libraries.
//! Re-exports the domain types, the kernel (registry, derivation engine, config loading) and,
//! with the `logger` feature, the subscriber setup.
//! Keep this crate thin: it composes the other crates and owns only the settings file layout.
//!
//! ## Usage
//! ```rust
//! use ggp::prelude::*;
//!
//! let constants = GgConstants::bundled();
//! let variables = GgVariables::new(&constants);
//! let group = GroupName::try_from("plant").unwrap();
//!
//! assert_eq!(variables.core_thing_name(&group).as_str(), "plant_Core");
//! assert_eq!(
//!     variables.default_function_isolation_mode().unwrap(),
//!     IsolationMode::ContainerizedExecution
//! );
//! ```

pub use ggp_domain as domain;
pub use ggp_kernel as kernel;
#[cfg(feature = "logger")]
pub use ggp_logger as logger;

use ggp_kernel::constants::SETTINGS_ENV_PREFIX;
use ggp_kernel::{ConfigError, GgConstants, load_config};
use serde::Deserialize;
use std::path::Path;

pub mod prelude {
    pub use crate::Settings;
    pub use ggp_kernel::prelude::*;
    #[cfg(feature = "logger")]
    pub use ggp_logger::{LevelFilter, LogSettings, Logger, LoggerError};
}

/// A provisioner settings file: registry overrides at the top level, an optional
/// `[logging]` table for the host's subscriber.
///
/// ```toml
/// build_directory = "out"
///
/// [logging]
/// level = "debug"
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(flatten)]
    pub constants: GgConstants,
    #[cfg(feature = "logger")]
    #[serde(default)]
    pub logging: ggp_logger::LogSettings,
}

impl Settings {
    /// Reads a settings file with `GGP__*` environment overrides.
    ///
    /// # Errors
    /// Returns [`ConfigError`] if the file is missing or does not match the layout.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        load_config(path, Some(SETTINGS_ENV_PREFIX))
    }
}
