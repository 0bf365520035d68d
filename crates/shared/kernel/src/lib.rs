//! Provisioning kernel: the constant registry, the derivation engine and default resolution.
//! Keep this crate free of network and archive concerns; it only turns seed identifiers into
//! names and reads default files from disk.
//!
//! ## Deriving names
//! ```rust
//! use ggp_kernel::prelude::*;
//!
//! let constants = GgConstants::default();
//! let variables = GgVariables::new(&constants);
//! let group = GroupName::try_from("plant").unwrap();
//!
//! assert_eq!(variables.core_thing_name(&group).as_str(), "plant_Core");
//! assert_eq!(variables.gg_sh_script_name(&group), "build/gg.plant.sh");
//! ```
//!
//! ## Resolving defaults
//! ```rust
//! use ggp_kernel::prelude::*;
//!
//! let constants = GgConstants::bundled();
//! let mode = GgVariables::new(&constants).default_function_isolation_mode().unwrap();
//! assert_eq!(mode, IsolationMode::ContainerizedExecution);
//! ```
pub mod config;
pub mod constants;
pub mod prelude;
pub mod variables;

pub use crate::config::{ConfigError, ConfigErrorExt, ResolvedConfig, load_config};
pub use crate::constants::GgConstants;
pub use crate::variables::GgVariables;
pub use ggp_domain as domain;
