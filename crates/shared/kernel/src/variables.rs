//! The derivation engine.
//!
//! Name derivations are total string transforms: the same group always yields the same
//! names, which is what makes them safe to use as idempotent lookup keys against the
//! provisioning service. Default resolution is a separate, fallible family of calls that
//! re-reads the file on every invocation.

use crate::config::{ConfigError, ResolvedConfig};
use crate::constants::GgConstants;
use ggp_domain::constants::{
    ARCHIVE_EXTENSION, CORE_SUFFIX, DEFINITION_SUFFIX, DEVICE_DEFINITION_SUFFIX, GG_HOST_PREFIX,
    GG_HOST_SUFFIX, POLICY_SUFFIX, SCRIPT_EXTENSION, SCRIPT_PREFIX, SHADOW_TOPIC_PREFIX,
    SHADOW_TOPIC_SUFFIX,
};
use ggp_domain::{ArchiveKind, GroupName, IsolationMode, PolicyName, Region, ThingName};
use tracing::debug;

/// Derives names, paths and defaults from a borrowed [`GgConstants`].
///
/// ```rust
/// use ggp_domain::GroupName;
/// use ggp_kernel::{GgConstants, GgVariables};
///
/// let constants = GgConstants::default();
/// let variables = GgVariables::new(&constants);
/// let group = GroupName::try_from("plant").unwrap();
///
/// assert_eq!(variables.core_policy_name(&group).as_str(), "plant_Core_Policy");
/// assert_eq!(variables.ggd_archive_name(&group), "build/ggd.plant.tar");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct GgVariables<'a> {
    constants: &'a GgConstants,
}

#[allow(clippy::unused_self)]
impl<'a> GgVariables<'a> {
    pub const fn new(constants: &'a GgConstants) -> Self {
        Self { constants }
    }

    pub const fn constants(&self) -> &'a GgConstants {
        self.constants
    }

    // --- Names ---

    /// `<group>_Core`
    pub fn core_thing_name(&self, group: &GroupName) -> ThingName {
        ThingName::from_group(group, CORE_SUFFIX)
    }

    /// `<group>_Core_Definition`
    pub fn core_definition_name(&self, group: &GroupName) -> String {
        format!("{}{DEFINITION_SUFFIX}", self.core_thing_name(group))
    }

    /// `<group>_Core_Policy`
    pub fn core_policy_name(&self, group: &GroupName) -> PolicyName {
        PolicyName::from_thing(&self.core_thing_name(group), POLICY_SUFFIX)
    }

    /// MQTT topic filter matching every shadow topic of `thing`.
    pub fn device_shadow_topic_filter(&self, thing: &ThingName) -> String {
        format!("{SHADOW_TOPIC_PREFIX}{thing}{SHADOW_TOPIC_SUFFIX}")
    }

    /// Greengrass ATS endpoint for `region`. The token is not checked against known regions.
    pub fn gg_host(&self, region: &Region) -> String {
        format!("{GG_HOST_PREFIX}{region}{GG_HOST_SUFFIX}")
    }

    /// `<group>_DeviceDefinition`
    pub fn device_definition_name(&self, group: &GroupName) -> String {
        format!("{group}{DEVICE_DEFINITION_SUFFIX}")
    }

    // --- Build artifacts ---

    /// `<build>/<kind>.<group>.tar`
    pub fn archive_name(&self, group: &GroupName, kind: ArchiveKind) -> String {
        self.in_build_directory(&dotted(&[kind.as_ref(), group.as_str(), ARCHIVE_EXTENSION]))
    }

    pub fn ggd_archive_name(&self, group: &GroupName) -> String {
        self.archive_name(group, ArchiveKind::Ggd)
    }

    pub fn oem_archive_name(&self, group: &GroupName) -> String {
        self.archive_name(group, ArchiveKind::Oem)
    }

    /// `gg.<group>.sh`
    pub fn base_gg_script_name(&self, group: &GroupName) -> String {
        dotted(&[SCRIPT_PREFIX, group.as_str(), SCRIPT_EXTENSION])
    }

    /// `<build>/gg.<group>.sh`
    pub fn gg_sh_script_name(&self, group: &GroupName) -> String {
        self.in_build_directory(&self.base_gg_script_name(group))
    }

    // --- Defaults ---

    /// Parses the function defaults file.
    ///
    /// # Errors
    /// Returns [`ConfigError`] if the file is missing or malformed.
    pub fn function_defaults(&self) -> Result<ResolvedConfig, ConfigError> {
        debug!("Resolving function defaults");
        ResolvedConfig::load(self.constants.function_defaults_conf())
    }

    /// Parses the connector defaults file.
    ///
    /// # Errors
    /// Returns [`ConfigError`] if the file is missing or malformed.
    pub fn connector_defaults(&self) -> Result<ResolvedConfig, ConfigError> {
        debug!("Resolving connector defaults");
        ResolvedConfig::load(self.constants.connector_defaults_conf())
    }

    /// Parses the deployment defaults file.
    ///
    /// # Errors
    /// Returns [`ConfigError`] if the file is missing or malformed.
    pub fn deployment_defaults(&self) -> Result<ResolvedConfig, ConfigError> {
        debug!("Resolving deployment defaults");
        ResolvedConfig::load(self.constants.deployment_defaults_conf())
    }

    /// Isolation mode for functions that do not choose one themselves.
    ///
    /// Reads the containerized-execution switch from the function defaults on every call.
    ///
    /// # Errors
    /// Fails if the defaults cannot be resolved or the switch is absent or not a boolean.
    pub fn default_function_isolation_mode(&self) -> Result<IsolationMode, ConfigError> {
        let key = self.constants.conf_greengrass_container();
        let containerized = self.function_defaults()?.get_bool(key)?;
        let mode = IsolationMode::from_container_flag(containerized);

        debug!(key, containerized, %mode, "Resolved default function isolation mode");

        Ok(mode)
    }

    fn in_build_directory(&self, file_name: &str) -> String {
        format!("{}/{file_name}", self.constants.build_directory().trim_end_matches('/'))
    }
}

fn dotted(parts: &[&str]) -> String {
    parts.join(".")
}
