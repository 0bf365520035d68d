//! The constant registry: every fixed literal, path and default-file location the
//! derivation engine reads.

use crate::config::{ConfigError, load_config};
use ggp_domain::CoreFunction;
use ggp_domain::constants::CONF_GREENGRASS_CONTAINER;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use typed_builder::TypedBuilder;

/// Prefix of environment variables that override a settings file (`GGP__BUILD_DIRECTORY`).
pub const SETTINGS_ENV_PREFIX: &str = "GGP";

const DEFAULT_ROOT_CA_URL: &str = "https://www.amazontrust.com/repository/AmazonRootCA1.pem";
const DEFAULT_GG_IP_DETECTOR_ARN: &str = "arn:aws:lambda:::function:GGIPDetector:1";
const GG_IP_DETECTOR_ID: &str = "GGIPDetector";
const GG_IP_DETECTOR_MEMORY_KB: u32 = 32_768;
const GG_IP_DETECTOR_TIMEOUT_SECS: u32 = 3;
const OFFICIAL_GREENGRASS_ACCOUNT_ID: &str = "216483018798";

/// Read-only registry of provisioning constants.
///
/// Build it with [`GgConstants::default`], override single values through
/// [`GgConstants::builder`], or read a settings file with [`GgConstants::load`].
/// Path accessors never touch the filesystem; a missing file only surfaces when
/// a caller resolves it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, TypedBuilder)]
#[serde(default)]
pub struct GgConstants {
    #[builder(default = DEFAULT_ROOT_CA_URL.to_owned(), setter(into))]
    root_ca_url: String,
    #[builder(default = "root.ca.pem".to_owned(), setter(into))]
    root_ca_name: String,
    #[builder(default = "config.json".to_owned(), setter(into))]
    config_file_name: String,
    #[builder(default = "greengrassd".to_owned(), setter(into))]
    greengrass_daemon_name: String,
    #[builder(default = "core.crt".to_owned(), setter(into))]
    core_public_certificate_name: String,
    #[builder(default = "core.key".to_owned(), setter(into))]
    core_private_key_name: String,
    #[builder(default = DEFAULT_GG_IP_DETECTOR_ARN.to_owned(), setter(into))]
    gg_ip_detector_arn: String,
    #[builder(default = "GGShadowService".to_owned(), setter(into))]
    gg_shadow_service_name: String,

    #[builder(default = "build".to_owned(), setter(into))]
    build_directory: String,
    #[builder(default = "certs".to_owned(), setter(into))]
    certs_directory_prefix: String,
    #[builder(default = "config".to_owned(), setter(into))]
    config_directory_prefix: String,

    #[builder(default = OFFICIAL_GREENGRASS_ACCOUNT_ID.to_owned(), setter(into))]
    official_greengrass_account_id: String,
    #[builder(default = "us-west-2".to_owned(), setter(into))]
    official_greengrass_ecr_region: String,
    #[builder(default = "aws-greengrass-docker/amd64".to_owned(), setter(into))]
    official_greengrass_docker_image_name: String,
    #[builder(default = "amazon/aws-iot-greengrass".to_owned(), setter(into))]
    docker_hub_greengrass_docker_image_name: String,

    /// Directory the relative default-file locations below are resolved against.
    #[builder(default = PathBuf::from("."), setter(into))]
    resource_root: PathBuf,
    #[builder(default = "deployments/defaults.toml".to_owned(), setter(into))]
    defaults_conf: String,
    #[builder(default = PathBuf::from("foundation/function.defaults.toml"), setter(into))]
    function_defaults_conf: PathBuf,
    #[builder(default = PathBuf::from("foundation/connector.defaults.toml"), setter(into))]
    connector_defaults_conf: PathBuf,
    #[builder(default = PathBuf::from("deployments/deployment.defaults.toml"), setter(into))]
    deployment_defaults_conf: PathBuf,
    #[builder(default = CONF_GREENGRASS_CONTAINER.to_owned(), setter(into))]
    conf_greengrass_container: String,
}

impl Default for GgConstants {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl GgConstants {
    /// Registry whose default files are the ones shipped in this crate's `resources/`.
    pub fn bundled() -> Self {
        Self::builder().resource_root(bundled_resource_root()).build()
    }

    /// Reads a settings file (format from its extension) with `GGP__*` environment overrides.
    /// Missing keys keep their defaults.
    ///
    /// # Errors
    /// Returns [`ConfigError`] if the file is missing or does not match the registry layout.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        load_config(path, Some(SETTINGS_ENV_PREFIX))
    }

    pub fn root_ca_url(&self) -> &str {
        &self.root_ca_url
    }

    pub fn root_ca_name(&self) -> &str {
        &self.root_ca_name
    }

    pub fn config_file_name(&self) -> &str {
        &self.config_file_name
    }

    pub fn greengrass_daemon_name(&self) -> &str {
        &self.greengrass_daemon_name
    }

    pub fn core_public_certificate_name(&self) -> &str {
        &self.core_public_certificate_name
    }

    pub fn core_private_key_name(&self) -> &str {
        &self.core_private_key_name
    }

    pub fn gg_ip_detector_arn(&self) -> &str {
        &self.gg_ip_detector_arn
    }

    /// The IP detector system function, pinned so it keeps reporting connectivity info.
    pub fn gg_ip_detector_function(&self) -> CoreFunction {
        CoreFunction {
            id: GG_IP_DETECTOR_ID.to_owned(),
            arn: self.gg_ip_detector_arn.clone(),
            pinned: true,
            memory_size_kb: GG_IP_DETECTOR_MEMORY_KB,
            timeout_secs: GG_IP_DETECTOR_TIMEOUT_SECS,
        }
    }

    pub fn gg_shadow_service_name(&self) -> &str {
        &self.gg_shadow_service_name
    }

    /// Output directory for archives and scripts.
    pub fn build_directory(&self) -> &str {
        &self.build_directory
    }

    pub fn certs_directory_prefix(&self) -> &str {
        &self.certs_directory_prefix
    }

    pub fn config_directory_prefix(&self) -> &str {
        &self.config_directory_prefix
    }

    pub fn official_greengrass_account_id(&self) -> &str {
        &self.official_greengrass_account_id
    }

    pub fn official_greengrass_ecr_endpoint(&self) -> String {
        format!(
            "{}.dkr.ecr.{}.amazonaws.com",
            self.official_greengrass_account_id, self.official_greengrass_ecr_region
        )
    }

    pub fn official_greengrass_docker_image_name(&self) -> &str {
        &self.official_greengrass_docker_image_name
    }

    /// Community image published on Docker Hub.
    pub fn docker_hub_greengrass_docker_image_name(&self) -> &str {
        &self.docker_hub_greengrass_docker_image_name
    }

    /// Fully qualified official image reference (`<ecr endpoint>/<image name>`).
    pub fn official_greengrass_docker_image(&self) -> String {
        format!(
            "{}/{}",
            self.official_greengrass_ecr_endpoint(),
            self.official_greengrass_docker_image_name
        )
    }

    pub fn resource_root(&self) -> &Path {
        &self.resource_root
    }

    /// File name of per-deployment default settings.
    pub fn defaults_conf(&self) -> &str {
        &self.defaults_conf
    }

    pub fn function_defaults_conf(&self) -> PathBuf {
        self.resource_root.join(&self.function_defaults_conf)
    }

    pub fn connector_defaults_conf(&self) -> PathBuf {
        self.resource_root.join(&self.connector_defaults_conf)
    }

    pub fn deployment_defaults_conf(&self) -> PathBuf {
        self.resource_root.join(&self.deployment_defaults_conf)
    }

    /// Key of the containerized-execution switch inside the function defaults.
    pub fn conf_greengrass_container(&self) -> &str {
        &self.conf_greengrass_container
    }
}

fn bundled_resource_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("resources")
}
