//! Fixed string fragments shared by the naming scheme and the default configuration files.

// --- Configuration keys ---

/// Topics that cloud-originated messages are routed from.
pub const CONF_FROM_CLOUD_SUBSCRIPTIONS: &str = "conf.fromCloudSubscriptions";
/// Topics that function output is routed to the cloud on.
pub const CONF_TO_CLOUD_SUBSCRIPTIONS: &str = "conf.toCloudSubscriptions";
pub const CONF_OUTPUT_TOPICS: &str = "conf.outputTopics";
pub const CONF_INPUT_TOPICS: &str = "conf.inputTopics";
/// Boolean controlling containerized execution of deployed functions.
pub const CONF_GREENGRASS_CONTAINER: &str = "conf.greengrassContainer";

// --- Name suffixes ---

pub const CORE_SUFFIX: &str = "_Core";
pub const DEFINITION_SUFFIX: &str = "_Definition";
pub const POLICY_SUFFIX: &str = "_Policy";
pub const DEVICE_DEFINITION_SUFFIX: &str = "_DeviceDefinition";

// --- Topic and host templates ---

pub const SHADOW_TOPIC_PREFIX: &str = "$aws/things/";
pub const SHADOW_TOPIC_SUFFIX: &str = "/shadow/#";
pub const GG_HOST_PREFIX: &str = "greengrass-ats.iot.";
pub const GG_HOST_SUFFIX: &str = ".amazonaws.com";

// --- Build artifacts ---

pub const ARCHIVE_EXTENSION: &str = "tar";
pub const SCRIPT_PREFIX: &str = "gg";
pub const SCRIPT_EXTENSION: &str = "sh";
