use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumIter, EnumString, IntoStaticStr};

/// How a deployed function is isolated on the core device.
///
/// The textual form is the wire name the provisioning API expects.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
    IntoStaticStr,
)]
pub enum IsolationMode {
    /// Runs inside the Greengrass container sandbox.
    #[serde(rename = "GreengrassContainer")]
    #[strum(serialize = "GreengrassContainer")]
    ContainerizedExecution,

    /// Runs directly on the host as a regular process.
    #[serde(rename = "NoContainer")]
    #[strum(serialize = "NoContainer")]
    DirectExecution,
}

impl IsolationMode {
    /// Maps the `greengrassContainer` switch onto a mode.
    #[must_use]
    pub const fn from_container_flag(enabled: bool) -> Self {
        if enabled { Self::ContainerizedExecution } else { Self::DirectExecution }
    }

    #[must_use]
    pub const fn is_containerized(self) -> bool {
        matches!(self, Self::ContainerizedExecution)
    }
}

/// Kind of deployment archive written to the build directory.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
    IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ArchiveKind {
    /// Greengrass device (`ggd`) bundle.
    Ggd,
    /// OEM bundle with the core certificates and config.
    Oem,
}

/// The four topic-subscription categories of a function or connector.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicSubscriptions {
    pub from_cloud_subscriptions: Vec<String>,
    pub to_cloud_subscriptions: Vec<String>,
    pub output_topics: Vec<String>,
    pub input_topics: Vec<String>,
}

impl TopicSubscriptions {
    /// Total number of topics across all categories.
    #[must_use]
    pub fn len(&self) -> usize {
        self.from_cloud_subscriptions.len()
            + self.to_cloud_subscriptions.len()
            + self.output_topics.len()
            + self.input_topics.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A system function the core runs alongside user functions (e.g. the IP detector).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoreFunction {
    pub id: String,
    pub arn: String,
    pub pinned: bool,
    pub memory_size_kb: u32,
    pub timeout_secs: u32,
}
