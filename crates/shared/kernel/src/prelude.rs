pub use crate::config::{ConfigError, ResolvedConfig};
pub use crate::constants::GgConstants;
pub use crate::variables::GgVariables;
pub use ggp_domain::{
    ArchiveKind, CoreFunction, GroupName, IsolationMode, PolicyName, Region, ThingName,
    TopicSubscriptions,
};
