//! # Domain Models
//!
//! Pure provisioning types with minimal dependencies (`serde`, `strum`).
//! Keep it lean: no I/O and no configuration parsing, just identifiers, enums and the
//! string constants every derived name is assembled from.

pub mod constants;
pub mod deployment;
mod error;
pub mod identity;

pub use deployment::{ArchiveKind, CoreFunction, IsolationMode, TopicSubscriptions};
pub use error::{DomainError, DomainErrorExt};
pub use identity::{GroupName, PolicyName, Region, ThingName};
