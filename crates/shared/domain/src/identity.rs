//! String identifiers of the provisioning namespace.
//!
//! All four share one invariant: the inner string is never empty. User input goes through
//! `TryFrom`/`FromStr`; derived names are built from an already valid identifier plus a
//! non-empty suffix, so they cannot be empty either.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

macro_rules! identifier {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = DomainError;

            fn try_from(value: String) -> Result<Self, DomainError> {
                if value.trim().is_empty() {
                    return Err(DomainError::EmptyIdentifier {
                        message: $label.into(),
                        context: Some(concat!($label, " must be a non-empty string").into()),
                    });
                }
                Ok(Self(value))
            }
        }

        impl TryFrom<&str> for $name {
            type Error = DomainError;

            fn try_from(value: &str) -> Result<Self, DomainError> {
                Self::try_from(value.to_owned())
            }
        }

        impl FromStr for $name {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, DomainError> {
                Self::try_from(s)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

identifier!(
    /// User-supplied name of a provisioning group; the seed of every derived name.
    GroupName,
    "group name"
);

identifier!(
    /// Identity of a device thing, most notably the group's core (`<group>_Core`).
    ThingName,
    "thing name"
);

identifier!(
    /// Name of a thing's security policy (`<thing>_Policy`).
    PolicyName,
    "policy name"
);

identifier!(
    /// Service region token. Deliberately unvalidated beyond non-emptiness.
    Region,
    "region"
);

impl ThingName {
    /// Appends `suffix` to the group name.
    #[must_use]
    pub fn from_group(group: &GroupName, suffix: &str) -> Self {
        debug_assert!(!suffix.is_empty(), "thing name suffix must not be empty");
        Self(format!("{group}{suffix}"))
    }
}

impl PolicyName {
    /// Appends `suffix` to the thing name.
    #[must_use]
    pub fn from_thing(thing: &ThingName, suffix: &str) -> Self {
        debug_assert!(!suffix.is_empty(), "policy name suffix must not be empty");
        Self(format!("{thing}{suffix}"))
    }
}
