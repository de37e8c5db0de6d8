//! Validated identifier newtypes for graph entities.
//!
//! Node, edge, and handle identifiers are authored by the host (or derived
//! from host data), so they are opaque strings: any non-blank value is
//! accepted and stored verbatim. Rejecting instead of normalizing keeps
//! serialize/load round-trips byte-exact.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Errors from constructing an entity identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum KeyError {
    /// The input was empty or contained only whitespace.
    #[error("identifier cannot be empty or whitespace")]
    Empty,
}

macro_rules! entity_key {
    ($(#[$docs:meta])* $name:ident) => {
        $(#[$docs])*
        #[derive(Debug, Clone, Hash, PartialEq, Eq, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Create a new identifier, rejecting blank input.
            pub fn new(raw: impl Into<String>) -> Result<Self, KeyError> {
                let raw = raw.into();
                if raw.trim().is_empty() {
                    return Err(KeyError::Empty);
                }
                Ok(Self(raw))
            }

            /// Return the inner string slice.
            #[inline]
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl FromStr for $name {
            type Err = KeyError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
            }
        }

        impl TryFrom<&str> for $name {
            type Error = KeyError;

            fn try_from(value: &str) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl TryFrom<String> for $name {
            type Error = KeyError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(key: $name) -> Self {
                key.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl PartialEq<str> for $name {
            fn eq(&self, other: &str) -> bool {
                self.0 == other
            }
        }

        impl PartialEq<&str> for $name {
            fn eq(&self, other: &&str) -> bool {
                self.0 == *other
            }
        }

        impl PartialEq<String> for $name {
            fn eq(&self, other: &String) -> bool {
                self.0 == *other
            }
        }
    };
}

entity_key!(
    /// Identifier of a node within a flow graph.
    ///
    /// Host payloads use anything from short labels (`"input"`) to
    /// timestamp-suffixed names (`"node_1749019815180"`).
    NodeId
);

entity_key!(
    /// Identifier of an edge within a flow graph (e.g. `"e1-2"`).
    EdgeId
);

entity_key!(
    /// Name of a connection handle on a node (e.g. `"top"`, `"bottom"`).
    HandleId
);
