//! Strong type definitions for kit-groups.
//!
//! All identifiers are newtypes to prevent misuse at compile time. A kit
//! name, a group name, and an actor identity are all strings on the wire,
//! but they are never interchangeable in an API signature.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The name of a kit in the external kit catalog.
///
/// Kits are opaque to this crate beyond their name; the name is the lookup
/// key into the configured rule table.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KitName(String);

impl KitName {
    /// Create a new KitName.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Get the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for KitName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for KitName {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl From<String> for KitName {
    fn from(name: String) -> Self {
        Self(name)
    }
}

/// The name of a group in the external authorization store.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupName(String);

impl GroupName {
    /// Create a new GroupName.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Get the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GroupName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for GroupName {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl From<String> for GroupName {
    fn from(name: String) -> Self {
        Self(name)
    }
}

/// A durable principal identity in the external authorization store.
///
/// Callers are responsible for only passing identities worth persisting
/// group state for; ephemeral actors must be filtered at the host boundary.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActorId(String);

impl ActorId {
    /// Create a new ActorId.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the identity as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ActorId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ActorId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kit_name_display() {
        let kit = KitName::new("starter");
        assert_eq!(format!("{}", kit), "starter");
        assert_eq!(kit.as_str(), "starter");
    }

    #[test]
    fn test_names_are_ordered() {
        let a = GroupName::new("alpha");
        let b = GroupName::new("beta");
        assert!(a < b);
    }

    #[test]
    fn test_serde_transparent() {
        let actor = ActorId::new("76561197960000001");
        let json = serde_json::to_string(&actor).unwrap();
        assert_eq!(json, "\"76561197960000001\"");

        let back: ActorId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, actor);
    }
}
