//! The configuration data model.
//!
//! A configuration is a debug level plus a table mapping kit names to
//! group-assignment rules. The persisted form is a single JSON document
//! whose field names are part of the wire format and must not change:
//! `DebugLevel`, `Kits`, `Group`, `Duration (minutes)`.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ConfigError, Result};
use crate::types::{GroupName, KitName};

/// One group-assignment rule, keyed by kit name in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KitRule {
    /// The group the redeeming actor is added to.
    #[serde(rename = "Group")]
    pub group: GroupName,

    /// How long the membership lasts, in minutes.
    ///
    /// `0` means the membership persists until the next wipe. Any positive
    /// value requires the timed-grant collaborator to be available.
    #[serde(rename = "Duration (minutes)", default)]
    pub duration_minutes: u64,
}

impl KitRule {
    /// A rule whose membership persists until the next wipe.
    pub fn permanent(group: impl Into<GroupName>) -> Self {
        Self {
            group: group.into(),
            duration_minutes: 0,
        }
    }

    /// A rule whose membership expires after `minutes`.
    pub fn timed(group: impl Into<GroupName>, minutes: u64) -> Self {
        Self {
            group: group.into(),
            duration_minutes: minutes,
        }
    }

    /// Whether this rule needs the timed-grant collaborator.
    pub fn is_timed(&self) -> bool {
        self.duration_minutes != 0
    }
}

/// The root configuration document.
///
/// Loaded once at start-up, optionally rewritten in place if
/// reconciliation detected drift, and held read-only for the process
/// lifetime. Redemption events never mutate it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Configuration {
    /// Logging verbosity: 0 = silent, 1 = grants, 2 = grants plus
    /// redemption events and lookup misses. Higher implies all lower.
    #[serde(rename = "DebugLevel", default)]
    pub debug_level: u8,

    /// The rule table, keyed by kit name. Keys are unique; order is
    /// irrelevant, but a BTreeMap keeps the persisted output stable.
    #[serde(rename = "Kits", default)]
    pub kits: BTreeMap<KitName, KitRule>,
}

impl Configuration {
    /// Look up the rule for a kit by exact name match.
    pub fn rule(&self, kit: &KitName) -> Option<&KitRule> {
        self.kits.get(kit)
    }

    /// The distinct groups referenced by any rule.
    pub fn managed_groups(&self) -> BTreeSet<&GroupName> {
        self.kits.values().map(|rule| &rule.group).collect()
    }

    /// Whether grants should be logged.
    pub fn log_grants(&self) -> bool {
        self.debug_level >= 1
    }

    /// Whether redemption events and lookup misses should be logged.
    pub fn log_redemptions(&self) -> bool {
        self.debug_level >= 2
    }

    /// Encode into a JSON document tree.
    pub fn to_document(&self) -> Value {
        serde_json::to_value(self).expect("configuration serializes to JSON")
    }

    /// Decode from a JSON document tree.
    pub fn from_document(document: Value) -> Result<Self> {
        serde_json::from_value(document).map_err(|e| ConfigError::Malformed(e.to_string()))
    }

    /// The canonical schema-with-defaults document.
    ///
    /// This is what a freshly installed configuration looks like, and what
    /// loaded documents are reconciled against.
    pub fn default_document() -> Value {
        Self::default().to_document()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_field_names() {
        let mut config = Configuration {
            debug_level: 1,
            kits: BTreeMap::new(),
        };
        config
            .kits
            .insert(KitName::new("vip"), KitRule::timed("vip_group", 60));

        let doc = config.to_document();
        assert_eq!(doc["DebugLevel"], 1);
        assert_eq!(doc["Kits"]["vip"]["Group"], "vip_group");
        assert_eq!(doc["Kits"]["vip"]["Duration (minutes)"], 60);
    }

    #[test]
    fn test_document_roundtrip() {
        let mut config = Configuration::default();
        config
            .kits
            .insert(KitName::new("starter"), KitRule::permanent("kit_starter"));

        let recovered = Configuration::from_document(config.to_document()).unwrap();
        assert_eq!(recovered, config);
    }

    #[test]
    fn test_default_document_shape() {
        let doc = Configuration::default_document();
        assert_eq!(doc["DebugLevel"], 0);
        assert!(doc["Kits"].as_object().unwrap().is_empty());
    }

    #[test]
    fn test_missing_fields_default() {
        let config = Configuration::from_document(serde_json::json!({})).unwrap();
        assert_eq!(config.debug_level, 0);
        assert!(config.kits.is_empty());
    }

    #[test]
    fn test_malformed_document_rejected() {
        let err = Configuration::from_document(serde_json::json!({ "Kits": 5 }));
        assert!(err.is_err());
    }

    #[test]
    fn test_managed_groups_deduplicates() {
        let mut config = Configuration::default();
        config
            .kits
            .insert(KitName::new("a"), KitRule::permanent("vip"));
        config.kits.insert(KitName::new("b"), KitRule::timed("vip", 30));
        config
            .kits
            .insert(KitName::new("c"), KitRule::permanent("mvp"));

        let groups = config.managed_groups();
        assert_eq!(groups.len(), 2);
    }

    #[test]
    fn test_debug_level_ordering() {
        let silent = Configuration::default();
        assert!(!silent.log_grants());
        assert!(!silent.log_redemptions());

        let verbose = Configuration {
            debug_level: 2,
            kits: BTreeMap::new(),
        };
        assert!(verbose.log_grants());
        assert!(verbose.log_redemptions());
    }
}
