//! Test fixtures and helpers.
//!
//! Common setup code for integration tests: the in-memory collaborators
//! pre-wired into a ready plugin.

use std::sync::Arc;

use serde_json::Value;

use kit_groups::KitGroups;
use kit_groups_store::{
    ConfigStore, GroupStore, KitCatalog, MemoryConfigStore, MemoryGroupStore, MemoryKitCatalog,
    MemoryTimedGrants, TimedGrantService,
};

/// A test fixture with every collaborator backed by memory.
///
/// The collaborators are public so tests can seed kits and groups and
/// assert on membership state after driving the plugin.
pub struct TestFixture {
    pub config_store: Arc<MemoryConfigStore>,
    pub kits: Arc<MemoryKitCatalog>,
    pub groups: Arc<MemoryGroupStore>,
    pub timed: Arc<MemoryTimedGrants>,
}

impl TestFixture {
    /// Create a fixture with no persisted configuration.
    pub fn new() -> Self {
        Self::with_store(MemoryConfigStore::new())
    }

    /// Create a fixture whose config store is seeded with a document.
    pub fn with_document(document: &Value) -> Self {
        Self::with_store(MemoryConfigStore::with_document(document))
    }

    /// Create a fixture whose config store is seeded with raw text,
    /// which need not be valid JSON.
    pub fn with_raw_config(text: impl Into<String>) -> Self {
        Self::with_store(MemoryConfigStore::with_raw(text))
    }

    fn with_store(config_store: MemoryConfigStore) -> Self {
        let groups = Arc::new(MemoryGroupStore::new());
        Self {
            config_store: Arc::new(config_store),
            kits: Arc::new(MemoryKitCatalog::new()),
            timed: Arc::new(MemoryTimedGrants::new(Arc::clone(&groups))),
            groups,
        }
    }

    /// Register a kit and the group its rule targets, so validation
    /// passes for a rule naming the pair.
    pub fn define_kit_and_group(&self, kit: &str, group: &str) {
        self.kits.define_kit(kit);
        self.groups.define_group(group);
    }

    /// Build a plugin without a timed-grant service.
    pub fn plugin(&self) -> KitGroups {
        KitGroups::new(
            Arc::clone(&self.config_store) as Arc<dyn ConfigStore>,
            Arc::clone(&self.kits) as Arc<dyn KitCatalog>,
            Arc::clone(&self.groups) as Arc<dyn GroupStore>,
        )
    }

    /// Build a plugin with the fixture's timed-grant service attached.
    pub fn plugin_with_timed(&self) -> KitGroups {
        self.plugin()
            .with_timed_grants(Arc::clone(&self.timed) as Arc<dyn TimedGrantService>)
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    use kit_groups::{ActorId, GroupName, KitName, RedeemOutcome};
    use kit_groups_store::GroupStore;

    #[test]
    fn test_fixture_runs_a_full_lifecycle() {
        let fixture = TestFixture::with_document(&json!({
            "DebugLevel": 0,
            "Kits": {
                "starter": { "Group": "kit_starter", "Duration (minutes)": 0 }
            }
        }));
        fixture.define_kit_and_group("starter", "kit_starter");

        let mut plugin = fixture.plugin_with_timed();
        let report = plugin.on_start();
        assert!(report.issues.is_empty());

        let actor = ActorId::new("actor-1");
        let outcome = plugin.on_redeemed(&actor, &KitName::new("starter"));
        assert_eq!(
            outcome,
            RedeemOutcome::Granted {
                group: GroupName::new("kit_starter")
            }
        );

        plugin.on_wipe();
        assert!(fixture
            .groups
            .list_members(&GroupName::new("kit_starter"))
            .is_empty());
    }

    #[test]
    fn test_fixture_without_timed_service_drops_timed_rules() {
        let fixture = TestFixture::with_document(&json!({
            "Kits": {
                "vip": { "Group": "vip_group", "Duration (minutes)": 15 }
            }
        }));
        fixture.define_kit_and_group("vip", "vip_group");

        let mut plugin = fixture.plugin();
        plugin.on_start();

        let outcome = plugin.on_redeemed(&ActorId::new("actor-1"), &KitName::new("vip"));
        assert!(matches!(outcome, RedeemOutcome::Dropped { .. }));
    }
}
