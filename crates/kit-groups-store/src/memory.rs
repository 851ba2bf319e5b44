//! In-memory implementations of the collaborator traits.
//!
//! These back the test suites and double as real collaborators for
//! in-process hosts. All of them are thread-safe via RwLock and keep the
//! same observable semantics as production implementations.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Arc, RwLock};

use serde_json::Value;

use kit_groups_core::{ActorId, GroupName, KitName};

use crate::error::{Result, StoreError};
use crate::traits::{ConfigStore, GroupStore, KitCatalog, TimedGrantService};

/// In-memory group store.
#[derive(Default)]
pub struct MemoryGroupStore {
    groups: RwLock<BTreeMap<GroupName, BTreeSet<ActorId>>>,
}

impl MemoryGroupStore {
    /// Create a new empty group store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a group with no members.
    pub fn define_group(&self, group: impl Into<GroupName>) {
        self.groups
            .write()
            .unwrap()
            .entry(group.into())
            .or_default();
    }

    /// Whether an actor is currently a member of a group.
    pub fn is_member(&self, actor: &ActorId, group: &GroupName) -> bool {
        self.groups
            .read()
            .unwrap()
            .get(group)
            .is_some_and(|members| members.contains(actor))
    }
}

impl GroupStore for MemoryGroupStore {
    fn group_exists(&self, group: &GroupName) -> bool {
        self.groups.read().unwrap().contains_key(group)
    }

    fn add_member(&self, actor: &ActorId, group: &GroupName) {
        // Creates the group if needed; inserting an existing member is a
        // set no-op, which gives the idempotence the contract requires.
        self.groups
            .write()
            .unwrap()
            .entry(group.clone())
            .or_default()
            .insert(actor.clone());
    }

    fn remove_member(&self, actor: &ActorId, group: &GroupName) {
        if let Some(members) = self.groups.write().unwrap().get_mut(group) {
            members.remove(actor);
        }
    }

    fn list_members(&self, group: &GroupName) -> Vec<ActorId> {
        self.groups
            .read()
            .unwrap()
            .get(group)
            .map(|members| members.iter().cloned().collect())
            .unwrap_or_default()
    }
}

/// In-memory kit catalog.
#[derive(Default)]
pub struct MemoryKitCatalog {
    kits: RwLock<BTreeSet<KitName>>,
}

impl MemoryKitCatalog {
    /// Create a new empty kit catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a kit name.
    pub fn define_kit(&self, kit: impl Into<KitName>) {
        self.kits.write().unwrap().insert(kit.into());
    }
}

impl KitCatalog for MemoryKitCatalog {
    fn kit_exists(&self, kit: &KitName) -> bool {
        self.kits.read().unwrap().contains(kit)
    }
}

/// One grant issued through [`MemoryTimedGrants`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimedGrant {
    /// The actor the membership was granted to.
    pub actor: ActorId,
    /// The group granted.
    pub group: GroupName,
    /// The requested duration in minutes.
    pub minutes: u64,
}

/// In-memory timed-grant service.
///
/// Mirrors the real collaborator's contract: the membership is applied
/// immediately through the shared group store, and the pending expiry is
/// tracked internally. Tests drive expiry explicitly with [`expire`].
///
/// [`expire`]: MemoryTimedGrants::expire
pub struct MemoryTimedGrants {
    groups: Arc<MemoryGroupStore>,
    grants: RwLock<Vec<TimedGrant>>,
}

impl MemoryTimedGrants {
    /// Create a timed-grant service applying memberships to `groups`.
    pub fn new(groups: Arc<MemoryGroupStore>) -> Self {
        Self {
            groups,
            grants: RwLock::new(Vec::new()),
        }
    }

    /// All grants issued so far, in order.
    pub fn grants(&self) -> Vec<TimedGrant> {
        self.grants.read().unwrap().clone()
    }

    /// Simulate the expiry of a pending grant: the membership is removed
    /// and the grant record dropped. No-op if no such grant is pending.
    pub fn expire(&self, actor: &ActorId, group: &GroupName) {
        let mut grants = self.grants.write().unwrap();
        let before = grants.len();
        grants.retain(|grant| !(&grant.actor == actor && &grant.group == group));
        if grants.len() != before {
            self.groups.remove_member(actor, group);
        }
    }
}

impl TimedGrantService for MemoryTimedGrants {
    fn grant_timed(&self, actor: &ActorId, group: &GroupName, minutes: u64) {
        self.groups.add_member(actor, group);
        self.grants.write().unwrap().push(TimedGrant {
            actor: actor.clone(),
            group: group.clone(),
            minutes,
        });
    }
}

/// In-memory configuration store.
///
/// Holds the serialized document text rather than the parsed tree so that
/// load behaves exactly like a file-backed store, including the failure
/// mode of unparseable content.
#[derive(Default)]
pub struct MemoryConfigStore {
    text: RwLock<Option<String>>,
}

impl MemoryConfigStore {
    /// Create a store with no persisted document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store seeded with a document.
    pub fn with_document(document: &Value) -> Self {
        Self {
            text: RwLock::new(Some(document.to_string())),
        }
    }

    /// Create a store seeded with raw text, which need not be valid JSON.
    pub fn with_raw(text: impl Into<String>) -> Self {
        Self {
            text: RwLock::new(Some(text.into())),
        }
    }
}

impl ConfigStore for MemoryConfigStore {
    fn load(&self) -> Result<Option<Value>> {
        match self.text.read().unwrap().as_deref() {
            None => Ok(None),
            Some(text) => serde_json::from_str(text)
                .map(Some)
                .map_err(|e| StoreError::Malformed(e.to_string())),
        }
    }

    fn save(&self, document: &Value) -> Result<()> {
        let text = serde_json::to_string_pretty(document)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        *self.text.write().unwrap() = Some(text);
        Ok(())
    }
}
