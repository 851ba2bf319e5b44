//! Collaborator traits: the abstract interfaces to the external services
//! the kit-groups core depends on.
//!
//! Every call is a synchronous, in-process call assumed to be fast; none
//! of these traits model network I/O. Implementations carry their own
//! thread-safety (hence the `Send + Sync` bounds) so hosts may deliver
//! events from any thread.

use serde_json::Value;

use kit_groups_core::{ActorId, GroupName, KitName};

use crate::error::Result;

/// The external permission/group storage subsystem.
///
/// # Design Notes
///
/// - **Idempotent mutations**: adding a member twice, or removing an
///   absent member, is a no-op, not an error. The core relies on this for
///   idempotent redemption re-entry.
/// - Membership state is owned entirely by the implementation; the core
///   never caches it.
pub trait GroupStore: Send + Sync {
    /// Whether a group exists.
    fn group_exists(&self, group: &GroupName) -> bool;

    /// Add an actor to a group. Idempotent.
    fn add_member(&self, actor: &ActorId, group: &GroupName);

    /// Remove an actor from a group. Idempotent, no-op if absent.
    fn remove_member(&self, actor: &ActorId, group: &GroupName);

    /// All current members of a group.
    fn list_members(&self, group: &GroupName) -> Vec<ActorId>;
}

/// The external kit catalog.
pub trait KitCatalog: Send + Sync {
    /// Whether a kit with this name is defined.
    fn kit_exists(&self, kit: &KitName) -> bool;
}

/// The external timed-grant scheduler.
///
/// This collaborator is optional; its absence is a valid, detectable
/// state. An implementation adds the membership itself and is internally
/// responsible for the eventual automatic removal - the core only
/// triggers the grant, it never tracks expiry.
pub trait TimedGrantService: Send + Sync {
    /// Add an actor to a group for a limited number of minutes.
    fn grant_timed(&self, actor: &ActorId, group: &GroupName, minutes: u64);
}

/// Persistence for the configuration document.
///
/// The document is an opaque JSON tree at this layer; decoding it into a
/// typed configuration (and falling back to defaults when that fails) is
/// the caller's concern.
pub trait ConfigStore: Send + Sync {
    /// Load the persisted document, or `None` if none was ever saved.
    fn load(&self) -> Result<Option<Value>>;

    /// Persist the document, replacing any previous one.
    fn save(&self, document: &Value) -> Result<()>;
}
