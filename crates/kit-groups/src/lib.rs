//! # kit-groups
//!
//! Grants and revokes group memberships when actors redeem kits, driven
//! by a declarative mapping from kit names to group-assignment rules.
//!
//! ## Overview
//!
//! - **Configuration**: A persisted JSON document mapping kit names to a
//!   group and a duration. Zero minutes means the membership persists
//!   until the next wipe; a positive duration routes through the
//!   timed-grant collaborator.
//! - **Reconciliation**: On start-up the persisted document is merged
//!   against the canonical schema-with-defaults; missing keys are
//!   repaired and saved back, operator data is never discarded.
//! - **Redemption**: Each redemption event maps to exactly one action:
//!   grant permanently, grant for a limited time, or nothing.
//! - **Wipe**: A new-save event revokes every membership of every managed
//!   group.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use kit_groups::{ActorId, KitGroups, KitName};
//! use kit_groups::store::{JsonFileConfigStore, MemoryGroupStore, MemoryKitCatalog};
//!
//! let config_store = Arc::new(JsonFileConfigStore::new("KitGroups.json"));
//! let kits = Arc::new(MemoryKitCatalog::new());
//! let groups = Arc::new(MemoryGroupStore::new());
//!
//! let mut plugin = KitGroups::new(config_store, kits, groups);
//! let report = plugin.on_start();
//!
//! plugin.on_redeemed(&ActorId::new("76561197960000001"), &KitName::new("starter"));
//! ```
//!
//! ## Re-exports
//!
//! This crate re-exports the component crates for convenience:
//!
//! - `kit_groups::core` - identifiers, configuration, reconciler
//! - `kit_groups::store` - collaborator traits and implementations
//! - `kit_groups::engine` - actions, validation, wipe planning

pub mod plugin;

// Re-export component crates
pub use kit_groups_core as core;
pub use kit_groups_engine as engine;
pub use kit_groups_store as store;

// Re-export main types for convenience
pub use plugin::{KitGroups, RedeemOutcome, StartReport};

// Re-export commonly used component types
pub use kit_groups_core::{reconcile, ActorId, Configuration, GroupName, KitName, KitRule};
pub use kit_groups_engine::{Action, Revocation, RuleEngine, ValidationIssue};
