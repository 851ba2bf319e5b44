//! # kit-groups Store
//!
//! Collaborator abstractions for kit-groups. The core never talks to a
//! group database, a kit plugin, or the filesystem directly; it goes
//! through the narrow traits defined here.
//!
//! ## Key Types
//!
//! - [`GroupStore`] - the external permission/group storage subsystem
//! - [`KitCatalog`] - kit existence queries
//! - [`TimedGrantService`] - the optional timed-grant scheduler
//! - [`ConfigStore`] - persistence for the configuration document
//! - [`JsonFileConfigStore`] - file-backed configuration persistence
//! - [`MemoryGroupStore`] and friends - in-memory implementations for
//!   tests and in-process hosts
//!
//! ## Design Notes
//!
//! - All calls are synchronous and in-process; there is no async surface.
//! - Group mutations are idempotent at this boundary, which is what makes
//!   redemption re-entry a safe no-op upstream.
//! - The timed-grant service is optional by design: hosts without it still
//!   run, and timed rules degrade softly.

pub mod error;
pub mod file;
pub mod memory;
pub mod traits;

pub use error::{Result, StoreError};
pub use file::JsonFileConfigStore;
pub use memory::{
    MemoryConfigStore, MemoryGroupStore, MemoryKitCatalog, MemoryTimedGrants, TimedGrant,
};
pub use traits::{ConfigStore, GroupStore, KitCatalog, TimedGrantService};
