//! # kit-groups Testkit
//!
//! Testing utilities for kit-groups.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Fixtures**: The in-memory collaborators pre-wired into a ready
//!   plugin, with helpers for seeding kits, groups, and configuration
//!   documents.
//! - **Generators**: Proptest strategies for names, rules, whole
//!   configurations, and arbitrary JSON documents for reconciler
//!   properties.
//!
//! ## Test Fixtures
//!
//! Quickly set up a scenario:
//!
//! ```rust
//! use kit_groups_testkit::TestFixture;
//!
//! let fixture = TestFixture::new();
//! fixture.define_kit_and_group("starter", "kit_starter");
//!
//! let mut plugin = fixture.plugin_with_timed();
//! let report = plugin.on_start();
//! assert!(report.defaults_used);
//! ```
//!
//! ## Property Testing
//!
//! Use the generators with proptest:
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use kit_groups_testkit::generators::{configuration, document};
//!
//! proptest! {
//!     #[test]
//!     fn roundtrips(config in configuration()) {
//!         // ...
//!     }
//! }
//! ```

pub mod fixtures;
pub mod generators;

pub use fixtures::TestFixture;
