//! # kit-groups Engine
//!
//! Rule evaluation for the kit-groups system.
//!
//! ## Overview
//!
//! The engine converts a redemption event plus a rule lookup into exactly
//! one [`Action`]: grant permanently, grant for a limited time, or do
//! nothing. It also validates the rule table against the collaborators at
//! start-up and plans the mass revocation a wipe implies.
//!
//! ## Key Concepts
//!
//! - **Action**: The one group-membership effect a redemption implies.
//! - **ValidationIssue**: A reported (never thrown) problem with a rule;
//!   the rule stays live and degrades softly.
//! - **Revocation**: One (group, member) pair to remove during a wipe.
//!
//! The engine never mutates anything: deciding, validating, and planning
//! are queries. Applying actions and revocations is the facade's job.

pub mod action;
pub mod engine;
pub mod validate;

pub use action::Action;
pub use engine::{Revocation, RuleEngine};
pub use validate::{validate_rules, ValidationIssue};
