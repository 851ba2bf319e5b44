//! The rule engine: maps redemption events to actions and plans wipe
//! sweeps.
//!
//! The engine holds the loaded configuration read-only. Every method is a
//! pure query over the rule table plus, for the wipe plan, the group
//! store's current membership; nothing here mutates collaborator state.

use kit_groups_core::{ActorId, Configuration, GroupName, KitName};
use kit_groups_store::{GroupStore, KitCatalog};

use crate::action::Action;
use crate::validate::{validate_rules, ValidationIssue};

/// One membership to revoke during a wipe sweep.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Revocation {
    /// The managed group.
    pub group: GroupName,
    /// The member to remove.
    pub actor: ActorId,
}

/// Evaluates the configured rule table.
#[derive(Debug, Clone)]
pub struct RuleEngine {
    config: Configuration,
}

impl RuleEngine {
    /// Create an engine over a loaded configuration.
    pub fn new(config: Configuration) -> Self {
        Self { config }
    }

    /// The configuration this engine evaluates.
    pub fn config(&self) -> &Configuration {
        &self.config
    }

    /// Check every configured rule against the collaborators.
    pub fn validate(
        &self,
        kits: &dyn KitCatalog,
        groups: &dyn GroupStore,
        timed_grants_available: bool,
    ) -> Vec<ValidationIssue> {
        validate_rules(&self.config, kits, groups, timed_grants_available)
    }

    /// Decide what a redemption of `kit` implies.
    ///
    /// Exact string match against the rule table; [`Action::None`] when no
    /// rule is configured. The decision does not depend on who redeemed:
    /// re-deciding for an actor who already holds the membership yields
    /// the same action, and applying it again is idempotent downstream.
    pub fn decide(&self, kit: &KitName) -> Action {
        match self.config.rule(kit) {
            None => Action::None,
            Some(rule) if rule.is_timed() => Action::GrantTimed {
                group: rule.group.clone(),
                minutes: rule.duration_minutes,
            },
            Some(rule) => Action::GrantPermanent {
                group: rule.group.clone(),
            },
        }
    }

    /// Plan the mass revocation a wipe implies.
    ///
    /// For every distinct group referenced by any rule, one revocation per
    /// current member. This is a full sweep: memberships granted by
    /// unrelated mechanisms are revoked too. That conflation of "managed
    /// by this system" with "any membership in a managed group" is
    /// intentional and kept for compatibility with existing deployments.
    pub fn wipe_plan(&self, groups: &dyn GroupStore) -> Vec<Revocation> {
        let mut revocations = Vec::new();

        for group in self.config.managed_groups() {
            for actor in groups.list_members(group) {
                revocations.push(Revocation {
                    group: group.clone(),
                    actor,
                });
            }
        }

        revocations
    }
}
