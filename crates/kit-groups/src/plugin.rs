//! The plugin facade: collaborators, lifecycle, and logging.
//!
//! [`KitGroups`] wires the rule engine to the injected collaborators and
//! exposes the three entry points an external event source drives:
//! [`on_start`], [`on_redeemed`], and [`on_wipe`]. No error and no panic
//! crosses these boundaries; every failure path resolves to "log and
//! continue" or "log and no-op".
//!
//! [`on_start`]: KitGroups::on_start
//! [`on_redeemed`]: KitGroups::on_redeemed
//! [`on_wipe`]: KitGroups::on_wipe

use std::sync::Arc;

use serde_json::Value;

use kit_groups_core::{reconcile, ActorId, Configuration, GroupName, KitName};
use kit_groups_engine::{Action, Revocation, RuleEngine, ValidationIssue};
use kit_groups_store::{ConfigStore, GroupStore, KitCatalog, TimedGrantService};

/// What start-up found and did.
#[derive(Debug, Clone)]
pub struct StartReport {
    /// The persisted document was missing keys; it was repaired and saved.
    pub reconciled: bool,
    /// The persisted document was absent or invalid; canonical defaults
    /// are in effect.
    pub defaults_used: bool,
    /// Problems found in the configured rules. Already logged; the rules
    /// stay live regardless.
    pub issues: Vec<ValidationIssue>,
}

/// What a redemption event resulted in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RedeemOutcome {
    /// No rule is configured for the kit; nothing happened.
    NoRule,

    /// The actor was added to the group until the next wipe.
    Granted {
        /// The group granted.
        group: GroupName,
    },

    /// The actor was added to the group through the timed-grant service.
    GrantedTimed {
        /// The group granted.
        group: GroupName,
        /// Minutes until expiry.
        minutes: u64,
    },

    /// The rule is timed but no timed-grant service is available. The
    /// event was dropped with no membership change.
    Dropped {
        /// The group the rule would have granted.
        group: GroupName,
        /// The configured duration.
        minutes: u64,
    },
}

/// The kit-groups plugin.
///
/// Holds the loaded configuration (read-only after [`on_start`]) and the
/// injected collaborators. The timed-grant service is optional; hosts
/// without one still run, and timed rules degrade softly.
///
/// Callers must filter non-durable actors (NPCs, ephemeral or bot
/// identities) before invoking [`on_redeemed`]: every [`ActorId`] passed
/// in is assumed to be a principal worth persisting group state for.
///
/// [`on_start`]: KitGroups::on_start
/// [`on_redeemed`]: KitGroups::on_redeemed
pub struct KitGroups {
    engine: RuleEngine,
    config_store: Arc<dyn ConfigStore>,
    kits: Arc<dyn KitCatalog>,
    groups: Arc<dyn GroupStore>,
    timed_grants: Option<Arc<dyn TimedGrantService>>,
}

impl KitGroups {
    /// Create a plugin over the required collaborators.
    ///
    /// The configuration starts at its defaults; call [`on_start`] to load
    /// the persisted document.
    ///
    /// [`on_start`]: KitGroups::on_start
    pub fn new(
        config_store: Arc<dyn ConfigStore>,
        kits: Arc<dyn KitCatalog>,
        groups: Arc<dyn GroupStore>,
    ) -> Self {
        Self {
            engine: RuleEngine::new(Configuration::default()),
            config_store,
            kits,
            groups,
            timed_grants: None,
        }
    }

    /// Attach the optional timed-grant service.
    pub fn with_timed_grants(mut self, service: Arc<dyn TimedGrantService>) -> Self {
        self.timed_grants = Some(service);
        self
    }

    /// The configuration currently in effect.
    pub fn config(&self) -> &Configuration {
        self.engine.config()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Start-up
    // ─────────────────────────────────────────────────────────────────────────

    /// Load, reconcile, and validate the configuration.
    ///
    /// Replaces any previously loaded configuration wholesale. Safe to
    /// call again to pick up an edited document.
    pub fn on_start(&mut self) -> StartReport {
        let defaults = Configuration::default_document();
        let (config, reconciled, defaults_used) = self.load_config(&defaults);
        self.engine = RuleEngine::new(config);

        let issues = self.engine.validate(
            self.kits.as_ref(),
            self.groups.as_ref(),
            self.timed_grants.is_some(),
        );
        for issue in &issues {
            tracing::error!("{}", issue);
        }

        StartReport {
            reconciled,
            defaults_used,
            issues,
        }
    }

    /// Load the persisted document and repair drift against `defaults`.
    fn load_config(&self, defaults: &Value) -> (Configuration, bool, bool) {
        let mut document = match self.config_store.load() {
            Ok(Some(document)) => document,
            Ok(None) => {
                tracing::warn!("No configuration found; creating defaults");
                if let Err(e) = self.config_store.save(defaults) {
                    tracing::error!("Failed to save default configuration: {}", e);
                }
                return (Configuration::default(), false, true);
            }
            Err(e) => {
                tracing::error!("{}", e);
                tracing::warn!("Configuration file is invalid; using defaults");
                return (Configuration::default(), false, true);
            }
        };

        let reconciled = reconcile(defaults, &mut document);
        if reconciled {
            tracing::warn!("Configuration appears to be outdated; updating and saving");
            match self.config_store.save(&document) {
                Ok(()) => tracing::info!("Configuration changes saved"),
                Err(e) => tracing::error!("Failed to save updated configuration: {}", e),
            }
        }

        match Configuration::from_document(document) {
            Ok(config) => (config, reconciled, false),
            Err(e) => {
                tracing::error!("{}", e);
                tracing::warn!("Configuration file is invalid; using defaults");
                (Configuration::default(), reconciled, true)
            }
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Redemption
    // ─────────────────────────────────────────────────────────────────────────

    /// Handle a kit-redemption event.
    ///
    /// Looks up the rule for `kit` and applies the one action it implies.
    /// Re-redeeming while already a member is a no-op at the group store,
    /// so re-entry is idempotent.
    pub fn on_redeemed(&self, actor: &ActorId, kit: &KitName) -> RedeemOutcome {
        let config = self.engine.config();

        if config.log_redemptions() {
            tracing::info!("Actor {} redeemed kit {}", actor, kit);
        }

        match self.engine.decide(kit) {
            Action::None => {
                if config.log_redemptions() {
                    tracing::info!("Kit {} has no group configuration", kit);
                }
                RedeemOutcome::NoRule
            }
            Action::GrantPermanent { group } => {
                if config.log_grants() {
                    tracing::info!("Adding {} to group {} until next wipe", actor, group);
                }
                self.groups.add_member(actor, &group);
                RedeemOutcome::Granted { group }
            }
            Action::GrantTimed { group, minutes } => match &self.timed_grants {
                Some(service) => {
                    if config.log_grants() {
                        tracing::info!(
                            "Adding {} to group {} for {} minutes",
                            actor,
                            group,
                            minutes
                        );
                    }
                    service.grant_timed(actor, &group, minutes);
                    RedeemOutcome::GrantedTimed { group, minutes }
                }
                None => {
                    tracing::error!(
                        "Unable to add {} to group {}: no timed-grant service is available",
                        actor,
                        group
                    );
                    RedeemOutcome::Dropped { group, minutes }
                }
            },
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Wipe Sweep
    // ─────────────────────────────────────────────────────────────────────────

    /// Handle a new-save/wipe event: revoke every membership of every
    /// managed group.
    ///
    /// The sweep is not scoped to memberships this plugin granted;
    /// anything in a managed group is removed, whatever put it there.
    /// Returns the revocations that were applied.
    pub fn on_wipe(&self) -> Vec<Revocation> {
        let plan = self.engine.wipe_plan(self.groups.as_ref());

        for revocation in &plan {
            self.groups.remove_member(&revocation.actor, &revocation.group);
        }

        tracing::info!(
            "Wipe: revoked {} memberships across {} managed groups",
            plan.len(),
            self.engine.config().managed_groups().len()
        );

        plan
    }
}
