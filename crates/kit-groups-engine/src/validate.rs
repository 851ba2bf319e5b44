//! Start-up validation of the configured rule table.
//!
//! Issues are reported, never thrown: an offending rule stays in the
//! table and degrades softly if triggered. Validation never halts
//! start-up.

use std::fmt;

use kit_groups_core::{Configuration, GroupName, KitName};
use kit_groups_store::{GroupStore, KitCatalog};

/// A problem found in one configured rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationIssue {
    /// The rule names a kit the catalog does not know.
    UnknownKit {
        /// The configured kit name.
        kit: KitName,
    },

    /// The rule names a group the group store does not know.
    UnknownGroup {
        /// The configured kit name.
        kit: KitName,
        /// The group it references.
        group: GroupName,
    },

    /// The rule has a duration but no timed-grant service is available.
    TimedGrantUnavailable {
        /// The configured kit name.
        kit: KitName,
    },
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationIssue::UnknownKit { kit } => {
                write!(f, "Kit '{kit}' does not exist.")
            }
            ValidationIssue::UnknownGroup { kit, group } => {
                write!(f, "Kit '{kit}' specifies group '{group}' which does not exist.")
            }
            ValidationIssue::TimedGrantUnavailable { kit } => {
                write!(
                    f,
                    "Kit '{kit}' has duration enabled, but no timed-grant service is available."
                )
            }
        }
    }
}

/// Check every configured rule against the collaborators.
///
/// Each failing check emits its own issue, so a single rule can yield
/// several. The rule order of the table is preserved in the output.
pub fn validate_rules(
    config: &Configuration,
    kits: &dyn KitCatalog,
    groups: &dyn GroupStore,
    timed_grants_available: bool,
) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    for (kit, rule) in &config.kits {
        if !kits.kit_exists(kit) {
            issues.push(ValidationIssue::UnknownKit { kit: kit.clone() });
        }

        if !groups.group_exists(&rule.group) {
            issues.push(ValidationIssue::UnknownGroup {
                kit: kit.clone(),
                group: rule.group.clone(),
            });
        }

        if rule.is_timed() && !timed_grants_available {
            issues.push(ValidationIssue::TimedGrantUnavailable { kit: kit.clone() });
        }
    }

    issues
}
