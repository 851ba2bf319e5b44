//! The action a redemption event implies.

use kit_groups_core::GroupName;

/// Exactly one of these is emitted per redemption event.
///
/// The engine only decides; applying the action (and handling a missing
/// timed-grant collaborator) is the caller's job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// No rule is configured for the redeemed kit.
    None,

    /// Add the actor to the group until the next wipe.
    GrantPermanent {
        /// The group to grant.
        group: GroupName,
    },

    /// Add the actor to the group for a limited time.
    GrantTimed {
        /// The group to grant.
        group: GroupName,
        /// Minutes until the membership expires.
        minutes: u64,
    },
}

impl Action {
    /// The group this action grants, if any.
    pub fn group(&self) -> Option<&GroupName> {
        match self {
            Action::None => None,
            Action::GrantPermanent { group } => Some(group),
            Action::GrantTimed { group, .. } => Some(group),
        }
    }
}
