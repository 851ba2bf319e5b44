//! Proptest generators for property-based testing.

use proptest::prelude::*;
use serde_json::Value;

use kit_groups_core::{ActorId, Configuration, GroupName, KitName, KitRule};

/// Generate a kit name.
pub fn kit_name() -> impl Strategy<Value = KitName> {
    "[a-z][a-z0-9-]{0,15}".prop_map(KitName::new)
}

/// Generate a group name.
pub fn group_name() -> impl Strategy<Value = GroupName> {
    "[a-z][a-z0-9_]{0,15}".prop_map(GroupName::new)
}

/// Generate an actor identity.
pub fn actor_id() -> impl Strategy<Value = ActorId> {
    "7656119[0-9]{10}".prop_map(ActorId::new)
}

/// Generate a duration in minutes, biased toward the permanent sentinel.
pub fn duration_minutes() -> impl Strategy<Value = u64> {
    prop_oneof![
        2 => Just(0u64),
        3 => 1u64..=100_000,
    ]
}

/// Generate a single rule.
pub fn kit_rule() -> impl Strategy<Value = KitRule> {
    (group_name(), duration_minutes()).prop_map(|(group, duration_minutes)| KitRule {
        group,
        duration_minutes,
    })
}

/// Generate a whole configuration.
pub fn configuration() -> impl Strategy<Value = Configuration> {
    (
        0u8..=2,
        prop::collection::btree_map(kit_name(), kit_rule(), 0..8),
    )
        .prop_map(|(debug_level, kits)| Configuration { debug_level, kits })
}

/// Generate a scalar JSON value.
pub fn scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::from),
        "[a-z0-9 ]{0,12}".prop_map(Value::String),
    ]
}

/// Generate an arbitrary JSON document tree, for reconciler properties.
pub fn document() -> impl Strategy<Value = Value> {
    scalar().prop_recursive(4, 32, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            prop::collection::btree_map("[a-z]{1,6}", inner, 0..4)
                .prop_map(|entries| Value::Object(entries.into_iter().collect())),
        ]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    proptest! {
        #[test]
        fn generated_configurations_roundtrip_through_documents(config in configuration()) {
            let recovered = Configuration::from_document(config.to_document()).unwrap();
            prop_assert_eq!(recovered, config);
        }

        #[test]
        fn generated_documents_survive_reconciliation(defaults in document(), loaded in document()) {
            let mut merged = loaded;
            kit_groups_core::reconcile(&defaults, &mut merged);

            // Whatever the merge did, the result is still a plain JSON
            // tree a config store can persist.
            let text = merged.to_string();
            let back: Value = serde_json::from_str(&text).unwrap();
            prop_assert_eq!(back, merged);
        }
    }
}
