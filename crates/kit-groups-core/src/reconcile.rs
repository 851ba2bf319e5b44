//! Default-merge reconciliation of configuration documents.
//!
//! A loaded configuration document may be missing keys that the canonical
//! schema-with-defaults carries, typically after an upgrade added new
//! settings. [`reconcile`] walks the default document and copies every
//! missing subtree into the loaded document, leaving everything the
//! operator wrote untouched.
//!
//! The merge guarantees *key presence*, not type correctness: when a key
//! exists in both documents with different shapes, the loaded value wins,
//! even where the defaults carry a nested mapping. Keys present only in
//! the loaded document always survive verbatim, so operators may keep
//! ad hoc fields.
//!
//! The function is pure, deterministic, and idempotent: re-running it on
//! its own output never reports a change.

use serde_json::map::Entry;
use serde_json::{Map, Value};

/// Merge missing keys from `defaults` into `loaded`, recursively.
///
/// Returns `true` iff at least one key was added anywhere in the tree.
/// Arrays and scalars are opaque: copied wholesale when missing, never
/// element-merged. Non-object roots are left alone.
pub fn reconcile(defaults: &Value, loaded: &mut Value) -> bool {
    match (defaults, loaded) {
        (Value::Object(defaults), Value::Object(loaded)) => reconcile_objects(defaults, loaded),
        _ => false,
    }
}

fn reconcile_objects(defaults: &Map<String, Value>, loaded: &mut Map<String, Value>) -> bool {
    let mut changed = false;

    for (key, default_value) in defaults {
        match loaded.entry(key.clone()) {
            Entry::Vacant(slot) => {
                slot.insert(default_value.clone());
                changed = true;
            }
            Entry::Occupied(mut slot) => {
                // Only object-vs-object recurses. Anything else present in
                // the loaded document wins, whatever shape the defaults
                // expected.
                if let (Value::Object(default_child), Value::Object(loaded_child)) =
                    (default_value, slot.get_mut())
                {
                    changed |= reconcile_objects(default_child, loaded_child);
                }
            }
        }
    }

    changed
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn merged(defaults: &Value, loaded: &Value) -> (Value, bool) {
        let mut out = loaded.clone();
        let changed = reconcile(defaults, &mut out);
        (out, changed)
    }

    #[test]
    fn test_missing_top_level_key_added() {
        let defaults = json!({ "DebugLevel": 0, "Kits": {} });
        let (out, changed) = merged(&defaults, &json!({ "Kits": {} }));

        assert!(changed);
        assert_eq!(out, defaults);
    }

    #[test]
    fn test_missing_nested_key_added() {
        let defaults = json!({ "a": { "b": 1, "c": 2 } });
        let (out, changed) = merged(&defaults, &json!({ "a": { "b": 7 } }));

        assert!(changed);
        assert_eq!(out, json!({ "a": { "b": 7, "c": 2 } }));
    }

    #[test]
    fn test_identical_documents_unchanged() {
        let defaults = json!({ "a": 1, "b": { "c": true } });
        let (out, changed) = merged(&defaults, &defaults.clone());

        assert!(!changed);
        assert_eq!(out, defaults);
    }

    #[test]
    fn test_loaded_only_keys_preserved() {
        let defaults = json!({ "a": 1 });
        let loaded = json!({ "a": 2, "extra": { "anything": [1, 2, 3] } });
        let (out, changed) = merged(&defaults, &loaded);

        assert!(!changed);
        assert_eq!(out, loaded);
    }

    #[test]
    fn test_shape_mismatch_preserves_loaded_scalar() {
        // The defaults carry a nested mapping; the loaded document has a
        // scalar at that key. The scalar survives untouched.
        let defaults = json!({ "a": { "b": 1 } });
        let loaded = json!({ "a": 5 });
        let (out, changed) = merged(&defaults, &loaded);

        assert!(!changed);
        assert_eq!(out, loaded);
    }

    #[test]
    fn test_shape_mismatch_preserves_loaded_object() {
        let defaults = json!({ "a": 5 });
        let loaded = json!({ "a": { "b": 1 } });
        let (out, changed) = merged(&defaults, &loaded);

        assert!(!changed);
        assert_eq!(out, loaded);
    }

    #[test]
    fn test_arrays_are_opaque() {
        let defaults = json!({ "list": [1, 2, 3], "other": [] });
        let loaded = json!({ "list": [9] });
        let (out, changed) = merged(&defaults, &loaded);

        assert!(changed);
        assert_eq!(out, json!({ "list": [9], "other": [] }));
    }

    #[test]
    fn test_non_object_roots_untouched() {
        let mut loaded = json!(42);
        assert!(!reconcile(&json!({ "a": 1 }), &mut loaded));
        assert_eq!(loaded, json!(42));

        let mut object = json!({ "a": 1 });
        assert!(!reconcile(&json!("scalar default"), &mut object));
        assert_eq!(object, json!({ "a": 1 }));
    }

    #[test]
    fn test_upgrade_scenario() {
        // A loaded document that predates the DebugLevel setting but
        // carries an operator-added rule.
        let defaults = json!({
            "DebugLevel": 0,
            "Kits": {
                "starter": { "Group": "kit_starter", "Duration (minutes)": 0 }
            }
        });
        let loaded = json!({
            "Kits": {
                "starter": { "Group": "kit_starter", "Duration (minutes)": 0 },
                "vip": { "Group": "vip_group", "Duration (minutes)": 60 }
            }
        });

        let (out, changed) = merged(&defaults, &loaded);
        assert!(changed);
        assert_eq!(out["DebugLevel"], 0);
        assert_eq!(
            out["Kits"]["vip"],
            json!({ "Group": "vip_group", "Duration (minutes)": 60 })
        );
        assert_eq!(out["Kits"]["starter"], defaults["Kits"]["starter"]);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        fn arb_scalar() -> impl Strategy<Value = Value> {
            prop_oneof![
                Just(Value::Null),
                any::<bool>().prop_map(Value::Bool),
                any::<i64>().prop_map(Value::from),
                "[a-z0-9 ]{0,12}".prop_map(Value::String),
            ]
        }

        fn arb_document() -> impl Strategy<Value = Value> {
            arb_scalar().prop_recursive(4, 32, 4, |inner| {
                prop_oneof![
                    prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
                    prop::collection::btree_map("[a-z]{1,6}", inner, 0..4)
                        .prop_map(|entries| Value::Object(entries.into_iter().collect())),
                ]
            })
        }

        /// Every key of `defaults` exists in `merged`, recursing wherever
        /// both sides are objects.
        fn keys_present(defaults: &Value, merged: &Value) -> bool {
            match (defaults, merged) {
                (Value::Object(defaults), Value::Object(merged)) => {
                    defaults.iter().all(|(key, default_value)| {
                        merged
                            .get(key)
                            .is_some_and(|merged_value| keys_present(default_value, merged_value))
                    })
                }
                _ => true,
            }
        }

        /// Everything the loaded document contained is still there: keys
        /// survive, and values that are not objects are bit-identical.
        fn preserves(original: &Value, merged: &Value) -> bool {
            match (original, merged) {
                (Value::Object(original), Value::Object(merged)) => {
                    original.iter().all(|(key, original_value)| match merged.get(key) {
                        Some(merged_value) => preserves(original_value, merged_value),
                        None => false,
                    })
                }
                _ => original == merged,
            }
        }

        proptest! {
            #[test]
            fn reconcile_is_idempotent(defaults in arb_document(), loaded in arb_document()) {
                let mut once = loaded.clone();
                reconcile(&defaults, &mut once);

                let mut twice = once.clone();
                let changed_again = reconcile(&defaults, &mut twice);

                prop_assert!(!changed_again);
                prop_assert_eq!(twice, once);
            }

            #[test]
            fn reconcile_guarantees_key_presence(defaults in arb_document(), loaded in arb_document()) {
                let mut out = loaded;
                reconcile(&defaults, &mut out);
                prop_assert!(keys_present(&defaults, &out));
            }

            #[test]
            fn reconcile_preserves_loaded_data(defaults in arb_document(), loaded in arb_document()) {
                let mut out = loaded.clone();
                reconcile(&defaults, &mut out);
                prop_assert!(preserves(&loaded, &out));
            }

            #[test]
            fn changed_iff_document_differs(defaults in arb_document(), loaded in arb_document()) {
                let mut out = loaded.clone();
                let changed = reconcile(&defaults, &mut out);
                prop_assert_eq!(changed, out != loaded);
            }
        }
    }
}
