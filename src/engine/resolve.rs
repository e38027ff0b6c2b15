// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Precedence resolver
//!
//! Merges an explicit value with its default tiers into one effective value:
//!
//! - scalars: the first tier holding a non-empty, non-null value wins
//! - arrays: the first tier holding a non-empty array wins wholesale; rows
//!   from different tiers are never spliced together
//! - objects: merged field by field, recursively, into a new object
//!
//! Tiers are checked strictly in order and the merge is total.

use serde_json::{Map, Value};

use super::value::is_absent;
use crate::model::Record;

/// Resolve `explicit` against its default tiers, most specific first.
///
/// Missing tiers (`None`) are skipped, which makes a missing hard default the
/// same as an empty one.
pub fn resolve(explicit: Option<&Value>, defaults: &[Option<&Value>]) -> Value {
    let tiers: Vec<&Value> = explicit
        .into_iter()
        .chain(defaults.iter().flatten().copied())
        .collect();
    resolve_tiers(&tiers)
}

fn resolve_tiers(tiers: &[&Value]) -> Value {
    let Some(chosen) = tiers.iter().find(|tier| !is_absent(tier)) else {
        // Every tier is absent: keep the most specific shape ("" or [] over null).
        return tiers
            .iter()
            .find(|tier| !tier.is_null())
            .map(|tier| (*tier).clone())
            .unwrap_or(Value::Null);
    };

    match chosen {
        Value::Object(_) => {
            let objects: Vec<&Map<String, Value>> =
                tiers.iter().filter_map(|tier| tier.as_object()).collect();
            let mut merged = Map::new();
            for object in &objects {
                for key in object.keys() {
                    if merged.contains_key(key) {
                        continue;
                    }
                    let field_tiers: Vec<&Value> =
                        objects.iter().filter_map(|o| o.get(key)).collect();
                    merged.insert(key.clone(), resolve_tiers(&field_tiers));
                }
            }
            Value::Object(merged)
        }
        other => (*other).clone(),
    }
}

/// Typed resolution for a record kind.
///
/// Works on the serialized form of each tier. If the merged value no longer
/// decodes (a tier of the wrong shape), the explicit record is kept, falling
/// back to the record's zero value.
pub fn resolve_record<T: Record>(explicit: Option<&T>, defaults: &[Option<&T>]) -> T {
    let explicit_value = explicit.map(Record::to_value);
    let default_values: Vec<Option<Value>> = defaults
        .iter()
        .map(|tier| tier.map(Record::to_value))
        .collect();
    let default_refs: Vec<Option<&Value>> = default_values.iter().map(Option::as_ref).collect();

    let merged = resolve(explicit_value.as_ref(), &default_refs);
    T::from_value(merged).unwrap_or_else(|err| {
        tracing::warn!("resolved record no longer decodes: {}", err);
        explicit.cloned().unwrap_or_default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Header;
    use serde_json::json;

    #[test]
    fn test_scalar_first_non_empty_wins() {
        let resolved = resolve(Some(&json!("")), &[Some(&json!(null)), Some(&json!("hard"))]);
        assert_eq!(resolved, json!("hard"));
    }

    #[test]
    fn test_false_and_zero_are_values() {
        assert_eq!(resolve(Some(&json!(false)), &[Some(&json!(true))]), json!(false));
        assert_eq!(resolve(Some(&json!(0)), &[Some(&json!(7))]), json!(0));
    }

    #[test]
    fn test_all_absent_keeps_shape() {
        assert_eq!(resolve(None, &[Some(&json!("")), Some(&json!(null))]), json!(""));
        assert_eq!(resolve(Some(&json!(null)), &[None]), json!(null));
        assert_eq!(resolve(Some(&json!([])), &[Some(&json!([]))]), json!([]));
    }

    #[test]
    fn test_array_first_non_empty_wins_wholesale() {
        let explicit = json!(["a"]);
        let default = json!(["x", "y", "z"]);
        assert_eq!(resolve(Some(&explicit), &[Some(&default)]), json!(["a"]));
        assert_eq!(resolve(Some(&json!([])), &[Some(&default)]), default);
    }

    #[test]
    fn test_record_arrays_are_not_spliced() {
        let explicit = json!([{"key": "X-A", "value": ""}]);
        let default = json!([{"key": "X-B", "value": "b"}, {"key": "X-C", "value": "c"}]);
        assert_eq!(resolve(Some(&explicit), &[Some(&default)]), explicit);
    }

    #[test]
    fn test_nested_objects_merge_field_by_field() {
        let explicit = json!({"options": {"interval": ""}, "name": "svc"});
        let entity = json!({"options": {"interval": "5m", "active": true}});
        let hard = json!({"options": {"interval": "10m", "semantic_versioning": true}});

        let resolved = resolve(Some(&explicit), &[Some(&entity), Some(&hard)]);
        assert_eq!(
            resolved,
            json!({
                "name": "svc",
                "options": {"interval": "5m", "active": true, "semantic_versioning": true}
            })
        );
    }

    #[test]
    fn test_object_returned_even_if_all_from_defaults() {
        let resolved = resolve(Some(&json!({})), &[Some(&json!({"a": {"b": 1}}))]);
        assert_eq!(resolved, json!({"a": {"b": 1}}));
    }

    #[test]
    fn test_missing_explicit_is_empty_object() {
        let resolved = resolve(None, &[Some(&json!({"a": 1})), None]);
        assert_eq!(resolved, json!({"a": 1}));
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let explicit = json!({"a": "", "b": [], "c": {"d": null}});
        let d1 = json!({"a": "x", "c": {"d": "y"}});
        let d2 = json!({"b": [1], "e": ""});

        let once = resolve(Some(&explicit), &[Some(&d1), Some(&d2)]);
        let twice = resolve(Some(&once), &[Some(&d1), Some(&d2)]);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_resolve_record_typed() {
        let explicit = Header::new("X-Token", "");
        let default = Header::new("", "secret");
        let resolved = resolve_record(Some(&explicit), &[Some(&default)]);
        assert_eq!(resolved, Header::new("X-Token", "secret"));
    }
}
