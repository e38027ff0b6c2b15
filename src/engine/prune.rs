// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Empty-leaf pruning for outgoing payloads.

use serde_json::{Map, Value};

use super::value::{join_path, last_segment};

/// Drop every empty leaf: `null`, `""`, and arrays or objects left empty once
/// their own members are pruned. Returns `None` when nothing is left.
///
/// Fields named in `keep` are meaningful even when empty and are copied as-is,
/// together with everything beneath them. Entries match a field by its full
/// dotted path or by its last segment; array rows share their parent's path.
pub fn prune(value: &Value, keep: &[&str]) -> Option<Value> {
    prune_at(value, keep, "")
}

fn prune_at(value: &Value, keep: &[&str], path: &str) -> Option<Value> {
    if !path.is_empty()
        && keep
            .iter()
            .any(|field| *field == path || *field == last_segment(path))
    {
        return Some(value.clone());
    }

    match value {
        Value::Null => None,
        Value::String(s) if s.is_empty() => None,
        Value::Array(items) => {
            let items: Vec<Value> = items
                .iter()
                .filter_map(|item| prune_at(item, keep, path))
                .collect();
            (!items.is_empty()).then_some(Value::Array(items))
        }
        Value::Object(map) => {
            let map: Map<String, Value> = map
                .iter()
                .filter_map(|(key, child)| {
                    prune_at(child, keep, &join_path(path, key)).map(|child| (key.clone(), child))
                })
                .collect();
            (!map.is_empty()).then_some(Value::Object(map))
        }
        other => Some(other.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_prunes_empty_leaves_recursively() {
        let value = json!({
            "name": "A",
            "url": "",
            "secret": null,
            "headers": [{"key": "", "value": ""}],
            "options": {"delay": ""},
            "max_tries": 0,
            "silent": false
        });
        assert_eq!(
            prune(&value, &[]),
            Some(json!({"name": "A", "max_tries": 0, "silent": false}))
        );
    }

    #[test]
    fn test_everything_empty_is_none() {
        assert_eq!(prune(&json!({"a": "", "b": [], "c": {"d": null}}), &[]), None);
        assert_eq!(prune(&json!(""), &[]), None);
    }

    #[test]
    fn test_keep_list_by_segment() {
        let value = json!({"headers": [{"key": "X-Empty", "value": ""}]});
        assert_eq!(
            prune(&value, &["value"]),
            Some(json!({"headers": [{"key": "X-Empty", "value": ""}]}))
        );
    }

    #[test]
    fn test_keep_list_by_path_copies_subtree() {
        let value = json!({"args": ["echo", ""], "other": ""});
        assert_eq!(prune(&value, &["args"]), Some(json!({"args": ["echo", ""]})));
    }

    #[test]
    fn test_scalar_rows_pruned_from_arrays() {
        assert_eq!(prune(&json!(["a", "", null, "b"]), &[]), Some(json!(["a", "b"])));
    }
}
