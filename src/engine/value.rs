// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Helpers over `serde_json::Value` shared by the engine.

use serde_json::Value;

/// Whether a value is absent for resolution purposes.
///
/// `null`, `""` and `[]` are absent. Objects are never absent on their own:
/// the resolver recurses into them instead.
pub fn is_absent(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}

/// Whether a value carries no information at all.
///
/// Like [`is_absent`], plus objects whose members are all blank. A non-empty
/// array is never blank, even if its rows are: the resolver keeps such an
/// array wholesale.
pub fn is_blank(value: &Value) -> bool {
    match value {
        Value::Object(map) => map.values().all(is_blank),
        other => is_absent(other),
    }
}

/// The zero value of the same shape.
pub fn zero_of(value: &Value) -> Value {
    match value {
        Value::String(_) => Value::String(String::new()),
        Value::Array(_) => Value::Array(Vec::new()),
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(key, child)| (key.clone(), zero_of(child)))
                .collect(),
        ),
        // Booleans and numbers are optional in every record: their zero is "unset",
        // which lets a hollow row fall through to the default row.
        Value::Bool(_) | Value::Number(_) | Value::Null => Value::Null,
    }
}

/// Copy of `value` with every object key named in `fields` removed, at any depth.
pub fn strip_volatile(value: &Value, fields: &[&str]) -> Value {
    if fields.is_empty() {
        return value.clone();
    }
    match value {
        Value::Object(map) => Value::Object(
            map.iter()
                .filter(|(key, _)| !fields.contains(&key.as_str()))
                .map(|(key, child)| (key.clone(), strip_volatile(child, fields)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(
            items
                .iter()
                .map(|item| strip_volatile(item, fields))
                .collect(),
        ),
        other => other.clone(),
    }
}

/// Join a parent path and a child segment with a dot.
pub fn join_path(parent: &str, segment: &str) -> String {
    if parent.is_empty() {
        segment.to_string()
    } else {
        format!("{parent}.{segment}")
    }
}

/// Last dotted segment of a path.
pub fn last_segment(path: &str) -> &str {
    path.rsplit('.').next().unwrap_or(path)
}

/// Flatten a value into `(path, leaf)` pairs.
///
/// Objects are walked; arrays and scalars are leaves, because arrays are
/// resolved as a unit. An empty object is reported as a leaf of its own.
pub fn leaf_paths(value: &Value) -> Vec<(String, &Value)> {
    let mut leaves = Vec::new();
    collect_leaves(value, "", &mut leaves);
    leaves
}

fn collect_leaves<'a>(value: &'a Value, path: &str, leaves: &mut Vec<(String, &'a Value)>) {
    match value {
        Value::Object(map) if !map.is_empty() => {
            for (key, child) in map {
                collect_leaves(child, &join_path(path, key), leaves);
            }
        }
        other => leaves.push((path.to_string(), other)),
    }
}

/// Look up a dotted path. Numeric segments index into arrays.
pub fn get_path<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    if path.is_empty() {
        return Some(value);
    }
    path.split('.').try_fold(value, |current, segment| match current {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    })
}
