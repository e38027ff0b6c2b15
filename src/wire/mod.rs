// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Outgoing payload minimization
//!
//! Turns form values into what the backend receives. A substructure that is
//! still wholly default is omitted (`None`, sent as `null` for list fields);
//! anything else is sent with its empty leaves pruned.

use serde_json::{Map, Value};

use crate::engine::{is_using_defaults, list_using_defaults, prune, rows_using_defaults, IdentitySpec};
use crate::model::{Header, Record};

pub mod command;
pub mod lookup;
pub mod notify;
pub mod service;
pub mod webhook;

/// Flatten `{key, value}` rows into a key→value map.
///
/// Rows without a key are skipped and a later duplicate wins.
pub fn flatten_headers(headers: &[Header]) -> Map<String, Value> {
    headers
        .iter()
        .filter(|header| !header.key.is_empty())
        .map(|header| (header.key.clone(), Value::String(header.value.clone())))
        .collect()
}

/// `{key, value}` rows with a key, as a list.
pub fn header_rows(headers: &[Header]) -> Value {
    Value::Array(
        headers
            .iter()
            .filter(|header| !header.key.is_empty())
            .map(|header| {
                let mut row = Map::new();
                row.insert("key".to_string(), Value::String(header.key.clone()));
                row.insert("value".to_string(), Value::String(header.value.clone()));
                Value::Object(row)
            })
            .collect(),
    )
}

/// Minimize a list field.
///
/// `None` when the rows are still the default rows, looking through each
/// row's own default (`row_default`). Otherwise every row goes through
/// `to_wire`, which prunes it, and rows left empty are dropped. A modified
/// list is always sent, even when no row survives pruning.
pub fn minimize_list<T, D, W>(field: &str, rows: &[T], default_rows: &[T], row_default: D, to_wire: W) -> Option<Value>
where
    T: Record,
    D: Fn(&T) -> Value,
    W: Fn(&T) -> Option<Value>,
{
    if rows_using_defaults(rows, default_rows, row_default) {
        tracing::debug!(field, omitted = true, "list still using defaults");
        return None;
    }
    let wire: Vec<Value> = rows.iter().filter_map(to_wire).collect();
    tracing::debug!(field, omitted = false, rows = wire.len(), "list minimized");
    Some(Value::Array(wire))
}

/// Minimize an object field.
///
/// `None` when the value is still using defaults. Otherwise nested objects
/// are minimized the same way against the matching default field, arrays are
/// kept only when they differ from the default array, and scalars are kept.
/// The result is pruned, keeping the `keep` fields even when empty.
pub fn minimize_object(field: &str, value: &Value, default: &Value, spec: &IdentitySpec, keep: &[&str]) -> Option<Value> {
    if is_using_defaults(value, default, spec) {
        tracing::debug!(field, omitted = true, "object still using defaults");
        return None;
    }
    let minimized = minimize_fields(value, default, spec);
    let pruned = prune(&minimized, keep);
    tracing::debug!(field, omitted = pruned.is_none(), "object minimized");
    pruned
}

fn minimize_fields(value: &Value, default: &Value, spec: &IdentitySpec) -> Value {
    let Value::Object(map) = value else {
        return value.clone();
    };
    let minimized = map
        .iter()
        .filter_map(|(key, child)| {
            let default_child = default.get(key).unwrap_or(&Value::Null);
            let kept = match child {
                Value::Object(_) => {
                    if is_using_defaults(child, default_child, spec) {
                        None
                    } else {
                        Some(minimize_fields(child, default_child, spec))
                    }
                }
                Value::Array(rows) => {
                    let default_rows = default_child.as_array().map(Vec::as_slice).unwrap_or(&[]);
                    (!list_using_defaults(rows, default_rows, spec)).then(|| child.clone())
                }
                other => Some(other.clone()),
            };
            kept.map(|kept| (key.clone(), kept))
        })
        .collect();
    Value::Object(minimized)
}

/// Serialize a record without its volatile bookkeeping fields.
pub(crate) fn without_volatile<T: Record>(record: &T) -> Value {
    crate::engine::value::strip_volatile(&record.to_value(), T::VOLATILE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_flatten_headers() {
        let headers = vec![
            Header::new("X-A", "1"),
            Header::new("", "orphan"),
            Header::new("X-Empty", ""),
            Header::new("X-A", "2"),
        ];
        let map = flatten_headers(&headers);
        assert_eq!(Value::Object(map), json!({"X-A": "2", "X-Empty": ""}));
    }

    #[test]
    fn test_header_rows_skip_blank_keys() {
        let headers = vec![Header::new("X-A", ""), Header::default()];
        assert_eq!(header_rows(&headers), json!([{"key": "X-A", "value": ""}]));
    }

    #[test]
    fn test_minimize_object_omits_default_substructures() {
        let spec = IdentitySpec::new(["type"]);
        let default = json!({"type": "github", "require": {"docker": {"type": "hub", "image": "a"}}});
        let value = json!({
            "type": "github",
            "url": "owner/repo",
            "require": {"docker": {"type": "hub", "image": "", "tag": ""}, "regex_version": ""}
        });
        assert_eq!(
            minimize_object("latest_version", &value, &default, &spec, &[]),
            Some(json!({"type": "github", "url": "owner/repo"}))
        );
    }

    #[test]
    fn test_minimize_object_equivalent_is_none() {
        let spec = IdentitySpec::new(["type"]);
        let default = json!({"type": "github", "url": "a/b"});
        let value = json!({"type": "github", "url": ""});
        assert_eq!(minimize_object("latest_version", &value, &default, &spec, &[]), None);
    }
}
