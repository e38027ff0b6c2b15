// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! What the form layer needs to render "default" affordances
//!
//! For every field the form shows the effective value together with a flag
//! telling whether that value still comes from the defaults. The flag is
//! carried next to the value, never inside it.

use std::collections::BTreeSet;

use serde::Serialize;
use serde_json::Value;

use crate::engine::value::{get_path, is_blank, leaf_paths};
use crate::engine::{hollow, is_using_defaults, list_using_defaults, resolve, IdentitySpec};

/// One field of the form
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldState {
    /// Dotted path of the field
    pub path: String,
    /// The value the field takes effect with
    pub value: Value,
    /// The default the field falls back to
    pub default: Value,
    /// Whether the field is still using its default
    pub using_defaults: bool,
}

/// Field states over every leaf path of `candidate` and `default`.
pub fn field_states(candidate: &Value, default: &Value, spec: &IdentitySpec) -> Vec<FieldState> {
    let effective = resolve(Some(candidate), &[Some(default)]);
    let paths: BTreeSet<String> = leaf_paths(candidate)
        .into_iter()
        .chain(leaf_paths(default))
        .map(|(path, _)| path)
        .filter(|path| !path.is_empty())
        .collect();

    paths
        .into_iter()
        .map(|path| {
            let own = get_path(candidate, &path).unwrap_or(&Value::Null);
            let default_leaf = get_path(default, &path).cloned().unwrap_or(Value::Null);
            let using_defaults = is_blank(own) || is_using_defaults(own, &default_leaf, spec);
            FieldState {
                value: get_path(&effective, &path).cloned().unwrap_or(Value::Null),
                default: default_leaf,
                using_defaults,
                path,
            }
        })
        .collect()
}

/// A list field of the form
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListState {
    pub rows: Vec<Value>,
    /// One placeholder per row to show: the default rows while the list uses
    /// them, hollow rows once it does not
    pub placeholders: Vec<Value>,
    pub using_defaults: bool,
}

/// The state of a list field.
pub fn list_state(rows: &[Value], default_rows: &[Value], spec: &IdentitySpec) -> ListState {
    let using_defaults = list_using_defaults(rows, default_rows, spec);
    let placeholders = if using_defaults {
        default_rows.to_vec()
    } else {
        // Prefix patterns are not field names.
        let discriminants: Vec<&str> = spec.fields().filter(|field| !field.ends_with('.')).collect();
        hollow(default_rows, &discriminants)
    };
    ListState {
        rows: rows.to_vec(),
        placeholders,
        using_defaults,
    }
}
