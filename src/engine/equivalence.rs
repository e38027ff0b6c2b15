// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Defaults-equivalence detection
//!
//! Decides whether an edited value is still "using defaults". A value is using
//! defaults when it is blank, when it equals the default (ignoring volatile
//! bookkeeping fields), or when its identity fields agree with the default and
//! every other field is blank. The identity fields are what keep a changed
//! discriminant with blank siblings from reading as "default".

use std::collections::BTreeSet;

use serde_json::Value;

use super::resolve::resolve;
use super::value::{get_path, is_blank, leaf_paths, strip_volatile};
use crate::model::Record;

/// The load-bearing fields of a value.
///
/// An entry matches a dotted leaf path when it equals the path or its trailing
/// segments (`type` matches `require.docker.type`). An entry ending in `.` is a
/// prefix (`url_fields.` matches everything under `url_fields`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentitySpec {
    fields: BTreeSet<String>,
    volatile: BTreeSet<String>,
}

impl Default for IdentitySpec {
    fn default() -> Self {
        Self::new(std::iter::empty::<String>())
    }
}

impl IdentitySpec {
    /// Create a spec from identity field patterns.
    pub fn new<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            fields: fields.into_iter().map(Into::into).collect(),
            volatile: ["old_index".to_string()].into_iter().collect(),
        }
    }

    /// The spec of a record kind: its discriminants are its identity fields.
    pub fn of<T: Record>() -> Self {
        Self::new(T::DISCRIMINANTS.iter().copied()).with_volatile(T::VOLATILE.iter().copied())
    }

    /// Replace the volatile bookkeeping fields ignored by equality.
    pub fn with_volatile<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.volatile = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Whether `path` names an identity field.
    pub fn is_identity(&self, path: &str) -> bool {
        self.fields.iter().any(|field| {
            if field.ends_with('.') {
                path.starts_with(field.as_str())
            } else {
                path == field
                    || path
                        .strip_suffix(field.as_str())
                        .is_some_and(|head| head.ends_with('.'))
            }
        })
    }

    /// Identity field patterns.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(String::as_str)
    }

    fn volatile_fields(&self) -> Vec<&str> {
        self.volatile.iter().map(String::as_str).collect()
    }
}

/// Whether `candidate` is indistinguishable from `default`.
///
/// Lists compare row by row and must have the same length; against an empty
/// default list any non-empty candidate is a modification.
pub fn is_using_defaults(candidate: &Value, default: &Value, spec: &IdentitySpec) -> bool {
    match (candidate, default) {
        (Value::Array(rows), Value::Array(default_rows)) => {
            list_using_defaults(rows, default_rows, spec)
        }
        (Value::Array(rows), _) => rows.is_empty(),
        _ => value_using_defaults(candidate, default, spec),
    }
}

/// List form of [`is_using_defaults`].
pub fn list_using_defaults(rows: &[Value], default_rows: &[Value], spec: &IdentitySpec) -> bool {
    if rows.is_empty() {
        return true;
    }
    if default_rows.is_empty() || rows.len() != default_rows.len() {
        return false;
    }
    rows.iter()
        .zip(default_rows)
        .all(|(row, default_row)| value_using_defaults(row, default_row, spec))
}

fn value_using_defaults(candidate: &Value, default: &Value, spec: &IdentitySpec) -> bool {
    if is_blank(candidate) {
        return true;
    }

    let volatile = spec.volatile_fields();
    let candidate = strip_volatile(candidate, &volatile);
    let default = strip_volatile(default, &volatile);
    if candidate == default {
        return true;
    }

    leaf_paths(&candidate).into_iter().all(|(path, leaf)| {
        if is_blank(leaf) {
            // A blank identity field falls through to the default's value.
            return true;
        }
        spec.is_identity(&path) && get_path(&default, &path) == Some(leaf)
    })
}

/// Typed list form for a record kind, using [`IdentitySpec::of`].
pub fn records_using_defaults<T: Record>(rows: &[T], default_rows: &[T]) -> bool {
    let rows: Vec<Value> = rows.iter().map(Record::to_value).collect();
    let default_rows: Vec<Value> = default_rows.iter().map(Record::to_value).collect();
    list_using_defaults(&rows, &default_rows, &IdentitySpec::of::<T>())
}

/// Typed list form that also looks through per-row defaults.
///
/// A row is equivalent to its default row when the two agree as they are, or
/// once each is resolved over its own row default (`row_default`, e.g. the
/// main instance it references). A row that names a main and a default row
/// that names the same main thus agree even when only one of them carries the
/// main's values.
pub fn rows_using_defaults<T, F>(rows: &[T], default_rows: &[T], row_default: F) -> bool
where
    T: Record,
    F: Fn(&T) -> Value,
{
    if rows.is_empty() {
        return true;
    }
    if default_rows.is_empty() || rows.len() != default_rows.len() {
        return false;
    }
    let spec = IdentitySpec::of::<T>();
    rows.iter().zip(default_rows).all(|(row, default_row)| {
        let row_value = row.to_value();
        let default_value = default_row.to_value();
        if value_using_defaults(&row_value, &default_value, &spec) {
            return true;
        }
        let row_fallback = row_default(row);
        let default_fallback = row_default(default_row);
        let resolved_row = resolve(Some(&row_value), &[Some(&row_fallback)]);
        let resolved_default = resolve(Some(&default_value), &[Some(&default_fallback)]);
        value_using_defaults(&resolved_row, &resolved_default, &spec)
    })
}
