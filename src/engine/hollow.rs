// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Hollow defaults
//!
//! When a list field has no rows of its own, the form still shows one row per
//! default row, with the right per-row shape but none of the default values.
//! A hollow row keeps its discriminant fields (the `type` tag deciding which
//! sub-fields render) and zeroes every other leaf. Hollow rows seed the form;
//! they are never a final value.

use serde_json::Value;

use super::value::zero_of;
use crate::model::Record;

/// Hollow every row of a default list, preserving the named discriminants.
///
/// Discriminants are matched by field name at every object depth, so nested
/// tags such as `require.docker.type` survive as well.
pub fn hollow(list: &[Value], discriminants: &[&str]) -> Vec<Value> {
    list.iter()
        .map(|row| hollow_value(row, discriminants))
        .collect()
}

/// Hollow a single value.
pub fn hollow_value(value: &Value, discriminants: &[&str]) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(key, child)| {
                    let child = if discriminants.contains(&key.as_str()) {
                        child.clone()
                    } else {
                        hollow_value(child, discriminants)
                    };
                    (key.clone(), child)
                })
                .collect(),
        ),
        other => zero_of(other),
    }
}

/// Typed hollowing for a record kind, using its declared discriminants.
pub fn hollow_records<T: Record>(list: &[T]) -> Vec<T> {
    list.iter().map(hollow_record).collect()
}

/// Hollow one record.
pub fn hollow_record<T: Record>(record: &T) -> T {
    let hollowed = hollow_value(&record.to_value(), T::DISCRIMINANTS);
    T::from_value(hollowed).unwrap_or_default()
}
