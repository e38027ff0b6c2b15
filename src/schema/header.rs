// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Header list schema

use serde_json::Value;

use super::{decode_rows, default_rows, rules, FormSchema, Validation, ViolationKind};
use crate::engine::hollow_records;
use crate::model::Header;

/// Build the schema of a header list.
pub fn build(data: Option<&Value>, defaults: Option<&Value>, hard: Option<&Value>) -> FormSchema<Vec<Header>> {
    let mut warnings = Vec::new();
    let explicit: Vec<Header> = decode_rows(data, "", &mut warnings);
    let default_value: Vec<Header> = default_rows(defaults, hard);

    FormSchema {
        validator: Box::new(|rows: &Vec<Header>| validate_rows(rows, true)),
        initial_value: seed(explicit, &default_value),
        default_value,
        warnings,
    }
}

/// Explicit rows with their load position recorded, or one blank row per
/// default row.
pub fn seed(explicit: Vec<Header>, default_rows: &[Header]) -> Vec<Header> {
    if explicit.is_empty() {
        return hollow_records(default_rows);
    }
    explicit
        .into_iter()
        .enumerate()
        .map(|(index, mut row)| {
            row.old_index = Some(index);
            row
        })
        .collect()
}

/// Validate `{key, value}` rows.
///
/// A value needs a key and keys are unique, case-insensitively. With
/// `header_names` the keys must also be valid HTTP header names.
pub fn validate_rows(rows: &[Header], header_names: bool) -> Validation {
    let mut validation = Validation::new();
    for (index, row) in rows.iter().enumerate() {
        let key_path = format!("{index}.key");
        if row.key.is_empty() && !row.value.is_empty() {
            validation.push(&key_path, ViolationKind::Required, "key is required");
        }
        if header_names {
            rules::header_name(&mut validation, &key_path, &row.key);
        }
    }
    rules::unique_by(&mut validation, "", "key", rows, |row| rules::header_key(&row.key));
    validation
}
