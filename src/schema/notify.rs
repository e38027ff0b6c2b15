// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Notifier list schema
//!
//! The notifier type decides which `url_fields` and `params` a row has, which
//! of them are required, and whether the generic header lists or the ntfy
//! actions apply. A row resolves over its main (when its name matches one)
//! and then over the defaults of its type.

use std::collections::BTreeMap;

use serde_json::Value;

use super::{decode_rows, default_rows, header, rules, str_at, FormSchema, Validation, ViolationKind, Warning};
use crate::config::SessionDefaults;
use crate::engine::{hollow_records, resolve, rows_using_defaults};
use crate::model::{Notify, NotifyType, NtfyAction, NtfyActionType, Record};

/// Build the schema of the notifier list.
pub fn build(data: Option<&Value>, session: &SessionDefaults) -> FormSchema<Vec<Notify>> {
    let mut warnings = Vec::new();
    let explicit: Vec<Notify> = decode_rows(data, "", &mut warnings);
    let default_value = defaults(session);

    let seed = if explicit.is_empty() {
        hollow_records(&default_value)
    } else {
        explicit
            .into_iter()
            .map(|mut row| {
                row.old_index = Some(row.name.clone());
                row
            })
            .collect()
    };
    let initial_value = seed
        .into_iter()
        .enumerate()
        .map(|(index, row)| coerce(row, session, &index.to_string(), &mut warnings))
        .collect();

    let session = session.clone();
    let fallback = default_value.clone();
    FormSchema {
        validator: Box::new(move |rows: &Vec<Notify>| {
            if rows_using_defaults(rows, &fallback, |row| session.notify_row_default(row)) {
                return Validation::new();
            }
            validate(rows, &session)
        }),
        initial_value,
        default_value,
        warnings,
    }
}

/// The effective default rows: the service's default notifiers, each
/// resolved over its main and its type defaults.
pub fn defaults(session: &SessionDefaults) -> Vec<Notify> {
    let rows: Vec<Notify> = default_rows(
        session.defaults.service.get("notify"),
        session.hard_defaults.service.get("notify"),
    );
    rows.iter().map(|row| effective(row, session)).collect()
}

/// A row resolved over its main and its type defaults.
pub fn effective(row: &Notify, session: &SessionDefaults) -> Notify {
    let fallback = session.notify_row_default(row);
    let merged = resolve(Some(&row.to_value()), &[Some(&fallback)]);
    Notify::from_value(merged).unwrap_or_else(|err| {
        tracing::warn!("notify {:?} does not resolve: {}", row.name, err);
        row.clone()
    })
}

/// Bring a row into the shape of its type.
///
/// An unknown type resets the row to a blank row of its main's type (or no
/// type). Fields of other types are dropped and the type's own `url_fields`
/// and `params` are present, if empty.
fn coerce(mut row: Notify, session: &SessionDefaults, path: &str, warnings: &mut Vec<Warning>) -> Notify {
    if !row.kind.is_empty() && row.notify_type().is_none() {
        let corrected = session
            .main_notify(&row.name)
            .map(|main| main.kind.clone())
            .unwrap_or_default();
        warnings.push(Warning::new(
            format!("{path}.type"),
            format!("inconsistent notify type {:?}, reset to {:?}", row.kind, corrected),
        ));
        row = Notify {
            old_index: row.old_index,
            name: row.name,
            kind: corrected,
            ..Default::default()
        };
    }

    let Some(kind) = NotifyType::parse(&session.notify_row_type(&row)) else {
        return row;
    };
    row.url_fields = shaped(&row.url_fields, kind.url_fields());
    row.params = shaped(&row.params, kind.params());
    if !kind.has_headers() {
        row.custom_headers.clear();
        row.json_payload.clear();
        row.query_vars.clear();
    }
    if kind.has_actions() {
        for (index, action) in row.actions.iter_mut().enumerate() {
            coerce_action(action, &format!("{path}.actions.{index}"), warnings);
        }
    } else {
        row.actions.clear();
    }
    row
}

/// Exactly the given keys, keeping present values.
fn shaped(map: &BTreeMap<String, String>, keys: &[&str]) -> BTreeMap<String, String> {
    keys.iter()
        .map(|key| (key.to_string(), map.get(*key).cloned().unwrap_or_default()))
        .collect()
}

fn coerce_action(action: &mut NtfyAction, path: &str, warnings: &mut Vec<Warning>) {
    match NtfyActionType::parse(&action.action) {
        Some(kind) => action.clear_stale(kind),
        None if action.action.is_empty() => {}
        None => {
            warnings.push(Warning::new(
                format!("{path}.action"),
                format!("inconsistent ntfy action {:?}, reset", action.action),
            ));
            *action = NtfyAction::default();
        }
    }
}

/// Validate notifier rows against their defaults.
pub fn validate(rows: &[Notify], session: &SessionDefaults) -> Validation {
    let mut validation = Validation::new();
    for (index, row) in rows.iter().enumerate() {
        validation.nested(&index.to_string(), validate_row(row, session));
    }
    rules::unique_by(&mut validation, "", "name", rows, |row| {
        (!row.name.is_empty()).then(|| row.name.clone())
    });
    validation
}

fn validate_row(row: &Notify, session: &SessionDefaults) -> Validation {
    let mut validation = Validation::new();
    rules::required(&mut validation, "name", &row.name, "");

    let main = session.main_notify(&row.name);
    if !row.kind.is_empty() {
        if row.notify_type().is_none() {
            validation.push(
                "type",
                ViolationKind::InconsistentDiscriminant,
                format!("unknown notify type {:?}", row.kind),
            );
            return validation;
        }
        if let Some(main) = main.filter(|main| !main.kind.is_empty() && main.kind != row.kind) {
            validation.push(
                "type",
                ViolationKind::TypeMismatch,
                format!("type must match main notify {:?} ({})", main.name, main.kind),
            );
        }
    }

    // The main's own type decides what its rows may hold.
    let Some(kind) = NotifyType::parse(&session.notify_row_type(row)) else {
        rules::required(&mut validation, "type", "", "");
        return validation;
    };

    let fallback = session.notify_row_default(row);
    let effective = effective(row, session);

    for field in kind.required_url_fields() {
        let explicit = row.url_fields.get(*field).map(String::as_str).unwrap_or("");
        let default = str_at(&fallback, &format!("url_fields.{field}"));
        rules::required(&mut validation, &format!("url_fields.{field}"), explicit, default);
    }
    for field in kind.required_params() {
        let explicit = row.params.get(*field).map(String::as_str).unwrap_or("");
        let default = str_at(&fallback, &format!("params.{field}"));
        rules::required(&mut validation, &format!("params.{field}"), explicit, default);
    }
    for (a, b) in kind.url_field_pairs() {
        let value = |field: &str| effective.url_fields.get(field).map(String::as_str).unwrap_or("");
        rules::pair(
            &mut validation,
            (format!("url_fields.{a}").as_str(), value(a)),
            (format!("url_fields.{b}").as_str(), value(b)),
        );
    }

    stale_keys(&mut validation, "url_fields", &row.url_fields, kind.url_fields());
    stale_keys(&mut validation, "params", &row.params, kind.params());

    if let Some(port) = effective.url_fields.get("port") {
        rules::number_in(&mut validation, "url_fields.port", port, 1, 65535);
    }
    rules::duration(&mut validation, "options.delay", &row.options.delay);

    if kind.has_headers() {
        validation.nested("custom_headers", header::validate_rows(&row.custom_headers, true));
        validation.nested("json_payload", header::validate_rows(&row.json_payload, false));
        validation.nested("query_vars", header::validate_rows(&row.query_vars, false));
    } else {
        for (field, rows) in [
            ("custom_headers", &row.custom_headers),
            ("json_payload", &row.json_payload),
            ("query_vars", &row.query_vars),
        ] {
            if !rows.is_empty() {
                validation.push(
                    field,
                    ViolationKind::InconsistentDiscriminant,
                    format!("{field} only applies to generic notifiers"),
                );
            }
        }
    }

    if kind.has_actions() {
        for (index, action) in row.actions.iter().enumerate() {
            validation.nested(&format!("actions.{index}"), validate_action(action));
        }
    } else if !row.actions.is_empty() {
        validation.push(
            "actions",
            ViolationKind::InconsistentDiscriminant,
            "actions only apply to ntfy notifiers",
        );
    }

    validation
}

fn stale_keys(validation: &mut Validation, field: &str, map: &BTreeMap<String, String>, keys: &[&str]) {
    for (key, value) in map {
        if !value.is_empty() && !keys.contains(&key.as_str()) {
            validation.push(
                format!("{field}.{key}"),
                ViolationKind::InconsistentDiscriminant,
                format!("{key} does not apply to this notify type"),
            );
        }
    }
}

fn validate_action(action: &NtfyAction) -> Validation {
    let mut validation = Validation::new();
    let Some(kind) = NtfyActionType::parse(&action.action) else {
        if action.action.is_empty() {
            rules::required(&mut validation, "action", "", "");
        } else {
            validation.push(
                "action",
                ViolationKind::InconsistentDiscriminant,
                format!("unknown ntfy action {:?}", action.action),
            );
        }
        return validation;
    };

    rules::required(&mut validation, "label", &action.label, "");
    if kind.requires_url() {
        rules::required(&mut validation, "url", &action.url, "");
        rules::url(&mut validation, "url", &action.url);
    }
    if kind == NtfyActionType::Http {
        validation.nested("headers", header::validate_rows(&action.headers, true));
    }
    if kind == NtfyActionType::Broadcast {
        validation.nested("extras", header::validate_rows(&action.extras, false));
    }
    for (field, set) in [
        ("method", !action.method.is_empty()),
        ("body", !action.body.is_empty()),
        ("headers", !action.headers.is_empty()),
        ("intent", !action.intent.is_empty()),
        ("extras", !action.extras.is_empty()),
    ] {
        if set && !kind.fields().contains(&field) {
            validation.push(
                field,
                ViolationKind::InconsistentDiscriminant,
                format!("{field} does not apply to {} actions", action.action),
            );
        }
    }
    validation
}
