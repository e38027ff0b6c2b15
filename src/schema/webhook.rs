// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! WebHook list schema
//!
//! A row whose name matches a main webhook inherits from it: the main's
//! values sit between the row and the webhook defaults, and the row may not
//! declare a different type.

use serde_json::Value;

use super::{decode_rows, default_rows, header, rules, str_at, FormSchema, Validation, ViolationKind, Warning};
use crate::config::SessionDefaults;
use crate::engine::{hollow_records, resolve, rows_using_defaults};
use crate::model::{Record, WebHook, WebHookType};

/// Build the schema of the webhook list.
pub fn build(data: Option<&Value>, session: &SessionDefaults) -> FormSchema<Vec<WebHook>> {
    let mut warnings = Vec::new();
    let explicit: Vec<WebHook> = decode_rows(data, "", &mut warnings);
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
        validator: Box::new(move |rows: &Vec<WebHook>| {
            if rows_using_defaults(rows, &fallback, |row| session.webhook_row_default(row)) {
                return Validation::new();
            }
            validate(rows, &session)
        }),
        initial_value,
        default_value,
        warnings,
    }
}

/// The effective default rows: the service's default webhooks, each resolved
/// over its main and the webhook defaults.
pub fn defaults(session: &SessionDefaults) -> Vec<WebHook> {
    let rows: Vec<WebHook> = default_rows(
        session.defaults.service.get("webhook"),
        session.hard_defaults.service.get("webhook"),
    );
    rows.iter().map(|row| effective(row, session)).collect()
}

/// A row resolved over its main and the webhook defaults.
pub fn effective(row: &WebHook, session: &SessionDefaults) -> WebHook {
    let fallback = session.webhook_row_default(row);
    let merged = resolve(Some(&row.to_value()), &[Some(&fallback)]);
    WebHook::from_value(merged).unwrap_or_else(|err| {
        tracing::warn!("webhook {:?} does not resolve: {}", row.name, err);
        row.clone()
    })
}

/// Reset a row with an unknown type to a blank row of the type it should
/// have: its main's, else the default type.
fn coerce(row: WebHook, session: &SessionDefaults, path: &str, warnings: &mut Vec<Warning>) -> WebHook {
    if row.kind.is_empty() || row.webhook_type().is_some() {
        return row;
    }
    let corrected = session
        .main_webhook(&row.name)
        .map(|main| main.kind.clone())
        .filter(|kind| !kind.is_empty())
        .unwrap_or_else(|| str_at(&session.webhook_default(), "type").to_string());
    warnings.push(Warning::new(
        format!("{path}.type"),
        format!("inconsistent webhook type {:?}, reset to {:?}", row.kind, corrected),
    ));
    WebHook {
        old_index: row.old_index,
        name: row.name,
        kind: corrected,
        ..Default::default()
    }
}

/// Validate webhook rows against their defaults.
pub fn validate(rows: &[WebHook], session: &SessionDefaults) -> Validation {
    let mut validation = Validation::new();
    for (index, row) in rows.iter().enumerate() {
        validation.nested(&index.to_string(), validate_row(row, session));
    }
    rules::unique_by(&mut validation, "", "name", rows, |row| {
        (!row.name.is_empty()).then(|| row.name.clone())
    });
    validation
}

fn validate_row(row: &WebHook, session: &SessionDefaults) -> Validation {
    let mut validation = Validation::new();
    let fallback = session.webhook_row_default(row);
    let effective = effective(row, session);

    rules::required(&mut validation, "name", &row.name, "");

    if !row.kind.is_empty() {
        if row.webhook_type().is_none() {
            validation.push(
                "type",
                ViolationKind::InconsistentDiscriminant,
                format!("unknown webhook type {:?}", row.kind),
            );
        } else if let Some(main) = session.main_webhook(&row.name) {
            if !main.kind.is_empty() && main.kind != row.kind {
                validation.push(
                    "type",
                    ViolationKind::TypeMismatch,
                    format!("type must match main webhook {:?} ({})", main.name, main.kind),
                );
            }
        }
    } else if WebHookType::parse(&effective.kind).is_none() {
        rules::required(&mut validation, "type", "", "");
    }

    rules::required(&mut validation, "url", &row.url, str_at(&fallback, "url"));
    rules::url(&mut validation, "url", &effective.url);
    rules::required(&mut validation, "secret", &row.secret, str_at(&fallback, "secret"));
    rules::duration(&mut validation, "delay", &row.delay);

    if let Some(code) = effective.desired_status_code {
        if code != 0 && !(100..=599).contains(&code) {
            validation.push(
                "desired_status_code",
                ViolationKind::InvalidValue,
                "desired_status_code must be 0 or an HTTP status code",
            );
        }
    }

    validation.nested("custom_headers", header::validate_rows(&row.custom_headers, true));
    validation
}
