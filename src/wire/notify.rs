// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Notifier list wire form
//!
//! The backend takes generic header lists as key→value maps inside
//! `url_fields`, and ntfy actions as a list inside `params`.

use serde_json::{Map, Value};

use super::{flatten_headers, minimize_list, without_volatile};
use crate::config::SessionDefaults;
use crate::engine::prune;
use crate::model::{Notify, NotifyType, NtfyAction, Record};
use crate::schema;

const ROW_LISTS: [&str; 4] = ["custom_headers", "json_payload", "query_vars", "actions"];

/// Minimize the notifier list, `None` to inherit the default notifiers.
pub fn minimize(form: &[Notify], session: &SessionDefaults) -> Option<Value> {
    let default_rows = schema::notify::defaults(session);
    minimize_list(
        "notify",
        form,
        &default_rows,
        |row| session.notify_row_default(row),
        to_wire,
    )
}

/// One notifier in the backend's shape, pruned.
pub fn to_wire(row: &Notify) -> Option<Value> {
    let mut value = without_volatile(row);
    let map = value.as_object_mut()?;
    for list in ROW_LISTS {
        map.remove(list);
    }

    match row.notify_type() {
        Some(NotifyType::Generic) => {
            let url_fields = object_entry(map, "url_fields")?;
            for (field, headers) in [
                ("custom_headers", &row.custom_headers),
                ("json_payload", &row.json_payload),
                ("query_vars", &row.query_vars),
            ] {
                let flat = flatten_headers(headers);
                if !flat.is_empty() {
                    url_fields.insert(field.to_string(), Value::Object(flat));
                }
            }
        }
        Some(NotifyType::Ntfy) => {
            let actions: Vec<Value> = row.actions.iter().filter_map(action_to_wire).collect();
            if !actions.is_empty() {
                object_entry(map, "params")?.insert("actions".to_string(), Value::Array(actions));
            }
        }
        _ => {}
    }
    prune(&value, Notify::KEEP_EMPTY)
}

/// One ntfy action with its header and extras rows as maps.
pub fn action_to_wire(action: &NtfyAction) -> Option<Value> {
    let mut value = action.to_value();
    let map = value.as_object_mut()?;
    for (field, rows) in [("headers", &action.headers), ("extras", &action.extras)] {
        let flat = flatten_headers(rows);
        if flat.is_empty() {
            map.remove(field);
        } else {
            map.insert(field.to_string(), Value::Object(flat));
        }
    }
    prune(&value, NtfyAction::KEEP_EMPTY)
}

fn object_entry<'a>(map: &'a mut Map<String, Value>, key: &str) -> Option<&'a mut Map<String, Value>> {
    map.entry(key.to_string())
        .or_insert_with(|| Value::Object(Map::new()))
        .as_object_mut()
}
