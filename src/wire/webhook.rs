// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! WebHook list wire form.

use serde_json::Value;

use super::{header_rows, minimize_list, without_volatile};
use crate::config::SessionDefaults;
use crate::engine::prune;
use crate::model::{Record, WebHook};
use crate::schema;

/// Minimize the webhook list, `None` to inherit the default webhooks.
///
/// Rows are compared with the default rows after both are resolved over the
/// main they name, so a row that only repeats its main still inherits.
pub fn minimize(form: &[WebHook], session: &SessionDefaults) -> Option<Value> {
    let default_rows = schema::webhook::defaults(session);
    minimize_list(
        "webhook",
        form,
        &default_rows,
        |row| session.webhook_row_default(row),
        to_wire,
    )
}

/// One webhook without bookkeeping fields or header rows lacking a key.
pub fn to_wire(row: &WebHook) -> Option<Value> {
    let mut value = without_volatile(row);
    if let Some(map) = value.as_object_mut() {
        map.insert("custom_headers".to_string(), header_rows(&row.custom_headers));
    }
    prune(&value, WebHook::KEEP_EMPTY)
}
