// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Version lookup wire forms
//!
//! Both lookups are objects: a lookup still using its defaults is omitted
//! whole, otherwise only the substructures that differ are sent.

use serde_json::Value;

use super::{header_rows, minimize_object};
use crate::config::SessionDefaults;
use crate::engine::IdentitySpec;
use crate::model::{Command, DeployedVersionLookup, LatestVersionLookup, Record, UrlCommand};
use crate::schema::default_record;

/// Minimize the latest version lookup, `None` to inherit.
pub fn latest(form: &LatestVersionLookup, session: &SessionDefaults) -> Option<Value> {
    let default: LatestVersionLookup = default_record(
        session.defaults.service.get("latest_version"),
        session.hard_defaults.service.get("latest_version"),
    );
    let keep: Vec<&str> = LatestVersionLookup::KEEP_EMPTY
        .iter()
        .chain(UrlCommand::KEEP_EMPTY)
        .copied()
        .collect();
    minimize_object(
        "latest_version",
        &latest_to_wire(form),
        &latest_to_wire(&default),
        &IdentitySpec::of::<LatestVersionLookup>(),
        &keep,
    )
}

/// Minimize the deployed version lookup, `None` to inherit.
pub fn deployed(form: &DeployedVersionLookup, session: &SessionDefaults) -> Option<Value> {
    let default: DeployedVersionLookup = default_record(
        session.defaults.service.get("deployed_version"),
        session.hard_defaults.service.get("deployed_version"),
    );
    minimize_object(
        "deployed_version",
        &deployed_to_wire(form),
        &deployed_to_wire(&default),
        &IdentitySpec::of::<DeployedVersionLookup>(),
        DeployedVersionLookup::KEEP_EMPTY,
    )
}

/// `require.command` as its argv; a blank command is no command.
fn latest_to_wire(lookup: &LatestVersionLookup) -> Value {
    let mut value = lookup.to_value();
    let command = Command {
        args: lookup.require.command.clone(),
    };
    if let Some(require) = value.get_mut("require").and_then(Value::as_object_mut) {
        if command.is_blank() {
            require.remove("command");
        } else {
            let argv = command.argv().into_iter().map(Value::String).collect();
            require.insert("command".to_string(), Value::Array(argv));
        }
    }
    value
}

/// Header rows without bookkeeping fields or blank keys.
fn deployed_to_wire(lookup: &DeployedVersionLookup) -> Value {
    let mut value = lookup.to_value();
    if let Some(map) = value.as_object_mut() {
        map.insert("headers".to_string(), header_rows(&lookup.headers));
    }
    value
}
