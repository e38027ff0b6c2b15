// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Service payload
//!
//! List fields always appear, `null` meaning "inherit the default list".
//! Object fields that still use their defaults are left out.

use serde_json::{Map, Value};

use super::{command, lookup, minimize_object, notify, webhook};
use crate::config::SessionDefaults;
use crate::engine::IdentitySpec;
use crate::model::{Record, ServiceEdit};

/// Build the payload sent when saving a service form.
pub fn minimize(form: &ServiceEdit, session: &SessionDefaults) -> Value {
    let mut payload = Map::new();
    payload.insert("name".to_string(), Value::String(form.name.clone()));
    if !form.comment.is_empty() {
        payload.insert("comment".to_string(), Value::String(form.comment.clone()));
    }

    let spec = IdentitySpec::default();
    for (field, value) in [
        ("options", form.options.to_value()),
        ("dashboard", form.dashboard.to_value()),
    ] {
        let default = session.service_field_default(field);
        if let Some(minimized) = minimize_object(field, &value, &default, &spec, &[]) {
            payload.insert(field.to_string(), minimized);
        }
    }
    if let Some(latest) = lookup::latest(&form.latest_version, session) {
        payload.insert("latest_version".to_string(), latest);
    }
    if let Some(deployed) = lookup::deployed(&form.deployed_version, session) {
        payload.insert("deployed_version".to_string(), deployed);
    }

    for (field, list) in [
        ("command", command::minimize(&form.command, session)),
        ("webhook", webhook::minimize(&form.webhook, session)),
        ("notify", notify::minimize(&form.notify, session)),
    ] {
        payload.insert(field.to_string(), list.unwrap_or(Value::Null));
    }

    tracing::debug!(service = %form.name, fields = payload.len(), "service payload built");
    Value::Object(payload)
}

/// The payload with the inherited (`null`) list fields left out as well.
///
/// A list sent as `[]` clears the defaults and stays.
pub fn compact(form: &ServiceEdit, session: &SessionDefaults) -> Value {
    let mut payload = minimize(form, session);
    if let Some(map) = payload.as_object_mut() {
        map.retain(|_, value| !value.is_null());
    }
    payload
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DefaultsTier;
    use crate::model::{LatestVersionLookup, WebHook};
    use serde_json::json;

    fn session() -> SessionDefaults {
        SessionDefaults::default().with_defaults(DefaultsTier {
            service: json!({
                "options": {"interval": "5m"},
                "webhook": [{"name": "A", "type": "github", "url": "", "secret": ""}]
            }),
            ..Default::default()
        })
    }

    fn form() -> ServiceEdit {
        ServiceEdit {
            name: "argus".to_string(),
            latest_version: LatestVersionLookup {
                kind: "github".to_string(),
                url: "release-argus/Argus".to_string(),
                ..Default::default()
            },
            webhook: vec![WebHook::new("A", "github")],
            ..Default::default()
        }
    }

    #[test]
    fn test_defaults_are_left_out() {
        assert_eq!(
            minimize(&form(), &session()),
            json!({
                "name": "argus",
                "latest_version": {"type": "github", "url": "release-argus/Argus"},
                "command": null,
                "webhook": null,
                "notify": null
            })
        );
    }

    #[test]
    fn test_changed_fields_are_sent() {
        let mut form = form();
        form.comment = "self-hosted".to_string();
        form.options.interval = "1h".to_string();
        form.webhook[0].url = "https://x".to_string();
        let payload = minimize(&form, &session());
        assert_eq!(payload["comment"], json!("self-hosted"));
        assert_eq!(payload["options"], json!({"interval": "1h"}));
        assert_eq!(
            payload["webhook"],
            json!([{"name": "A", "type": "github", "url": "https://x"}])
        );
    }

    #[test]
    fn test_compact_drops_inherited_lists() {
        assert_eq!(
            compact(&form(), &session()),
            json!({
                "name": "argus",
                "latest_version": {"type": "github", "url": "release-argus/Argus"}
            })
        );
    }

    #[test]
    fn test_compact_keeps_cleared_lists() {
        let mut form = form();
        form.webhook = vec![WebHook::default(), WebHook::default()];
        let payload = compact(&form, &session());
        assert_eq!(payload["webhook"], json!([]));
        assert!(payload.get("notify").is_none());
    }
}
