// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Session defaults for svcform
//!
//! The defaults tiers and main instances that every schema builder and
//! minimizer call is parameterized by. Loaded once per edit session from
//! ~/.svcform/defaults.yaml (or `$SVCFORM_HOME`) and never mutated afterwards.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::engine::resolve;
use crate::model::{Notify, Record, WebHook};

mod io;
mod migration;

pub use io::{parse_document, read_document};
pub use migration::deep_merge;

/// Immutable defaults context for one edit session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionDefaults {
    /// Per-entity defaults, set by the operator
    #[serde(default)]
    pub defaults: DefaultsTier,

    /// Global hard defaults, the last tier
    #[serde(default = "DefaultsTier::builtin")]
    pub hard_defaults: DefaultsTier,

    /// Named main instances that rows may inherit from
    #[serde(default)]
    pub mains: Mains,
}

impl Default for SessionDefaults {
    fn default() -> Self {
        Self {
            defaults: DefaultsTier::default(),
            hard_defaults: DefaultsTier::builtin(),
            mains: Mains::default(),
        }
    }
}

/// One defaults tier. Every value is a partial record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DefaultsTier {
    /// Partial service, including its default `command`, `webhook` and
    /// `notify` rows
    #[serde(default)]
    pub service: Value,

    /// Partial notifier per notifier type
    #[serde(default)]
    pub notify: BTreeMap<String, Value>,

    /// Partial webhook
    #[serde(default)]
    pub webhook: Value,
}

impl DefaultsTier {
    /// The built-in hard defaults.
    pub fn builtin() -> Self {
        let options = json!({
            "delay": "0s",
            "max_tries": 3,
            "message": "{{ service_id }} - {{ version }} released"
        });
        let per_type = [
            ("discord", json!({"params": {"username": "Argus"}})),
            (
                "generic",
                json!({"params": {"contenttype": "application/json", "requestmethod": "POST"}}),
            ),
            (
                "gotify",
                json!({"url_fields": {"port": "443"}, "params": {"priority": "0"}}),
            ),
            ("ntfy", json!({"url_fields": {"host": "ntfy.sh"}})),
            (
                "smtp",
                json!({"url_fields": {"port": "25"}, "params": {"auth": "Unknown"}}),
            ),
            (
                "telegram",
                json!({"params": {"notification": "yes", "parsemode": "None", "preview": "yes"}}),
            ),
        ];
        let notify = per_type
            .into_iter()
            .map(|(kind, mut value)| {
                if let Value::Object(map) = &mut value {
                    map.insert("type".to_string(), json!(kind));
                    map.insert("options".to_string(), options.clone());
                }
                (kind.to_string(), value)
            })
            .collect();

        Self {
            service: json!({
                "options": {"interval": "10m", "semantic_versioning": true},
                "latest_version": {"type": "github"},
                "deployed_version": {"method": "GET"},
                "dashboard": {"auto_approve": false}
            }),
            notify,
            webhook: json!({
                "type": "github",
                "delay": "0s",
                "max_tries": 3,
                "desired_status_code": 0
            }),
        }
    }
}

/// Main instances, keyed by name
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Mains {
    #[serde(default)]
    pub notify: BTreeMap<String, Notify>,

    #[serde(default)]
    pub webhook: BTreeMap<String, WebHook>,
}

impl SessionDefaults {
    /// Build a context from its parts.
    pub fn new(defaults: DefaultsTier, hard_defaults: DefaultsTier, mains: Mains) -> Self {
        let mut session = Self {
            defaults,
            hard_defaults,
            mains,
        };
        session.normalize_mains();
        session
    }

    /// Replace the per-entity defaults.
    pub fn with_defaults(mut self, defaults: DefaultsTier) -> Self {
        self.defaults = defaults;
        self
    }

    /// Add a main notifier under its name.
    pub fn with_main_notify(mut self, main: Notify) -> Self {
        self.mains.notify.insert(main.name.clone(), main);
        self
    }

    /// Add a main webhook under its name.
    pub fn with_main_webhook(mut self, main: WebHook) -> Self {
        self.mains.webhook.insert(main.name.clone(), main);
        self
    }

    /// Give every main the name it is keyed by.
    ///
    /// A main never references another main, so this is the whole of
    /// reference flattening: rows are one hop from their main at most.
    pub(crate) fn normalize_mains(&mut self) {
        for (name, main) in self.mains.notify.iter_mut() {
            main.name = name.clone();
        }
        for (name, main) in self.mains.webhook.iter_mut() {
            main.name = name.clone();
        }
    }

    /// The effective service default: per-entity over hard.
    pub fn service_default(&self) -> Value {
        resolve(
            Some(&self.defaults.service),
            &[Some(&self.hard_defaults.service)],
        )
    }

    /// The default of one service field, e.g. `webhook` or `latest_version`.
    pub fn service_field_default(&self, field: &str) -> Value {
        self.service_default()
            .get(field)
            .cloned()
            .unwrap_or(Value::Null)
    }

    /// The effective default of a notifier type.
    pub fn notify_type_default(&self, kind: &str) -> Value {
        resolve(
            self.defaults.notify.get(kind),
            &[self.hard_defaults.notify.get(kind)],
        )
    }

    /// The effective webhook default.
    pub fn webhook_default(&self) -> Value {
        resolve(
            Some(&self.defaults.webhook),
            &[Some(&self.hard_defaults.webhook)],
        )
    }

    /// Main notifier referenced by `name`.
    pub fn main_notify(&self, name: &str) -> Option<&Notify> {
        self.mains.notify.get(name)
    }

    /// Main webhook referenced by `name`.
    pub fn main_webhook(&self, name: &str) -> Option<&WebHook> {
        self.mains.webhook.get(name)
    }

    /// The type a notifier row ends up with: its own, else its main's.
    pub fn notify_row_type(&self, row: &Notify) -> String {
        if !row.kind.is_empty() {
            return row.kind.clone();
        }
        self.main_notify(&row.name)
            .map(|main| main.kind.clone())
            .unwrap_or_default()
    }

    /// Everything a notifier row resolves over: its main, then the defaults of
    /// its type.
    pub fn notify_row_default(&self, row: &Notify) -> Value {
        let type_default = self.notify_type_default(&self.notify_row_type(row));
        match self.main_notify(&row.name) {
            Some(main) => resolve(Some(&main.to_value()), &[Some(&type_default)]),
            None => type_default,
        }
    }

    /// Everything a webhook row resolves over: its main, then the webhook
    /// defaults.
    pub fn webhook_row_default(&self, row: &WebHook) -> Value {
        let webhook_default = self.webhook_default();
        match self.main_webhook(&row.name) {
            Some(main) => resolve(Some(&main.to_value()), &[Some(&webhook_default)]),
            None => webhook_default,
        }
    }
}
