// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Service edit form schema
//!
//! Composes the per-kind builders. Each sub-form gets its slice of the
//! bootstrap data and of both defaults tiers; its violations and warnings are
//! reported under the field it fills.

use std::collections::BTreeSet;

use serde_json::Value;

use super::{command, decode_record, default_record, lookup, notify, rules, webhook, FormSchema, Validate, Validation, ViolationKind, Warning};
use crate::config::SessionDefaults;
use crate::engine::resolve;
use crate::model::{
    Command, Dashboard, DeployedVersionLookup, LatestVersionLookup, Notify, Record, ServiceEdit,
    ServiceOptions, WebHook,
};

/// Build the schema of a service edit form.
///
/// `existing_names` are the names of the other services; the name must not
/// collide with any of them.
pub fn build(data: Option<&Value>, session: &SessionDefaults, existing_names: &[String]) -> FormSchema<ServiceEdit> {
    let mut warnings = Vec::new();
    // Sub-forms decode their own slice, so bad data in one keeps the others.
    let field = |name: &str| data.and_then(|value| value.get(name));

    let defaults = &session.defaults.service;
    let hard = &session.hard_defaults.service;
    let tiers = |name: &str| (defaults.get(name), hard.get(name));

    let (d, h) = tiers("command");
    let command = command::build(field("command"), d, h);
    let webhook = webhook::build(field("webhook"), session);
    let notify = notify::build(field("notify"), session);
    let (d, h) = tiers("latest_version");
    let latest = lookup::build_latest(field("latest_version"), d, h);
    let (d, h) = tiers("deployed_version");
    let deployed = lookup::build_deployed(field("deployed_version"), d, h);

    for (prefix, sub_warnings) in [
        ("command", command.warnings),
        ("webhook", webhook.warnings),
        ("notify", notify.warnings),
        ("latest_version", latest.warnings),
        ("deployed_version", deployed.warnings),
    ] {
        warnings.extend(sub_warnings.into_iter().map(|w| w.under(prefix)));
    }

    let mut scalar_warnings = Vec::new();
    let options: ServiceOptions =
        decode_record(field("options"), "options", &mut scalar_warnings).unwrap_or_default();
    let dashboard: Dashboard =
        decode_record(field("dashboard"), "dashboard", &mut scalar_warnings).unwrap_or_default();
    warnings.extend(scalar_warnings);
    if data.is_some_and(|value| !value.is_null() && !value.is_object()) {
        warnings.push(Warning::new("", "ignoring bootstrap data: not an object"));
    }

    let text = |name: &str| {
        field(name)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string()
    };
    let initial_value = ServiceEdit {
        name: text("name"),
        comment: text("comment"),
        options,
        latest_version: latest.initial_value,
        deployed_version: deployed.initial_value,
        command: command.initial_value,
        webhook: webhook.initial_value,
        notify: notify.initial_value,
        dashboard,
    };

    let default_value = ServiceEdit {
        options: default_record(defaults.get("options"), hard.get("options")),
        latest_version: latest.default_value,
        deployed_version: deployed.default_value,
        command: command.default_value,
        webhook: webhook.default_value,
        notify: notify.default_value,
        dashboard: default_record(defaults.get("dashboard"), hard.get("dashboard")),
        ..Default::default()
    };

    let validator = ServiceValidator {
        command: command.validator,
        webhook: webhook.validator,
        notify: notify.validator,
        latest: latest.validator,
        deployed: deployed.validator,
        default_interval: default_value.options.interval.clone(),
        existing_names: existing_names.iter().cloned().collect(),
        old_name: initial_value.name.clone(),
    };

    FormSchema {
        validator: Box::new(validator),
        initial_value,
        default_value,
        warnings,
    }
}

/// Validates the whole form with the validators of its sub-forms.
struct ServiceValidator {
    command: Box<dyn Validate<Vec<Command>>>,
    webhook: Box<dyn Validate<Vec<WebHook>>>,
    notify: Box<dyn Validate<Vec<Notify>>>,
    latest: Box<dyn Validate<LatestVersionLookup>>,
    deployed: Box<dyn Validate<DeployedVersionLookup>>,
    default_interval: String,
    existing_names: BTreeSet<String>,
    /// Name when the form was opened; keeping it is never a collision
    old_name: String,
}

impl Validate<ServiceEdit> for ServiceValidator {
    fn validate(&self, service: &ServiceEdit) -> Validation {
        let mut validation = Validation::new();

        rules::required(&mut validation, "name", &service.name, "");
        if service.name != self.old_name && self.existing_names.contains(&service.name) {
            validation.push("name", ViolationKind::Duplicate, "name must be unique");
        }

        rules::required(&mut validation, "options.interval", &service.options.interval, &self.default_interval);
        rules::duration(&mut validation, "options.interval", &service.options.interval);
        rules::url(&mut validation, "dashboard.icon", &service.dashboard.icon);
        rules::url(&mut validation, "dashboard.icon_link_to", &service.dashboard.icon_link_to);
        rules::url(&mut validation, "dashboard.web_url", &service.dashboard.web_url);

        validation.nested("latest_version", self.latest.validate(&service.latest_version));
        validation.nested("deployed_version", self.deployed.validate(&service.deployed_version));
        validation.nested("command", self.command.validate(&service.command));
        validation.nested("webhook", self.webhook.validate(&service.webhook));
        validation.nested("notify", self.notify.validate(&service.notify));
        validation
    }
}

/// The service as it takes effect: every field resolved over its defaults.
///
/// List fields are chosen wholesale (explicit rows, else the default rows),
/// then each webhook and notifier row is resolved over its main and kind
/// defaults.
pub fn effective(service: &ServiceEdit, session: &SessionDefaults) -> ServiceEdit {
    let merged = resolve(Some(&service.to_value()), &[Some(&session.service_default())]);
    let mut resolved = ServiceEdit::from_value(merged).unwrap_or_else(|err| {
        tracing::warn!("service {:?} does not resolve: {}", service.name, err);
        service.clone()
    });
    resolved.webhook = resolved
        .webhook
        .iter()
        .map(|row| webhook::effective(row, session))
        .collect();
    resolved.notify = resolved
        .notify
        .iter()
        .map(|row| notify::effective(row, session))
        .collect();
    resolved
}
