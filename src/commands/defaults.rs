// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Print the effective session defaults

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

use crate::cli::args::OutputFormat;
use crate::config::{Mains, SessionDefaults};
use crate::error::Result;
use crate::model::NotifyType;

use super::print;

#[derive(Serialize)]
struct EffectiveDefaults<'a> {
    service: Value,
    webhook: Value,
    notify: BTreeMap<&'static str, Value>,
    mains: &'a Mains,
}

/// Execute the defaults command
pub fn execute(session: &SessionDefaults, format: &OutputFormat) -> Result<()> {
    let defaults = EffectiveDefaults {
        service: session.service_default(),
        webhook: session.webhook_default(),
        notify: NotifyType::ALL
            .into_iter()
            .map(|kind| (kind.as_str(), session.notify_type_default(kind.as_str())))
            .collect(),
        mains: &session.mains,
    };
    print(&defaults, format)
}
