// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! The service edit form

use serde::{Deserialize, Serialize};

use super::{Command, DeployedVersionLookup, LatestVersionLookup, Notify, Record, WebHook};

/// Polling and versioning options
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceOptions {
    /// Go-style duration between queries
    pub interval: String,
    pub semantic_versioning: Option<bool>,
    pub active: Option<bool>,
}

/// How the service is shown on the dashboard
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Dashboard {
    pub auto_approve: Option<bool>,
    pub icon: String,
    pub icon_link_to: String,
    pub web_url: String,
}

/// Everything the service edit form holds
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceEdit {
    pub name: String,
    pub comment: String,
    pub options: ServiceOptions,
    pub latest_version: LatestVersionLookup,
    pub deployed_version: DeployedVersionLookup,
    pub command: Vec<Command>,
    pub webhook: Vec<WebHook>,
    pub notify: Vec<Notify>,
    pub dashboard: Dashboard,
}

impl ServiceEdit {
    /// Create an empty form for a named service
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Default::default()
        }
    }
}

impl Record for ServiceOptions {
    fn kind() -> &'static str {
        "service options"
    }
}

impl Record for Dashboard {
    fn kind() -> &'static str {
        "dashboard"
    }
}

impl Record for ServiceEdit {
    fn kind() -> &'static str {
        "service"
    }
}
