// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! WebHooks sent on a new version

use serde::{Deserialize, Serialize};

use super::{Header, Record};

/// WebHook kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WebHookType {
    Github,
    Gitlab,
}

impl WebHookType {
    /// Parse a type tag
    pub fn parse(tag: &str) -> Option<Self> {
        match tag {
            "github" => Some(WebHookType::Github),
            "gitlab" => Some(WebHookType::Gitlab),
            _ => None,
        }
    }

    /// The type tag
    pub fn as_str(&self) -> &'static str {
        match self {
            WebHookType::Github => "github",
            WebHookType::Gitlab => "gitlab",
        }
    }
}

/// A webhook row
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WebHook {
    /// Name the row had when the data was loaded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub old_index: Option<String>,

    /// Name, and the main webhook referenced when one has this name
    pub name: String,

    /// Kind tag, empty to inherit
    #[serde(rename = "type")]
    pub kind: String,

    pub url: String,

    pub secret: String,

    pub allow_invalid_certs: Option<bool>,

    pub custom_headers: Vec<Header>,

    /// Go-style duration, e.g. `1m30s`
    pub delay: String,

    /// `0` accepts any 2xx
    pub desired_status_code: Option<u16>,

    pub max_tries: Option<u8>,

    pub silent_fails: Option<bool>,
}

impl WebHook {
    /// Create a webhook row
    pub fn new(name: &str, kind: &str) -> Self {
        Self {
            name: name.to_string(),
            kind: kind.to_string(),
            ..Default::default()
        }
    }

    /// Set the target url
    pub fn with_url(mut self, url: &str) -> Self {
        self.url = url.to_string();
        self
    }

    /// Set the signing secret
    pub fn with_secret(mut self, secret: &str) -> Self {
        self.secret = secret.to_string();
        self
    }

    /// The parsed kind tag, if set and known
    pub fn webhook_type(&self) -> Option<WebHookType> {
        WebHookType::parse(&self.kind)
    }
}

impl Record for WebHook {
    const DISCRIMINANTS: &'static [&'static str] = &["name", "type"];
    const KEEP_EMPTY: &'static [&'static str] = &["value"];

    fn kind() -> &'static str {
        "webhook"
    }
}
