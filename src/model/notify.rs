// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Notifiers
//!
//! A notifier row names either a fresh notifier or a main notifier it inherits
//! from. Which `url_fields` and `params` apply depends on its `type`; the
//! header-like lists belong to `generic` and the action list to `ntfy`.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::{Header, Record};

/// Notifier kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotifyType {
    Discord,
    Generic,
    Gotify,
    Ntfy,
    Smtp,
    Telegram,
}

impl NotifyType {
    /// Every notifier kind
    pub const ALL: [NotifyType; 6] = [
        NotifyType::Discord,
        NotifyType::Generic,
        NotifyType::Gotify,
        NotifyType::Ntfy,
        NotifyType::Smtp,
        NotifyType::Telegram,
    ];

    /// Parse a type tag
    pub fn parse(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == tag)
    }

    /// The type tag
    pub fn as_str(&self) -> &'static str {
        match self {
            NotifyType::Discord => "discord",
            NotifyType::Generic => "generic",
            NotifyType::Gotify => "gotify",
            NotifyType::Ntfy => "ntfy",
            NotifyType::Smtp => "smtp",
            NotifyType::Telegram => "telegram",
        }
    }

    /// `url_fields` keys used by this kind
    pub fn url_fields(&self) -> &'static [&'static str] {
        match self {
            NotifyType::Discord => &["token", "webhookid"],
            NotifyType::Generic => &["host", "port", "path"],
            NotifyType::Gotify => &["host", "port", "path", "token"],
            NotifyType::Ntfy => &["host", "port", "username", "password", "topic"],
            NotifyType::Smtp => &["host", "port", "username", "password"],
            NotifyType::Telegram => &["token"],
        }
    }

    /// `params` keys used by this kind
    pub fn params(&self) -> &'static [&'static str] {
        match self {
            NotifyType::Discord => &["avatar", "color", "splitlines", "title", "username"],
            NotifyType::Generic => &[
                "contenttype",
                "disabletls",
                "messagekey",
                "requestmethod",
                "template",
                "title",
                "titlekey",
            ],
            NotifyType::Gotify => &["disabletls", "priority", "title"],
            NotifyType::Ntfy => &[
                "cache", "click", "delay", "email", "icon", "priority", "scheme", "tags", "title",
            ],
            NotifyType::Smtp => &[
                "auth",
                "clienthost",
                "encryption",
                "fromaddress",
                "fromname",
                "subject",
                "toaddresses",
                "usehtml",
                "usestarttls",
            ],
            NotifyType::Telegram => &["chats", "notification", "parsemode", "preview", "title"],
        }
    }

    /// `url_fields` that must end up with a value
    pub fn required_url_fields(&self) -> &'static [&'static str] {
        match self {
            NotifyType::Discord => &["token", "webhookid"],
            NotifyType::Generic => &["host"],
            NotifyType::Gotify => &["host", "token"],
            NotifyType::Ntfy => &["topic"],
            NotifyType::Smtp => &["host"],
            NotifyType::Telegram => &["token"],
        }
    }

    /// `params` that must end up with a value
    pub fn required_params(&self) -> &'static [&'static str] {
        match self {
            NotifyType::Smtp => &["fromaddress", "toaddresses"],
            NotifyType::Telegram => &["chats"],
            _ => &[],
        }
    }

    /// `url_fields` that require each other
    pub fn url_field_pairs(&self) -> &'static [(&'static str, &'static str)] {
        match self {
            NotifyType::Ntfy | NotifyType::Smtp => &[("username", "password")],
            _ => &[],
        }
    }

    /// Whether the header-like lists apply
    pub fn has_headers(&self) -> bool {
        matches!(self, NotifyType::Generic)
    }

    /// Whether the action list applies
    pub fn has_actions(&self) -> bool {
        matches!(self, NotifyType::Ntfy)
    }
}

impl fmt::Display for NotifyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Delivery options shared by every notifier kind
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotifyOptions {
    pub delay: String,
    pub max_tries: Option<u8>,
    pub message: String,
}

/// A notifier row
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Notify {
    /// Name the row had when the data was loaded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub old_index: Option<String>,

    /// Name, and the main notifier referenced when one has this name
    pub name: String,

    /// Kind tag, empty to inherit the main notifier's
    #[serde(rename = "type")]
    pub kind: String,

    pub options: NotifyOptions,

    pub url_fields: BTreeMap<String, String>,

    pub params: BTreeMap<String, String>,

    /// `generic` only
    pub custom_headers: Vec<Header>,

    /// `generic` only
    pub json_payload: Vec<Header>,

    /// `generic` only
    pub query_vars: Vec<Header>,

    /// `ntfy` only
    pub actions: Vec<NtfyAction>,
}

impl Notify {
    /// Create a notifier row
    pub fn new(name: &str, kind: &str) -> Self {
        Self {
            name: name.to_string(),
            kind: kind.to_string(),
            ..Default::default()
        }
    }

    /// Set a url field
    pub fn with_url_field(mut self, key: &str, value: &str) -> Self {
        self.url_fields.insert(key.to_string(), value.to_string());
        self
    }

    /// Set a param
    pub fn with_param(mut self, key: &str, value: &str) -> Self {
        self.params.insert(key.to_string(), value.to_string());
        self
    }

    /// The parsed kind tag, if set and known
    pub fn notify_type(&self) -> Option<NotifyType> {
        NotifyType::parse(&self.kind)
    }
}

impl Record for Notify {
    const DISCRIMINANTS: &'static [&'static str] = &["name", "type"];
    // Flattened key→value maps in the wire form; empty values are sent.
    const KEEP_EMPTY: &'static [&'static str] =
        &["custom_headers", "json_payload", "query_vars", "headers", "extras"];

    fn kind() -> &'static str {
        "notify"
    }
}

/// ntfy action kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NtfyActionType {
    View,
    Http,
    Broadcast,
}

impl NtfyActionType {
    /// Parse an action tag
    pub fn parse(tag: &str) -> Option<Self> {
        match tag {
            "view" => Some(NtfyActionType::View),
            "http" => Some(NtfyActionType::Http),
            "broadcast" => Some(NtfyActionType::Broadcast),
            _ => None,
        }
    }

    /// Fields used by this action kind, besides `action` itself
    pub fn fields(&self) -> &'static [&'static str] {
        match self {
            NtfyActionType::View => &["label", "url", "clear"],
            NtfyActionType::Http => &["label", "url", "method", "headers", "body", "clear"],
            NtfyActionType::Broadcast => &["label", "intent", "extras", "clear"],
        }
    }

    /// Whether a url is required
    pub fn requires_url(&self) -> bool {
        matches!(self, NtfyActionType::View | NtfyActionType::Http)
    }
}

/// One ntfy action button
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NtfyAction {
    pub action: String,
    pub label: String,
    pub url: String,
    pub method: String,
    pub body: String,
    pub headers: Vec<Header>,
    pub intent: String,
    pub extras: Vec<Header>,
    pub clear: Option<bool>,
}

impl NtfyAction {
    /// Clear every field the action kind does not use.
    pub fn clear_stale(&mut self, kind: NtfyActionType) {
        let fields = kind.fields();
        if !fields.contains(&"url") {
            self.url.clear();
        }
        if !fields.contains(&"method") {
            self.method.clear();
        }
        if !fields.contains(&"body") {
            self.body.clear();
        }
        if !fields.contains(&"headers") {
            self.headers.clear();
        }
        if !fields.contains(&"intent") {
            self.intent.clear();
        }
        if !fields.contains(&"extras") {
            self.extras.clear();
        }
    }
}

impl Record for NtfyAction {
    const DISCRIMINANTS: &'static [&'static str] = &["action"];
    const KEEP_EMPTY: &'static [&'static str] = &["headers", "extras"];

    fn kind() -> &'static str {
        "ntfy action"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_notify_type_parse() {
        assert_eq!(NotifyType::parse("gotify"), Some(NotifyType::Gotify));
        assert_eq!(NotifyType::parse("pushbullet"), None);
        assert_eq!(NotifyType::parse(""), None);
        for kind in NotifyType::ALL {
            assert_eq!(NotifyType::parse(kind.as_str()), Some(kind));
        }
    }

    #[test]
    fn test_required_fields_are_declared_fields() {
        for kind in NotifyType::ALL {
            for field in kind.required_url_fields() {
                assert!(kind.url_fields().contains(field), "{kind}: {field}");
            }
            for field in kind.required_params() {
                assert!(kind.params().contains(field), "{kind}: {field}");
            }
            for (a, b) in kind.url_field_pairs() {
                assert!(kind.url_fields().contains(a));
                assert!(kind.url_fields().contains(b));
            }
        }
    }

    #[test]
    fn test_notify_deserializes_partial() {
        let notify: Notify = serde_json::from_value(json!({
            "name": "ops",
            "type": "gotify",
            "url_fields": {"host": "gotify.example.com"}
        }))
        .unwrap();
        assert_eq!(notify.notify_type(), Some(NotifyType::Gotify));
        assert_eq!(notify.url_fields["host"], "gotify.example.com");
        assert!(notify.params.is_empty());
    }

    #[test]
    fn test_ntfy_action_clear_stale() {
        let mut action = NtfyAction {
            action: "view".to_string(),
            label: "Open".to_string(),
            url: "https://example.com".to_string(),
            method: "POST".to_string(),
            intent: "io.heckel.ntfy.USER_ACTION".to_string(),
            ..Default::default()
        };
        action.clear_stale(NtfyActionType::View);
        assert_eq!(action.url, "https://example.com");
        assert!(action.method.is_empty());
        assert!(action.intent.is_empty());
    }
}
