// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Version lookups
//!
//! The latest version is found from a GitHub repository or a URL (whose body is
//! narrowed down with `url_commands`), and optionally gated on a docker tag
//! existing. The deployed version is read from a URL.

use serde::{Deserialize, Serialize};

use super::{Arg, Header, Record};

/// Latest version sources
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LatestVersionType {
    Github,
    Url,
}

impl LatestVersionType {
    /// Parse a type tag
    pub fn parse(tag: &str) -> Option<Self> {
        match tag {
            "github" => Some(LatestVersionType::Github),
            "url" => Some(LatestVersionType::Url),
            _ => None,
        }
    }

    /// The type tag
    pub fn as_str(&self) -> &'static str {
        match self {
            LatestVersionType::Github => "github",
            LatestVersionType::Url => "url",
        }
    }
}

/// Latest version lookup
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LatestVersionLookup {
    #[serde(rename = "type")]
    pub kind: String,

    /// `owner/repo` for github, a full URL for url
    pub url: String,

    /// github only
    pub access_token: String,

    /// url only
    pub allow_invalid_certs: Option<bool>,

    /// github only
    pub use_prerelease: Option<bool>,

    /// url only
    pub url_commands: Vec<UrlCommand>,

    pub require: LatestVersionRequire,
}

impl LatestVersionLookup {
    /// The parsed source tag, if set and known
    pub fn lookup_type(&self) -> Option<LatestVersionType> {
        LatestVersionType::parse(&self.kind)
    }

    /// Clear every field the source kind does not use.
    pub fn clear_stale(&mut self, kind: LatestVersionType) {
        match kind {
            LatestVersionType::Github => {
                self.allow_invalid_certs = None;
                self.url_commands.clear();
            }
            LatestVersionType::Url => {
                self.access_token.clear();
                self.use_prerelease = None;
            }
        }
    }
}

impl Record for LatestVersionLookup {
    const DISCRIMINANTS: &'static [&'static str] = &["type"];
    const KEEP_EMPTY: &'static [&'static str] = &["require.command"];

    fn kind() -> &'static str {
        "latest_version"
    }
}

/// Conditions a new latest version must meet
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LatestVersionRequire {
    pub regex_content: String,
    pub regex_version: String,
    pub command: Vec<Arg>,
    pub docker: DockerFilter,
}

/// Docker registries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DockerType {
    Hub,
    Ghcr,
    Quay,
}

impl DockerType {
    /// Parse a registry tag
    pub fn parse(tag: &str) -> Option<Self> {
        match tag {
            "hub" => Some(DockerType::Hub),
            "ghcr" => Some(DockerType::Ghcr),
            "quay" => Some(DockerType::Quay),
            _ => None,
        }
    }
}

/// Require a tag to exist on a docker registry
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DockerFilter {
    #[serde(rename = "type")]
    pub kind: String,
    pub image: String,
    pub tag: String,
    /// hub only
    pub username: String,
    pub token: String,
}

impl DockerFilter {
    /// Whether any field besides the registry is set
    pub fn is_set(&self) -> bool {
        !(self.image.is_empty()
            && self.tag.is_empty()
            && self.username.is_empty()
            && self.token.is_empty())
    }
}

/// Ways of narrowing down a URL body to a version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UrlCommandType {
    Regex,
    Replace,
    Split,
}

impl UrlCommandType {
    /// Parse a type tag
    pub fn parse(tag: &str) -> Option<Self> {
        match tag {
            "regex" => Some(UrlCommandType::Regex),
            "replace" => Some(UrlCommandType::Replace),
            "split" => Some(UrlCommandType::Split),
            _ => None,
        }
    }

    /// The field that must be set for this kind
    pub fn required_field(&self) -> &'static str {
        match self {
            UrlCommandType::Regex => "regex",
            UrlCommandType::Replace => "old",
            UrlCommandType::Split => "text",
        }
    }
}

/// One step applied to a URL body
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UrlCommand {
    #[serde(rename = "type")]
    pub kind: String,
    /// regex
    pub regex: String,
    /// regex, split
    pub index: Option<i64>,
    /// regex
    pub template: String,
    /// split
    pub text: String,
    /// replace
    pub old: String,
    /// replace
    pub new: String,
}

impl UrlCommand {
    /// The parsed type tag, if set and known
    pub fn command_type(&self) -> Option<UrlCommandType> {
        UrlCommandType::parse(&self.kind)
    }

    /// Clear every field the command kind does not use.
    pub fn clear_stale(&mut self, kind: UrlCommandType) {
        match kind {
            UrlCommandType::Regex => {
                self.text.clear();
                self.old.clear();
                self.new.clear();
            }
            UrlCommandType::Replace => {
                self.regex.clear();
                self.index = None;
                self.template.clear();
                self.text.clear();
            }
            UrlCommandType::Split => {
                self.regex.clear();
                self.template.clear();
                self.old.clear();
                self.new.clear();
            }
        }
    }
}

impl Record for UrlCommand {
    const DISCRIMINANTS: &'static [&'static str] = &["type"];
    // `new` may replace with nothing.
    const KEEP_EMPTY: &'static [&'static str] = &["new"];

    fn kind() -> &'static str {
        "url_command"
    }
}

/// HTTP methods for the deployed version lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    Get,
    Post,
}

impl Method {
    /// Parse a method, case-insensitively
    pub fn parse(tag: &str) -> Option<Self> {
        match tag.to_ascii_uppercase().as_str() {
            "GET" => Some(Method::Get),
            "POST" => Some(Method::Post),
            _ => None,
        }
    }
}

/// Credentials for the deployed version lookup
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BasicAuth {
    pub username: String,
    pub password: String,
}

/// Deployed version lookup
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeployedVersionLookup {
    pub method: String,
    pub url: String,
    pub allow_invalid_certs: Option<bool>,
    pub basic_auth: BasicAuth,
    pub headers: Vec<Header>,
    /// POST only
    pub body: String,
    /// JSON path to the version
    pub json: String,
    pub regex: String,
    pub regex_template: String,
}

impl DeployedVersionLookup {
    /// The parsed method, if set and known
    pub fn http_method(&self) -> Option<Method> {
        Method::parse(&self.method)
    }
}

impl Record for DeployedVersionLookup {
    const DISCRIMINANTS: &'static [&'static str] = &["method"];
    const KEEP_EMPTY: &'static [&'static str] = &["value"];

    fn kind() -> &'static str {
        "deployed_version"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_url_command_clear_stale() {
        let mut command = UrlCommand {
            kind: "split".to_string(),
            regex: "v(.*)".to_string(),
            text: "-".to_string(),
            index: Some(1),
            old: "a".to_string(),
            ..Default::default()
        };
        command.clear_stale(UrlCommandType::Split);
        assert_eq!(command.text, "-");
        assert_eq!(command.index, Some(1));
        assert!(command.regex.is_empty());
        assert!(command.old.is_empty());
    }

    #[test]
    fn test_latest_clear_stale() {
        let mut lookup = LatestVersionLookup {
            kind: "github".to_string(),
            access_token: "tok".to_string(),
            allow_invalid_certs: Some(true),
            url_commands: vec![UrlCommand::default()],
            ..Default::default()
        };
        lookup.clear_stale(LatestVersionType::Github);
        assert_eq!(lookup.access_token, "tok");
        assert_eq!(lookup.allow_invalid_certs, None);
        assert!(lookup.url_commands.is_empty());
    }

    #[test]
    fn test_method_parse_case_insensitive() {
        assert_eq!(Method::parse("post"), Some(Method::Post));
        assert_eq!(Method::parse("PUT"), None);
    }

    #[test]
    fn test_latest_lookup_nested_decode() {
        let lookup = LatestVersionLookup::from_value(json!({
            "type": "url",
            "url": "https://example.com/releases",
            "url_commands": [{"type": "regex", "regex": "v([0-9.]+)"}],
            "require": {"docker": {"type": "ghcr", "image": "org/app"}}
        }))
        .unwrap();
        assert_eq!(lookup.lookup_type(), Some(LatestVersionType::Url));
        assert_eq!(lookup.url_commands[0].command_type(), Some(UrlCommandType::Regex));
        assert_eq!(DockerType::parse(&lookup.require.docker.kind), Some(DockerType::Ghcr));
        assert!(lookup.require.docker.is_set());
    }
}
