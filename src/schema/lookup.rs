// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Version lookup schemas

use serde_json::Value;

use super::{decode_record, default_record, header, rules, FormSchema, Validation, ViolationKind, Warning};
use crate::engine::value::is_blank;
use crate::engine::{hollow_record, resolve_record};
use crate::model::{
    DeployedVersionLookup, DockerType, LatestVersionLookup, LatestVersionType, Method, Record,
    UrlCommand, UrlCommandType,
};

/// Build the schema of the latest version lookup.
pub fn build_latest(
    data: Option<&Value>,
    defaults: Option<&Value>,
    hard: Option<&Value>,
) -> FormSchema<LatestVersionLookup> {
    let mut warnings = Vec::new();
    let default_value: LatestVersionLookup = default_record(defaults, hard);
    let explicit: Option<LatestVersionLookup> = decode_record(data, "", &mut warnings);

    let seed = explicit
        .filter(|lookup| !is_blank(&lookup.to_value()))
        .unwrap_or_else(|| hollow_record(&default_value));
    let initial_value = coerce_latest(seed, &default_value, &mut warnings);

    let fallback = default_value.clone();
    FormSchema {
        validator: Box::new(move |lookup: &LatestVersionLookup| validate_latest(lookup, &fallback)),
        initial_value,
        default_value,
        warnings,
    }
}

fn coerce_latest(
    mut lookup: LatestVersionLookup,
    default: &LatestVersionLookup,
    warnings: &mut Vec<Warning>,
) -> LatestVersionLookup {
    if !lookup.kind.is_empty() && lookup.lookup_type().is_none() {
        warnings.push(Warning::new(
            "type",
            format!("inconsistent latest_version type {:?}, reset to {:?}", lookup.kind, default.kind),
        ));
        lookup = hollow_record(default);
    }

    let kind = if lookup.kind.is_empty() {
        default.lookup_type()
    } else {
        lookup.lookup_type()
    };
    if let Some(kind) = kind {
        lookup.clear_stale(kind);
    }

    for (index, command) in lookup.url_commands.iter_mut().enumerate() {
        match command.command_type() {
            Some(kind) => command.clear_stale(kind),
            None if command.kind.is_empty() => {}
            None => {
                warnings.push(Warning::new(
                    format!("url_commands.{index}.type"),
                    format!("inconsistent url_command type {:?}, reset", command.kind),
                ));
                *command = UrlCommand::default();
            }
        }
    }

    let docker = &mut lookup.require.docker;
    if !docker.kind.is_empty() {
        match DockerType::parse(&docker.kind) {
            Some(DockerType::Hub) => {}
            Some(_) => docker.username.clear(),
            None => {
                warnings.push(Warning::new(
                    "require.docker.type",
                    format!("inconsistent docker type {:?}, reset", docker.kind),
                ));
                *docker = Default::default();
            }
        }
    }
    lookup
}

/// Validate the latest version lookup against its default.
pub fn validate_latest(lookup: &LatestVersionLookup, default: &LatestVersionLookup) -> Validation {
    let mut validation = Validation::new();
    let effective = resolve_record(Some(lookup), &[Some(default)]);

    let kind = match (lookup.kind.as_str(), effective.lookup_type()) {
        ("", None) => {
            rules::required(&mut validation, "type", "", "");
            None
        }
        (_, None) => {
            validation.push(
                "type",
                ViolationKind::InconsistentDiscriminant,
                format!("unknown latest_version type {:?}", effective.kind),
            );
            None
        }
        (_, kind) => kind,
    };

    rules::required(&mut validation, "url", &lookup.url, &default.url);
    match kind {
        Some(LatestVersionType::Github) => {
            rules::github_repo(&mut validation, "url", &effective.url);
            if !lookup.url_commands.is_empty() {
                validation.push(
                    "url_commands",
                    ViolationKind::InconsistentDiscriminant,
                    "url_commands only apply to url lookups",
                );
            }
        }
        Some(LatestVersionType::Url) => {
            rules::url(&mut validation, "url", &effective.url);
            if !lookup.access_token.is_empty() {
                validation.push(
                    "access_token",
                    ViolationKind::InconsistentDiscriminant,
                    "access_token only applies to github lookups",
                );
            }
        }
        None => {}
    }

    for (index, command) in lookup.url_commands.iter().enumerate() {
        validation.nested(&format!("url_commands.{index}"), validate_url_command(command));
    }

    let require = &effective.require;
    rules::user_regex(&mut validation, "require.regex_content", &require.regex_content);
    rules::user_regex(&mut validation, "require.regex_version", &require.regex_version);

    let docker = &require.docker;
    if docker.is_set() {
        match DockerType::parse(&docker.kind) {
            None if docker.kind.is_empty() => {
                rules::required(&mut validation, "require.docker.type", "", "")
            }
            None => validation.push(
                "require.docker.type",
                ViolationKind::InconsistentDiscriminant,
                format!("unknown docker type {:?}", docker.kind),
            ),
            Some(registry) => {
                if registry == DockerType::Hub {
                    rules::pair(
                        &mut validation,
                        ("require.docker.username", docker.username.as_str()),
                        ("require.docker.token", docker.token.as_str()),
                    );
                } else if !docker.username.is_empty() {
                    validation.push(
                        "require.docker.username",
                        ViolationKind::InconsistentDiscriminant,
                        "username only applies to hub",
                    );
                }
            }
        }
        rules::required(&mut validation, "require.docker.image", &docker.image, "");
        rules::required(&mut validation, "require.docker.tag", &docker.tag, "");
    }
    validation
}

fn validate_url_command(command: &UrlCommand) -> Validation {
    let mut validation = Validation::new();
    let Some(kind) = command.command_type() else {
        if command.kind.is_empty() {
            rules::required(&mut validation, "type", "", "");
        } else {
            validation.push(
                "type",
                ViolationKind::InconsistentDiscriminant,
                format!("unknown url_command type {:?}", command.kind),
            );
        }
        return validation;
    };

    let field = kind.required_field();
    let value = match kind {
        UrlCommandType::Regex => &command.regex,
        UrlCommandType::Replace => &command.old,
        UrlCommandType::Split => &command.text,
    };
    rules::required(&mut validation, field, value, "");
    if kind == UrlCommandType::Regex {
        rules::user_regex(&mut validation, "regex", &command.regex);
    }
    validation
}

/// Build the schema of the deployed version lookup.
pub fn build_deployed(
    data: Option<&Value>,
    defaults: Option<&Value>,
    hard: Option<&Value>,
) -> FormSchema<DeployedVersionLookup> {
    let mut warnings = Vec::new();
    let default_value: DeployedVersionLookup = default_record(defaults, hard);
    let explicit: Option<DeployedVersionLookup> = decode_record(data, "", &mut warnings);

    let mut initial_value = explicit
        .filter(|lookup| !is_blank(&lookup.to_value()))
        .unwrap_or_else(|| hollow_record(&default_value));
    if !initial_value.method.is_empty() {
        match initial_value.http_method() {
            Some(Method::Get) => {
                initial_value.method = "GET".to_string();
                initial_value.body.clear();
            }
            Some(Method::Post) => initial_value.method = "POST".to_string(),
            None => {
                warnings.push(Warning::new(
                    "method",
                    format!("inconsistent method {:?}, reset to {:?}", initial_value.method, default_value.method),
                ));
                initial_value.method = default_value.method.clone();
            }
        }
    }

    let fallback = default_value.clone();
    FormSchema {
        validator: Box::new(move |lookup: &DeployedVersionLookup| validate_deployed(lookup, &fallback)),
        initial_value,
        default_value,
        warnings,
    }
}

/// Validate the deployed version lookup against its default.
///
/// The lookup is optional: with no url anywhere and nothing else set there is
/// nothing to check.
pub fn validate_deployed(lookup: &DeployedVersionLookup, default: &DeployedVersionLookup) -> Validation {
    let mut validation = Validation::new();
    let effective = resolve_record(Some(lookup), &[Some(default)]);

    let mut without_method = effective.clone();
    without_method.method.clear();
    if is_blank(&without_method.to_value()) {
        return validation;
    }

    rules::required(&mut validation, "url", &lookup.url, &default.url);
    rules::url(&mut validation, "url", &effective.url);

    match effective.http_method() {
        Some(Method::Get) if !lookup.body.is_empty() => validation.push(
            "body",
            ViolationKind::InconsistentDiscriminant,
            "body only applies to POST",
        ),
        Some(_) => {}
        None if effective.method.is_empty() => rules::required(&mut validation, "method", "", ""),
        None => validation.push(
            "method",
            ViolationKind::InconsistentDiscriminant,
            format!("unknown method {:?}", effective.method),
        ),
    }

    rules::pair(
        &mut validation,
        ("basic_auth.username", effective.basic_auth.username.as_str()),
        ("basic_auth.password", effective.basic_auth.password.as_str()),
    );
    validation.nested("headers", header::validate_rows(&lookup.headers, true));
    rules::user_regex(&mut validation, "regex", &effective.regex);
    if !effective.regex_template.is_empty() {
        rules::required(&mut validation, "regex", &lookup.regex, &default.regex);
    }
    validation
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Header;
    use serde_json::json;

    fn github_default() -> Value {
        json!({"type": "github"})
    }

    #[test]
    fn test_latest_hollow_seed_keeps_type() {
        let defaults = json!({"type": "url", "url": "https://example.com", "url_commands": [{"type": "regex", "regex": "v(.*)"}]});
        let schema = build_latest(None, Some(&defaults), Some(&github_default()));
        assert_eq!(schema.default_value.kind, "url");
        assert_eq!(schema.initial_value.kind, "url");
        assert!(schema.initial_value.url.is_empty());
        assert!(schema.initial_value.url_commands.is_empty());
        assert!(schema.validate_initial().is_valid());
    }

    #[test]
    fn test_latest_url_required() {
        let schema = build_latest(None, None, Some(&github_default()));
        let validation = schema.validate_initial();
        assert_eq!(validation.at("url")[0].kind, ViolationKind::Required);
    }

    #[test]
    fn test_latest_github_repo_format() {
        let lookup = LatestVersionLookup {
            kind: "github".to_string(),
            url: "https://github.com/release-argus/Argus".to_string(),
            ..Default::default()
        };
        let validation = validate_latest(&lookup, &LatestVersionLookup::default());
        assert_eq!(validation.at("url")[0].kind, ViolationKind::InvalidValue);
    }

    #[test]
    fn test_latest_url_commands_required_fields() {
        let lookup = LatestVersionLookup {
            kind: "url".to_string(),
            url: "https://example.com".to_string(),
            url_commands: vec![
                UrlCommand {
                    kind: "split".to_string(),
                    ..Default::default()
                },
                UrlCommand {
                    kind: "regex".to_string(),
                    regex: "([0-9]".to_string(),
                    ..Default::default()
                },
            ],
            ..Default::default()
        };
        let validation = validate_latest(&lookup, &LatestVersionLookup::default());
        assert_eq!(validation.at("url_commands.0.text")[0].kind, ViolationKind::Required);
        assert_eq!(
            validation.at("url_commands.1.regex")[0].kind,
            ViolationKind::InvalidValue
        );
    }

    #[test]
    fn test_latest_docker_hub_pair() {
        let mut lookup = LatestVersionLookup {
            kind: "github".to_string(),
            url: "release-argus/Argus".to_string(),
            ..Default::default()
        };
        lookup.require.docker.kind = "hub".to_string();
        lookup.require.docker.image = "releaseargus/argus".to_string();
        lookup.require.docker.tag = "{{ version }}".to_string();
        lookup.require.docker.username = "me".to_string();
        let validation = validate_latest(&lookup, &LatestVersionLookup::default());
        let paths: Vec<String> = validation.paths().into_iter().collect();
        assert_eq!(paths, vec!["require.docker.token"]);
    }

    #[test]
    fn test_latest_unknown_type_resets_to_default_hollow() {
        let data = json!({"type": "gitea", "url": "x"});
        let schema = build_latest(Some(&data), None, Some(&github_default()));
        assert_eq!(schema.initial_value.kind, "github");
        assert!(schema.initial_value.url.is_empty());
        assert_eq!(schema.warnings[0].path, "type");
    }

    #[test]
    fn test_latest_stale_fields_cleared() {
        let data = json!({"type": "github", "url": "a/b", "url_commands": [{"type": "split", "text": "-"}]});
        let schema = build_latest(Some(&data), None, None);
        assert!(schema.initial_value.url_commands.is_empty());
        assert_eq!(schema.initial_value.url, "a/b");
    }

    #[test]
    fn test_deployed_optional_when_blank() {
        let schema = build_deployed(None, None, Some(&json!({"method": "GET"})));
        assert!(schema.validate_initial().is_valid());
    }

    #[test]
    fn test_deployed_rules() {
        let lookup = DeployedVersionLookup {
            method: "GET".to_string(),
            body: "{}".to_string(),
            basic_auth: crate::model::BasicAuth {
                username: "me".to_string(),
                password: String::new(),
            },
            headers: vec![Header::new("X-Token", "a"), Header::new("X-Token", "b")],
            ..Default::default()
        };
        let validation = validate_deployed(&lookup, &DeployedVersionLookup::default());
        assert_eq!(validation.at("url")[0].kind, ViolationKind::Required);
        assert_eq!(validation.at("body")[0].kind, ViolationKind::InconsistentDiscriminant);
        assert_eq!(validation.at("basic_auth.password")[0].kind, ViolationKind::MissingPair);
        assert_eq!(validation.at("headers.0.key")[0].kind, ViolationKind::Duplicate);
        assert_eq!(validation.at("headers.1.key")[0].kind, ViolationKind::Duplicate);
    }

    #[test]
    fn test_deployed_method_normalized() {
        let data = json!({"method": "post", "url": "https://example.com", "body": "{}"});
        let schema = build_deployed(Some(&data), None, Some(&json!({"method": "GET"})));
        assert_eq!(schema.initial_value.method, "POST");
        assert_eq!(schema.initial_value.body, "{}");
        assert!(schema.validate_initial().is_valid());
    }
}
