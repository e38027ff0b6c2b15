// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Field rules shared by the schema builders

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::OnceLock;

use regex::Regex;

use super::{Validation, ViolationKind};
use crate::engine::value::join_path;

/// Require `value` unless the field falls back to a non-empty default.
pub fn required(validation: &mut Validation, path: &str, value: &str, default: &str) {
    if value.is_empty() && default.is_empty() {
        validation.push(
            path,
            ViolationKind::Required,
            format!("{} is required", label(path)),
        );
    }
}

/// Two fields that are either both set or both empty.
///
/// `a` and `b` are `(path, effective value)`. The empty side is flagged.
pub fn pair(validation: &mut Validation, a: (&str, &str), b: (&str, &str)) {
    let (a_path, a_value) = a;
    let (b_path, b_value) = b;
    if !a_value.is_empty() && b_value.is_empty() {
        validation.push(
            b_path,
            ViolationKind::MissingPair,
            format!("{} is required when {} is set", label(b_path), label(a_path)),
        );
    } else if a_value.is_empty() && !b_value.is_empty() {
        validation.push(
            a_path,
            ViolationKind::MissingPair,
            format!("{} is required when {} is set", label(a_path), label(b_path)),
        );
    }
}

/// Indices of every row whose key appears more than once. Rows without a key
/// are never duplicates.
pub fn duplicates<T, K, F>(rows: &[T], key: F) -> Vec<usize>
where
    K: Eq + Hash,
    F: Fn(&T) -> Option<K>,
{
    let keys: Vec<Option<K>> = rows.iter().map(&key).collect();
    let mut counts: HashMap<&K, usize> = HashMap::new();
    for k in keys.iter().flatten() {
        *counts.entry(k).or_default() += 1;
    }
    keys.iter()
        .enumerate()
        .filter(|(_, k)| {
            k.as_ref()
                .is_some_and(|k| counts.get(k).is_some_and(|&count| count > 1))
        })
        .map(|(i, _)| i)
        .collect()
}

/// Flag `field` on every row sharing its key with another row.
pub fn unique_by<T, K, F>(validation: &mut Validation, list_path: &str, field: &str, rows: &[T], key: F)
where
    K: Eq + Hash,
    F: Fn(&T) -> Option<K>,
{
    for index in duplicates(rows, key) {
        let path = join_path(&join_path(list_path, &index.to_string()), field);
        validation.push(
            path,
            ViolationKind::Duplicate,
            format!("{field} must be unique"),
        );
    }
}

/// Key of a header row for uniqueness: header names are case-insensitive.
pub fn header_key(key: &str) -> Option<String> {
    (!key.is_empty()).then(|| key.to_ascii_lowercase())
}

fn pattern(cell: &'static OnceLock<Option<Regex>>, source: &str) -> Option<&'static Regex> {
    cell.get_or_init(|| Regex::new(source).ok()).as_ref()
}

fn duration_regex() -> Option<&'static Regex> {
    static DURATION: OnceLock<Option<Regex>> = OnceLock::new();
    pattern(&DURATION, r"^(0|([0-9]+(\.[0-9]+)?(ns|us|µs|ms|s|m|h))+)$")
}

fn header_token_regex() -> Option<&'static Regex> {
    // RFC 7230 token
    static TOKEN: OnceLock<Option<Regex>> = OnceLock::new();
    pattern(&TOKEN, r"^[!#$%&'*+\-.^_`|~0-9A-Za-z]+$")
}

fn github_repo_regex() -> Option<&'static Regex> {
    static REPO: OnceLock<Option<Regex>> = OnceLock::new();
    pattern(&REPO, r"^[A-Za-z0-9_.-]+/[A-Za-z0-9_.-]+$")
}

fn url_regex() -> Option<&'static Regex> {
    static URL: OnceLock<Option<Regex>> = OnceLock::new();
    pattern(&URL, r"^https?://[^\s/$.?#][^\s]*$")
}

fn check(validation: &mut Validation, path: &str, value: &str, regex: Option<&Regex>, expected: &str) {
    if value.is_empty() {
        return;
    }
    if regex.is_some_and(|regex| !regex.is_match(value)) {
        validation.push(
            path,
            ViolationKind::InvalidValue,
            format!("{} must be {expected}", label(path)),
        );
    }
}

/// Go-style duration such as `1h30m`.
pub fn duration(validation: &mut Validation, path: &str, value: &str) {
    check(validation, path, value, duration_regex(), "a duration like 1h2m3s");
}

/// HTTP header name.
pub fn header_name(validation: &mut Validation, path: &str, value: &str) {
    check(validation, path, value, header_token_regex(), "a valid header name");
}

/// `owner/repo`.
pub fn github_repo(validation: &mut Validation, path: &str, value: &str) {
    check(validation, path, value, github_repo_regex(), "in the form owner/repo");
}

/// Absolute http(s) URL.
pub fn url(validation: &mut Validation, path: &str, value: &str) {
    check(validation, path, value, url_regex(), "an http(s) URL");
}

/// User-supplied regular expression.
pub fn user_regex(validation: &mut Validation, path: &str, value: &str) {
    if value.is_empty() {
        return;
    }
    if let Err(err) = Regex::new(value) {
        validation.push(
            path,
            ViolationKind::InvalidValue,
            format!("{} is not a valid regex: {err}", label(path)),
        );
    }
}

/// Number within an inclusive range, given as text.
pub fn number_in(validation: &mut Validation, path: &str, value: &str, min: i64, max: i64) {
    if value.is_empty() {
        return;
    }
    match value.parse::<i64>() {
        Ok(n) if (min..=max).contains(&n) => {}
        _ => validation.push(
            path,
            ViolationKind::InvalidValue,
            format!("{} must be a number between {min} and {max}", label(path)),
        ),
    }
}

/// Human label of a path: its last segment.
fn label(path: &str) -> &str {
    crate::engine::value::last_segment(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_unless_defaulted() {
        let mut validation = Validation::new();
        required(&mut validation, "url", "", "https://default");
        assert!(validation.is_valid());
        required(&mut validation, "url", "", "");
        assert_eq!(validation.at("url")[0].kind, ViolationKind::Required);
    }

    #[test]
    fn test_pair_flags_empty_side() {
        let mut validation = Validation::new();
        pair(&mut validation, ("username", "me"), ("password", ""));
        assert_eq!(validation.paths().into_iter().collect::<Vec<_>>(), vec!["password"]);

        let mut validation = Validation::new();
        pair(&mut validation, ("username", ""), ("password", "pw"));
        assert_eq!(validation.at("username")[0].kind, ViolationKind::MissingPair);

        let mut validation = Validation::new();
        pair(&mut validation, ("username", ""), ("password", ""));
        assert!(validation.is_valid());
    }

    #[test]
    fn test_duplicates_flags_all_rows() {
        let keys = ["X-Token", "Accept", "x-token", ""];
        let dupes = duplicates(&keys, |k| header_key(k));
        assert_eq!(dupes, vec![0, 2]);
    }

    #[test]
    fn test_blank_keys_are_not_duplicates() {
        let keys = ["", ""];
        assert!(duplicates(&keys, |k| header_key(k)).is_empty());
    }

    #[test]
    fn test_duration() {
        let mut validation = Validation::new();
        duration(&mut validation, "a", "1h30m");
        duration(&mut validation, "b", "0");
        duration(&mut validation, "c", "");
        assert!(validation.is_valid());
        duration(&mut validation, "d", "10 minutes");
        assert_eq!(validation.paths().len(), 1);
    }

    #[test]
    fn test_header_name() {
        let mut validation = Validation::new();
        header_name(&mut validation, "ok", "X-Token");
        header_name(&mut validation, "bad", "X Token");
        assert_eq!(validation.paths().into_iter().collect::<Vec<_>>(), vec!["bad"]);
    }

    #[test]
    fn test_github_repo_and_url() {
        let mut validation = Validation::new();
        github_repo(&mut validation, "repo", "release-argus/Argus");
        url(&mut validation, "url", "https://example.com/x");
        assert!(validation.is_valid());
        github_repo(&mut validation, "bad_repo", "https://github.com/a/b");
        url(&mut validation, "bad_url", "example.com");
        assert_eq!(validation.paths().len(), 2);
    }

    #[test]
    fn test_user_regex() {
        let mut validation = Validation::new();
        user_regex(&mut validation, "regex", "v([0-9]+");
        assert_eq!(validation.at("regex")[0].kind, ViolationKind::InvalidValue);
    }

    #[test]
    fn test_number_in() {
        let mut validation = Validation::new();
        number_in(&mut validation, "port", "443", 1, 65535);
        assert!(validation.is_valid());
        number_in(&mut validation, "port", "0", 1, 65535);
        number_in(&mut validation, "priority", "high", 0, 10);
        assert_eq!(validation.violations().len(), 2);
    }
}
