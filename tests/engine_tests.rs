// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

use proptest::prelude::*;
use serde_json::{json, Value};
use svcform::config::DefaultsTier;
use svcform::engine::{hollow, hollow_records, is_using_defaults, resolve, IdentitySpec};
use svcform::model::{Record, WebHook};
use svcform::{schema, wire, SessionDefaults};

fn key_strategy() -> impl Strategy<Value = String> {
    prop_oneof![Just("type"), Just("url"), Just("name"), Just("extra")].prop_map(String::from)
}

fn leaf_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        (0i64..5).prop_map(|n| json!(n)),
        prop_oneof![Just(""), Just("a"), Just("b")].prop_map(|s| json!(s)),
    ]
}

fn value_strategy() -> impl Strategy<Value = Value> {
    leaf_strategy().prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..3).prop_map(Value::Array),
            prop::collection::btree_map(key_strategy(), inner, 0..4)
                .prop_map(|map| Value::Object(map.into_iter().collect())),
        ]
    })
}

fn row_strategy() -> impl Strategy<Value = Value> {
    (
        prop_oneof![Just("github"), Just("gitlab"), Just("")],
        prop_oneof![Just(""), Just("https://a"), Just("https://b")],
        0i64..5,
    )
        .prop_map(|(kind, url, n)| json!({"type": kind, "url": url, "n": n}))
}

fn nonempty_array_strategy() -> impl Strategy<Value = Vec<Value>> {
    prop::collection::vec(leaf_strategy(), 1..5)
}

fn webhook_default_strategy() -> impl Strategy<Value = Vec<Value>> {
    prop::collection::vec(
        (
            prop_oneof![Just("A"), Just("B"), Just("C")],
            prop_oneof![Just("github"), Just("gitlab")],
            prop_oneof![Just(""), Just("https://x"), Just("https://y")],
            prop_oneof![Just(""), Just("secret")],
        )
            .prop_map(|(name, kind, url, secret)| {
                json!({"name": name, "type": kind, "url": url, "secret": secret})
            }),
        0..4,
    )
}

fn webhook_form_strategy() -> impl Strategy<Value = Vec<WebHook>> {
    prop::collection::vec(
        (
            prop_oneof![Just(""), Just("A"), Just("B")],
            prop_oneof![Just(""), Just("github"), Just("gitlab")],
            prop_oneof![Just(""), Just("https://x")],
            prop_oneof![Just(""), Just("secret")],
        )
            .prop_map(|(name, kind, url, secret)| {
                WebHook::from_value(json!({"name": name, "type": kind, "url": url, "secret": secret}))
                    .unwrap()
            }),
        0..4,
    )
}

fn session_with_webhooks(default_rows: Vec<Value>) -> SessionDefaults {
    SessionDefaults::default().with_defaults(DefaultsTier {
        service: json!({"webhook": default_rows}),
        ..Default::default()
    })
}

/// The rows the backend ends up with for `form`: an empty list inherits the
/// defaults, otherwise each row is resolved over the default row at its index.
fn effective_webhooks(form: &[WebHook], defaults: &[WebHook], session: &SessionDefaults) -> Vec<WebHook> {
    if form.is_empty() {
        return defaults.to_vec();
    }
    form.iter()
        .enumerate()
        .map(|(index, row)| {
            let default_row = defaults.get(index).map(Record::to_value);
            let merged = resolve(Some(&row.to_value()), &[default_row.as_ref()]);
            schema::webhook::effective(&WebHook::from_value(merged).unwrap(), session)
        })
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 128, .. ProptestConfig::default() })]

    #[test]
    fn resolve_is_idempotent(
        explicit in value_strategy(),
        d1 in value_strategy(),
        d2 in value_strategy(),
    ) {
        let once = resolve(Some(&explicit), &[Some(&d1), Some(&d2)]);
        let twice = resolve(Some(&once), &[Some(&d1), Some(&d2)]);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn resolve_takes_explicit_arrays_whole(
        explicit in nonempty_array_strategy(),
        default in nonempty_array_strategy(),
    ) {
        prop_assume!(explicit.len() != default.len());
        let explicit = Value::Array(explicit);
        let default = Value::Array(default);
        prop_assert_eq!(resolve(Some(&explicit), &[Some(&default)]), explicit);
    }

    #[test]
    fn hollow_preserves_length_and_discriminants(rows in prop::collection::vec(row_strategy(), 0..6)) {
        let hollowed = hollow(&rows, &["type"]);
        prop_assert_eq!(hollowed.len(), rows.len());
        for (row, hollow_row) in rows.iter().zip(&hollowed) {
            prop_assert_eq!(&row["type"], &hollow_row["type"]);
            prop_assert_eq!(&hollow_row["url"], &json!(""));
            prop_assert_eq!(&hollow_row["n"], &Value::Null);
        }
    }

    #[test]
    fn equivalence_is_reflexive(value in value_strategy()) {
        prop_assert!(is_using_defaults(&value, &value, &IdentitySpec::new(["type"])));
        prop_assert!(is_using_defaults(&value, &value, &IdentitySpec::default()));
    }

    #[test]
    fn equivalence_on_empty_lists(rows in prop::collection::vec(row_strategy(), 1..4)) {
        let spec = IdentitySpec::new(["type"]);
        let rows = Value::Array(rows);
        prop_assert!(is_using_defaults(&json!([]), &rows, &spec));
        prop_assert!(!is_using_defaults(&rows, &json!([]), &spec));
    }

    #[test]
    fn hollow_rows_minimize_to_inherit(default_rows in webhook_default_strategy()) {
        let session = session_with_webhooks(default_rows);
        let defaults = schema::webhook::defaults(&session);
        let form: Vec<WebHook> = hollow_records(&defaults);
        prop_assert_eq!(wire::webhook::minimize(&form, &session), None);
        prop_assert_eq!(wire::webhook::minimize(&defaults, &session), None);
    }

    #[test]
    fn inherited_webhooks_lose_nothing(
        default_rows in webhook_default_strategy(),
        form in webhook_form_strategy(),
    ) {
        let session = session_with_webhooks(default_rows);
        let defaults = schema::webhook::defaults(&session);
        if wire::webhook::minimize(&form, &session).is_none() {
            prop_assert_eq!(effective_webhooks(&form, &defaults, &session), defaults);
        }
    }

    #[test]
    fn resized_webhook_list_is_always_sent(
        default_rows in webhook_default_strategy(),
        form in webhook_form_strategy(),
    ) {
        prop_assume!(!form.is_empty() && form.len() != default_rows.len());
        let session = session_with_webhooks(default_rows);
        prop_assert!(wire::webhook::minimize(&form, &session).is_some());
    }
}

#[test]
fn test_resolve_merges_objects_field_by_field() {
    let explicit = json!({"url": "https://x", "require": {"regex_version": ""}});
    let entity = json!({"type": "github", "require": {"regex_version": "^v"}});
    let hard = json!({"type": "url", "use_prerelease": false});
    assert_eq!(
        resolve(Some(&explicit), &[Some(&entity), Some(&hard)]),
        json!({
            "url": "https://x",
            "type": "github",
            "use_prerelease": false,
            "require": {"regex_version": "^v"}
        })
    );
}

#[test]
fn test_resolve_never_splices_rows() {
    let explicit = json!({"args": [{"arg": "ls"}]});
    let default = json!({"args": [{"arg": "echo"}, {"arg": "hi"}]});
    assert_eq!(resolve(Some(&explicit), &[Some(&default)]), explicit);
}

#[test]
fn test_resolve_without_tiers() {
    assert_eq!(resolve(None, &[]), Value::Null);
    assert_eq!(resolve(None, &[None, Some(&json!(""))]), json!(""));
}
