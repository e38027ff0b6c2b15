// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

use serde_json::{Map, Value};

/// Legacy key names, renamed inside each tier and in `mains`.
const RENAMED_KEYS: &[(&str, &str)] = &[("webhooks", "webhook"), ("notifiers", "notify")];

const SECTIONS: &[&str] = &["defaults", "hard_defaults", "mains"];

pub(super) fn migrate_on_load(value: Value) -> Value {
    let Value::Object(mut root) = value else {
        return value;
    };
    if let Some(hard) = root.remove("hardDefaults") {
        root.entry("hard_defaults").or_insert(hard);
    }
    for section in SECTIONS {
        if let Some(Value::Object(map)) = root.get_mut(*section) {
            rename_keys(map);
        }
    }
    Value::Object(root)
}

fn rename_keys(map: &mut Map<String, Value>) {
    for (old, new) in RENAMED_KEYS {
        if let Some(value) = map.remove(*old) {
            // The current name wins over a legacy duplicate.
            map.entry(new.to_string()).or_insert(value);
        }
    }
}

/// Deep-merge two JSON values.
/// `base` is the lower tier, `overlay` the value read from the file.
/// Overlay values take priority; arrays are replaced, never merged.
pub fn deep_merge(base: Value, overlay: Value) -> Value {
    match (base, overlay) {
        (Value::Object(mut base_map), Value::Object(overlay_map)) => {
            for (key, overlay_val) in overlay_map {
                let merged = if let Some(base_val) = base_map.remove(&key) {
                    deep_merge(base_val, overlay_val)
                } else {
                    overlay_val
                };
                base_map.insert(key, merged);
            }
            Value::Object(base_map)
        }
        (_base, overlay) => overlay,
    }
}
