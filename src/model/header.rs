// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Key/value header rows

use serde::{Deserialize, Serialize};

use super::Record;

/// One `{key, value}` row of a header list
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Header {
    /// Row position when the data was loaded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub old_index: Option<usize>,

    /// Header name
    pub key: String,

    /// Header value, which may legitimately be empty
    pub value: String,
}

impl Header {
    /// Create a header row
    pub fn new(key: &str, value: &str) -> Self {
        Self {
            old_index: None,
            key: key.to_string(),
            value: value.to_string(),
        }
    }

    /// Whether both key and value are empty
    pub fn is_blank(&self) -> bool {
        self.key.is_empty() && self.value.is_empty()
    }
}

impl Record for Header {
    const KEEP_EMPTY: &'static [&'static str] = &["value"];

    fn kind() -> &'static str {
        "header"
    }
}
