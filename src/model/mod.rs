// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Typed form records
//!
//! Each record kind mirrors what the service edit form holds. Every field is
//! defaulted so that a partial record (a defaults tier) decodes, and free-text
//! fields use `""` for "unset".

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::error::{FormError, Result};

pub mod command;
pub mod header;
pub mod lookup;
pub mod notify;
pub mod service;
pub mod webhook;

pub use command::{Arg, Command};
pub use header::Header;
pub use lookup::{
    BasicAuth, DeployedVersionLookup, DockerFilter, DockerType, LatestVersionLookup,
    LatestVersionRequire, LatestVersionType, Method, UrlCommand, UrlCommandType,
};
pub use notify::{NtfyAction, NtfyActionType, Notify, NotifyOptions, NotifyType};
pub use service::{Dashboard, ServiceEdit, ServiceOptions};
pub use webhook::{WebHook, WebHookType};

/// A record kind handled by the defaults engine.
pub trait Record:
    Serialize + DeserializeOwned + Default + Clone + PartialEq + std::fmt::Debug
{
    /// Tag fields deciding which sibling fields are active. Hollowing keeps
    /// them, and they are the identity fields for defaults-equivalence.
    const DISCRIMINANTS: &'static [&'static str] = &[];

    /// Bookkeeping fields ignored when comparing against defaults.
    const VOLATILE: &'static [&'static str] = &["old_index"];

    /// Fields whose presence is meaningful even when empty.
    const KEEP_EMPTY: &'static [&'static str] = &[];

    /// Serialize to a JSON value.
    fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }

    /// Decode from a JSON value, with the failure reported as malformed input.
    fn from_value(value: Value) -> Result<Self> {
        serde_json::from_value(value).map_err(|err| FormError::malformed(Self::kind(), err))
    }

    /// Short name of the record kind, used in diagnostics.
    fn kind() -> &'static str;
}

/// Decode a list of records, treating `null` as empty.
pub fn records_from_value<T: Record>(value: &Value) -> Result<Vec<T>> {
    match value {
        Value::Null => Ok(Vec::new()),
        other => serde_json::from_value(other.clone())
            .map_err(|err| FormError::malformed(T::kind(), err)),
    }
}

/// Serialize a list of records.
pub fn records_to_value<T: Record>(records: &[T]) -> Value {
    Value::Array(records.iter().map(Record::to_value).collect())
}
