// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Schema builders
//!
//! For each entity kind a builder produces the value the form starts from
//! (`initial_value`), the value each field falls back to (`default_value`)
//! and a validator. Validation is field-scoped and never fatal: a violation
//! names the path it applies to, and a row-level rule flags every row
//! involved.

use std::collections::BTreeSet;
use std::fmt;

use serde::Serialize;
use serde_json::Value;

use crate::engine::resolve;
use crate::model::{records_from_value, Record};

pub mod command;
pub mod header;
pub mod lookup;
pub mod notify;
pub mod rules;
pub mod service;
pub mod webhook;

/// What a violation is about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    /// Empty, and nothing to fall back to
    Required,
    /// Same key or name as another row
    Duplicate,
    /// Unknown discriminant, or fields of another kind
    InconsistentDiscriminant,
    /// One half of a pair is set, the other is not
    MissingPair,
    /// Declared type differs from the referenced main's
    TypeMismatch,
    /// Badly formed value
    InvalidValue,
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ViolationKind::Required => "required",
            ViolationKind::Duplicate => "duplicate",
            ViolationKind::InconsistentDiscriminant => "inconsistent discriminant",
            ViolationKind::MissingPair => "missing pair",
            ViolationKind::TypeMismatch => "type mismatch",
            ViolationKind::InvalidValue => "invalid value",
        };
        f.write_str(label)
    }
}

/// A field-scoped validation failure
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    /// Dotted path, with row indices as segments
    pub path: String,
    pub kind: ViolationKind,
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} ({})", self.path, self.message, self.kind)
    }
}

/// The outcome of validating a value
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Validation {
    violations: Vec<Violation>,
}

impl Validation {
    /// An empty (valid) outcome.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a violation.
    pub fn push(&mut self, path: impl Into<String>, kind: ViolationKind, message: impl Into<String>) {
        self.violations.push(Violation {
            path: path.into(),
            kind,
            message: message.into(),
        });
    }

    /// Merge the violations of a nested value, prefixing their paths.
    pub fn nested(&mut self, prefix: &str, inner: Validation) {
        for violation in inner.violations {
            let path = if violation.path.is_empty() {
                prefix.to_string()
            } else if prefix.is_empty() {
                violation.path
            } else {
                format!("{prefix}.{}", violation.path)
            };
            self.violations.push(Violation { path, ..violation });
        }
    }

    /// Whether there is nothing to report.
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    /// Violations at exactly `path`.
    pub fn at(&self, path: &str) -> Vec<&Violation> {
        self.violations.iter().filter(|v| v.path == path).collect()
    }

    /// Every path with a violation.
    pub fn paths(&self) -> BTreeSet<String> {
        self.violations.iter().map(|v| v.path.clone()).collect()
    }

    /// All violations, in the order found.
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }
}

/// A recovered problem with the incoming data
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Warning {
    pub path: String,
    pub message: String,
}

impl Warning {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        let warning = Self {
            path: path.into(),
            message: message.into(),
        };
        tracing::warn!("{}: {}", warning.path, warning.message);
        warning
    }

    /// The same warning under a parent path.
    pub fn under(self, prefix: &str) -> Self {
        let path = if self.path.is_empty() {
            prefix.to_string()
        } else {
            format!("{prefix}.{}", self.path)
        };
        Self { path, ..self }
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// Validates a form value.
pub trait Validate<T>: Send + Sync {
    fn validate(&self, value: &T) -> Validation;
}

impl<T, F> Validate<T> for F
where
    F: Fn(&T) -> Validation + Send + Sync,
{
    fn validate(&self, value: &T) -> Validation {
        self(value)
    }
}

/// What a builder hands the form layer
pub struct FormSchema<T> {
    pub validator: Box<dyn Validate<T>>,
    pub initial_value: T,
    pub default_value: T,
    pub warnings: Vec<Warning>,
}

impl<T> FormSchema<T> {
    /// Validate a value with this schema's validator.
    pub fn validate(&self, value: &T) -> Validation {
        self.validator.validate(value)
    }

    /// Validate the initial value.
    pub fn validate_initial(&self) -> Validation {
        self.validator.validate(&self.initial_value)
    }
}

impl<T: fmt::Debug> fmt::Debug for FormSchema<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormSchema")
            .field("initial_value", &self.initial_value)
            .field("default_value", &self.default_value)
            .field("warnings", &self.warnings)
            .finish_non_exhaustive()
    }
}

/// String at a dotted path of a default value, `""` when missing.
pub(crate) fn str_at<'a>(value: &'a Value, path: &str) -> &'a str {
    crate::engine::value::get_path(value, path)
        .and_then(Value::as_str)
        .unwrap_or("")
}

/// Decode bootstrap rows. Malformed data is reported and treated as absent.
pub(crate) fn decode_rows<T: Record>(
    data: Option<&Value>,
    path: &str,
    warnings: &mut Vec<Warning>,
) -> Vec<T> {
    let Some(value) = data else {
        return Vec::new();
    };
    records_from_value(value).unwrap_or_else(|err| {
        warnings.push(Warning::new(path, format!("ignoring bootstrap data: {err}")));
        Vec::new()
    })
}

/// Decode one bootstrap record, `None` when absent or malformed.
pub(crate) fn decode_record<T: Record>(
    data: Option<&Value>,
    path: &str,
    warnings: &mut Vec<Warning>,
) -> Option<T> {
    match data {
        None | Some(Value::Null) => None,
        Some(value) => T::from_value(value.clone())
            .map_err(|err| {
                warnings.push(Warning::new(path, format!("ignoring bootstrap data: {err}")));
            })
            .ok(),
    }
}

/// The default rows of a list field: the first non-empty tier, wholesale.
pub(crate) fn default_rows<T: Record>(defaults: Option<&Value>, hard: Option<&Value>) -> Vec<T> {
    let resolved = resolve(defaults, &[hard]);
    records_from_value(&resolved).unwrap_or_else(|err| {
        tracing::warn!("ignoring malformed {} defaults: {}", T::kind(), err);
        Vec::new()
    })
}

/// The default of a record field: the tiers merged field by field.
pub(crate) fn default_record<T: Record>(defaults: Option<&Value>, hard: Option<&Value>) -> T {
    let resolved = resolve(defaults, &[hard]);
    if resolved.is_null() {
        return T::default();
    }
    T::from_value(resolved).unwrap_or_else(|err| {
        tracing::warn!("ignoring malformed {} defaults: {}", T::kind(), err);
        T::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_prefixes_paths() {
        let mut inner = Validation::new();
        inner.push("key", ViolationKind::Required, "key is required");
        inner.push("", ViolationKind::InvalidValue, "bad row");

        let mut outer = Validation::new();
        outer.nested("custom_headers.0", inner);

        assert!(!outer.is_valid());
        assert_eq!(outer.at("custom_headers.0.key").len(), 1);
        assert_eq!(outer.at("custom_headers.0").len(), 1);
    }

    #[test]
    fn test_closure_validator() {
        let schema = FormSchema {
            validator: Box::new(|value: &String| {
                let mut validation = Validation::new();
                if value.is_empty() {
                    validation.push("", ViolationKind::Required, "empty");
                }
                validation
            }),
            initial_value: String::new(),
            default_value: String::new(),
            warnings: Vec::new(),
        };
        assert!(!schema.validate_initial().is_valid());
        assert!(schema.validate(&"x".to_string()).is_valid());
    }

    #[test]
    fn test_violation_display() {
        let violation = Violation {
            path: "webhook.1.name".to_string(),
            kind: ViolationKind::Duplicate,
            message: "name must be unique".to_string(),
        };
        assert_eq!(
            violation.to_string(),
            "webhook.1.name: name must be unique (duplicate)"
        );
    }
}
