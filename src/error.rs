// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Error types for svcform
//!
//! The resolution engine itself is total and never returns these. They are
//! raised by the fallible edges: loading session defaults, decoding bootstrap
//! data into typed records, and the CLI.

use thiserror::Error;

/// Main error type for svcform operations
#[derive(Error, Debug)]
pub enum FormError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Bootstrap data that does not match the record shape
    #[error("Malformed input at {path}: {message}")]
    MalformedInput { path: String, message: String },

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(String),

    /// TOML parsing errors
    #[error("TOML error: {0}")]
    Toml(String),
}

impl FormError {
    /// Build a `MalformedInput` error for the given field path.
    pub fn malformed(path: impl Into<String>, message: impl ToString) -> Self {
        FormError::MalformedInput {
            path: path.into(),
            message: message.to_string(),
        }
    }
}

/// Result type alias for svcform operations
pub type Result<T> = std::result::Result<T, FormError>;

impl From<serde_yaml::Error> for FormError {
    fn from(err: serde_yaml::Error) -> Self {
        FormError::Yaml(err.to_string())
    }
}

impl From<toml::de::Error> for FormError {
    fn from(err: toml::de::Error) -> Self {
        FormError::Toml(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_error_config() {
        let err = FormError::Config("bad config".to_string());
        assert!(err.to_string().contains("Configuration error"));
    }

    #[test]
    fn test_form_error_malformed() {
        let err = FormError::malformed("notify.0.type", "unknown variant");
        let msg = err.to_string();
        assert!(msg.contains("notify.0.type"));
        assert!(msg.contains("unknown variant"));
    }

    #[test]
    fn test_form_error_invalid_input() {
        let err = FormError::InvalidInput("bad input".to_string());
        assert!(err.to_string().contains("Invalid input"));
    }

    #[test]
    fn test_form_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: FormError = io_err.into();
        assert!(err.to_string().contains("IO error"));
    }

    #[test]
    fn test_form_error_from_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: FormError = json_err.into();
        assert!(matches!(err, FormError::Json(_)));
    }

    #[test]
    fn test_form_error_from_yaml() {
        let yaml_err = serde_yaml::from_str::<serde_json::Value>("a: [").unwrap_err();
        let err: FormError = yaml_err.into();
        assert!(err.to_string().contains("YAML error"));
    }

    #[test]
    fn test_form_error_from_toml() {
        let toml_err = toml::from_str::<toml::Value>("a = ").unwrap_err();
        let err: FormError = toml_err.into();
        assert!(err.to_string().contains("TOML error"));
    }

    #[test]
    fn test_result_error() {
        fn test_fn() -> Result<i32> {
            Err(FormError::InvalidInput("test".to_string()))
        }

        assert!(test_fn().is_err());
    }
}
