// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::error::{FormError, Result};

use super::migration;
use super::{DefaultsTier, SessionDefaults};

/// Parse a JSON, YAML or TOML document, picked by file extension.
/// Anything without a known extension is read as JSON.
pub fn parse_document(path: &Path, content: &str) -> Result<Value> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    let value = match extension.as_deref() {
        Some("yaml") | Some("yml") => serde_yaml::from_str(content)?,
        Some("toml") => {
            let table: toml::Value = toml::from_str(content)?;
            serde_json::to_value(table)?
        }
        _ => serde_json::from_str(content)?,
    };
    Ok(value)
}

/// Read and parse a document from disk.
pub fn read_document(path: &Path) -> Result<Value> {
    let content = std::fs::read_to_string(path)?;
    parse_document(path, &content)
}

impl SessionDefaults {
    /// Get the default defaults file path.
    pub fn default_path() -> PathBuf {
        Self::svcform_home().join("defaults.yaml")
    }

    /// Load session defaults from the default path.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::default_path())
    }

    /// Load session defaults from a specific path.
    ///
    /// A missing file yields the built-in hard defaults. The file's
    /// `hard_defaults` are merged over the built-ins rather than replacing them.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("no defaults file at {}, using built-ins", path.display());
            return Ok(Self::default());
        }

        let raw_value = read_document(path)
            .map_err(|err| FormError::Config(format!("{}: {}", path.display(), err)))?;
        Self::from_document(raw_value)
            .map_err(|err| FormError::Config(format!("{}: {}", path.display(), err)))
    }

    /// Build session defaults from an already parsed document.
    pub fn from_document(raw_value: Value) -> Result<Self> {
        let mut migrated = migration::migrate_on_load(raw_value);
        if migrated.is_null() {
            return Ok(Self::default());
        }

        let builtin = serde_json::to_value(DefaultsTier::builtin())?;
        if let Value::Object(root) = &mut migrated {
            let hard = root.remove("hard_defaults").unwrap_or(Value::Null);
            let hard = match hard {
                Value::Null => builtin,
                overlay => migration::deep_merge(builtin, overlay),
            };
            root.insert("hard_defaults".to_string(), hard);
        }

        let mut session: SessionDefaults = serde_json::from_value(migrated)?;
        session.normalize_mains();
        Ok(session)
    }

    /// Get the svcform home directory (~/.svcform or $SVCFORM_HOME).
    pub fn svcform_home() -> PathBuf {
        if let Ok(home) = std::env::var("SVCFORM_HOME") {
            return PathBuf::from(home);
        }
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".svcform")
    }
}
