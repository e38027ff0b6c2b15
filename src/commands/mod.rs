// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Subcommand implementations
//!
//! Every subcommand reads a service form file, builds its schema against the
//! session defaults and prints one result. Text output is YAML, JSON output
//! is pretty-printed JSON.

use std::path::Path;

use serde::Serialize;

use crate::cli::OutputFormat;
use crate::config::{read_document, SessionDefaults};
use crate::error::{FormError, Result};
use crate::model::ServiceEdit;
use crate::schema::{self, FormSchema, Warning};

pub mod defaults;
pub mod fields;
pub mod minimize;
pub mod resolve;
pub mod validate;

/// Read a service form file and build its schema.
pub fn load_form(path: &Path, session: &SessionDefaults, existing: &[String]) -> Result<FormSchema<ServiceEdit>> {
    let data = read_document(path)?;
    tracing::debug!(path = %path.display(), "service form loaded");
    Ok(schema::service::build(Some(&data), session, existing))
}

/// Render a value in the requested format.
pub fn render<T: Serialize>(value: &T, format: &OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Text => serde_yaml::to_string(value).map_err(FormError::from),
    }
}

/// Print a value in the requested format.
pub fn print<T: Serialize>(value: &T, format: &OutputFormat) -> Result<()> {
    let rendered = render(value, format)?;
    println!("{}", rendered.trim_end());
    Ok(())
}

/// Report recovered bootstrap problems on stderr.
pub fn print_warnings(warnings: &[Warning]) {
    for warning in warnings {
        eprintln!("warning: {warning}");
    }
}
