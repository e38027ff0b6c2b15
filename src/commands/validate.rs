// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Validate a service form

use serde::Serialize;

use crate::cli::args::{OutputFormat, ValidateArgs};
use crate::config::SessionDefaults;
use crate::error::Result;
use crate::schema::{Violation, Warning};

use super::{load_form, print};

#[derive(Serialize)]
struct Report<'a> {
    valid: bool,
    violations: &'a [Violation],
    warnings: &'a [Warning],
}

/// Execute the validate command. Returns whether the form is valid.
pub fn execute(args: &ValidateArgs, session: &SessionDefaults, format: &OutputFormat) -> Result<bool> {
    let form = load_form(&args.service, session, &args.existing)?;
    let validation = form.validate_initial();
    let valid = validation.is_valid();

    if matches!(format, OutputFormat::Json) {
        let report = Report {
            valid,
            violations: validation.violations(),
            warnings: &form.warnings,
        };
        print(&report, format)?;
        return Ok(valid);
    }

    for warning in &form.warnings {
        println!("warning: {warning}");
    }
    for violation in validation.violations() {
        println!("error: {violation}");
    }
    if valid {
        println!("{}: ok", args.service.display());
    } else {
        println!(
            "{}: {} problem(s)",
            args.service.display(),
            validation.violations().len()
        );
    }
    Ok(valid)
}
