// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Show which fields of a service use their defaults

use crate::cli::args::{OutputFormat, ServiceArgs};
use crate::config::SessionDefaults;
use crate::engine::IdentitySpec;
use crate::error::Result;
use crate::form::{field_states, FieldState};
use crate::model::Record;

use super::{load_form, print, print_warnings};

/// Identity fields of every record kind inside a service.
fn service_spec() -> IdentitySpec {
    IdentitySpec::new(["type", "method", "name", "action"])
}

/// Field states of the service's initial form value.
pub fn states(args: &ServiceArgs, session: &SessionDefaults) -> Result<Vec<FieldState>> {
    let form = load_form(&args.service, session, &[])?;
    print_warnings(&form.warnings);
    Ok(field_states(
        &form.initial_value.to_value(),
        &session.service_default(),
        &service_spec(),
    ))
}

/// Execute the fields command
pub fn execute(args: &ServiceArgs, session: &SessionDefaults, format: &OutputFormat) -> Result<()> {
    let states = states(args, session)?;
    if matches!(format, OutputFormat::Json) {
        return print(&states, format);
    }

    for state in &states {
        let marker = if state.using_defaults { "default" } else { "set" };
        println!("{:<8} {} = {}", marker, state.path, state.value);
    }
    Ok(())
}
