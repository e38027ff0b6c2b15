// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Print the service as it takes effect

use crate::cli::args::{OutputFormat, ServiceArgs};
use crate::config::SessionDefaults;
use crate::error::Result;
use crate::schema;

use super::{load_form, print, print_warnings};

/// Execute the resolve command
pub fn execute(args: &ServiceArgs, session: &SessionDefaults, format: &OutputFormat) -> Result<()> {
    let form = load_form(&args.service, session, &[])?;
    print_warnings(&form.warnings);
    let effective = schema::service::effective(&form.initial_value, session);
    print(&effective, format)
}
