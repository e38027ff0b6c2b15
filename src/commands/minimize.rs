// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Print the payload for saving a service form

use crate::cli::args::{MinimizeArgs, OutputFormat};
use crate::config::SessionDefaults;
use crate::error::Result;
use crate::wire;

use super::{load_form, print, print_warnings};

/// Execute the minimize command
pub fn execute(args: &MinimizeArgs, session: &SessionDefaults, format: &OutputFormat) -> Result<()> {
    let form = load_form(&args.service, session, &[])?;
    print_warnings(&form.warnings);
    let payload = if args.compact {
        wire::service::compact(&form.initial_value, session)
    } else {
        wire::service::minimize(&form.initial_value, session)
    };
    print(&payload, format)
}
