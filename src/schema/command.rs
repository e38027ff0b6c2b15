// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Command list schema

use serde_json::Value;

use super::{decode_rows, default_rows, rules, FormSchema, Validation, ViolationKind};
use crate::engine::hollow_records;
use crate::model::Command;

/// Build the schema of a command list.
pub fn build(data: Option<&Value>, defaults: Option<&Value>, hard: Option<&Value>) -> FormSchema<Vec<Command>> {
    let mut warnings = Vec::new();
    let explicit: Vec<Command> = decode_rows(data, "", &mut warnings);
    let default_value: Vec<Command> = default_rows(defaults, hard);

    let initial_value = if explicit.is_empty() {
        hollow_records(&default_value)
    } else {
        explicit
    };

    let has_defaults = !default_value.is_empty();
    FormSchema {
        validator: Box::new(move |rows: &Vec<Command>| validate(rows, has_defaults)),
        initial_value,
        default_value,
        warnings,
    }
}

/// Validate command rows.
///
/// Every command needs a program unless the list falls back to a non-empty
/// default list. Identical commands are flagged.
pub fn validate(rows: &[Command], has_defaults: bool) -> Validation {
    let mut validation = Validation::new();
    for (index, command) in rows.iter().enumerate() {
        let program = command.args.first().map(|a| a.arg.as_str()).unwrap_or("");
        if program.is_empty() && !(has_defaults && command.is_blank()) {
            validation.push(
                format!("{index}.args.0.arg"),
                ViolationKind::Required,
                "command is required",
            );
        }
    }
    rules::unique_by(&mut validation, "", "args", rows, |command| {
        (!command.is_blank()).then(|| command.argv())
    });
    validation
}
