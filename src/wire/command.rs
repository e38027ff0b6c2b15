// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Command list wire form: each command as its argv.

use serde_json::Value;

use super::minimize_list;
use crate::config::SessionDefaults;
use crate::model::Command;
use crate::schema::default_rows;

/// Minimize the command list, `None` to inherit the default commands.
pub fn minimize(form: &[Command], session: &SessionDefaults) -> Option<Value> {
    let default_rows: Vec<Command> = default_rows(
        session.defaults.service.get("command"),
        session.hard_defaults.service.get("command"),
    );
    minimize_list("command", form, &default_rows, |_| Value::Null, to_wire)
}

/// Argv of a command. Empty arguments are positional and stay; a command
/// with nothing but empty arguments is dropped.
pub fn to_wire(command: &Command) -> Option<Value> {
    if command.is_blank() {
        return None;
    }
    Some(Value::Array(
        command.argv().into_iter().map(Value::String).collect(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DefaultsTier;
    use serde_json::json;

    fn session_with_commands(commands: Value) -> SessionDefaults {
        SessionDefaults::default().with_defaults(DefaultsTier {
            service: json!({"command": commands}),
            ..Default::default()
        })
    }

    #[test]
    fn test_empty_list_inherits() {
        let session = session_with_commands(json!([{"args": [{"arg": "ls"}]}]));
        assert_eq!(minimize(&[], &session), None);
    }

    #[test]
    fn test_same_as_default_inherits() {
        let session = session_with_commands(json!([{"args": [{"arg": "ls"}, {"arg": "-la"}]}]));
        let form = vec![Command::from_argv(&["ls", "-la"])];
        assert_eq!(minimize(&form, &session), None);
    }

    #[test]
    fn test_changed_command_sent_as_argv() {
        let session = SessionDefaults::default();
        let form = vec![Command::from_argv(&["echo", "", "done"])];
        assert_eq!(minimize(&form, &session), Some(json!([["echo", "", "done"]])));
    }

    #[test]
    fn test_blank_rows_dropped() {
        let session = SessionDefaults::default();
        let form = vec![Command::from_argv(&[""]), Command::from_argv(&["true"])];
        assert_eq!(minimize(&form, &session), Some(json!([["true"]])));
        assert_eq!(minimize(&[Command::from_argv(&["", ""])], &session), Some(json!([])));
    }
}
