// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Commands run on approval of a new version

use serde::{Deserialize, Serialize};

use super::Record;

/// A single argument of a command
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Arg {
    pub arg: String,
}

/// A command as its list of arguments, program first
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Command {
    pub args: Vec<Arg>,
}

impl Command {
    /// Build a command from its argv
    pub fn from_argv(argv: &[&str]) -> Self {
        Self {
            args: argv
                .iter()
                .map(|arg| Arg {
                    arg: arg.to_string(),
                })
                .collect(),
        }
    }

    /// The argv of this command
    pub fn argv(&self) -> Vec<String> {
        self.args.iter().map(|a| a.arg.clone()).collect()
    }

    /// Whether every argument is empty
    pub fn is_blank(&self) -> bool {
        self.args.iter().all(|a| a.arg.is_empty())
    }
}

impl Record for Command {
    // Empty arguments are positional.
    const KEEP_EMPTY: &'static [&'static str] = &["args"];

    fn kind() -> &'static str {
        "command"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_argv_round_trip() {
        let command = Command::from_argv(&["echo", "", "done"]);
        assert_eq!(command.argv(), vec!["echo", "", "done"]);
        assert!(!command.is_blank());
        assert!(Command::from_argv(&["", ""]).is_blank());
    }
}
