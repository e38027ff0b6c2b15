// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! CLI argument definitions using Clap

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// svcform - resolve, validate and minimize service edit forms
#[derive(Parser, Debug)]
#[command(name = "svcform")]
#[command(version, about = "Resolve, validate and minimize service edit forms")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Session defaults file (JSON, YAML or TOML)
    #[arg(long, global = true)]
    pub defaults: Option<PathBuf>,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output format
    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the service as it takes effect over its defaults
    Resolve(ServiceArgs),

    /// Check the service form and report violations
    #[command(alias = "check")]
    Validate(ValidateArgs),

    /// Print the payload sent when saving the service form
    Minimize(MinimizeArgs),

    /// Show which fields of the service still use their defaults
    Fields(ServiceArgs),

    /// Print the effective service defaults
    Defaults,
}

/// A service file to operate on
#[derive(clap::Args, Debug)]
pub struct ServiceArgs {
    /// Service form file (JSON, YAML or TOML)
    pub service: PathBuf,
}

/// Arguments for the validate subcommand
#[derive(clap::Args, Debug)]
pub struct ValidateArgs {
    /// Service form file (JSON, YAML or TOML)
    pub service: PathBuf,

    /// Names of the other services, which the name must not reuse
    #[arg(short, long, value_delimiter = ',')]
    pub existing: Vec<String>,
}

/// Arguments for the minimize subcommand
#[derive(clap::Args, Debug)]
pub struct MinimizeArgs {
    /// Service form file (JSON, YAML or TOML)
    pub service: PathBuf,

    /// Leave out inherited list fields instead of sending them as null
    #[arg(long)]
    pub compact: bool,
}

/// Output format for results
#[derive(ValueEnum, Clone, Debug, Default, PartialEq)]
pub enum OutputFormat {
    /// Plain text output
    #[default]
    Text,

    /// JSON output
    Json,
}
