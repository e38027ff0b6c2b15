// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! svcform - resolve, validate and minimize service edit forms
//!
//! Entry point for the svcform CLI application.

use anyhow::Context;
use clap::Parser;

use svcform::cli::{Cli, Commands};
use svcform::commands;
use svcform::config::SessionDefaults;

fn main() -> anyhow::Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize tracing
    let mut env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing::Level::WARN.into());

    // `-v` shows minimization decisions, `-vv` everything. `RUST_LOG` still
    // takes precedence.
    let directive = match cli.verbose {
        0 => None,
        1 => Some("svcform=debug"),
        _ => Some("svcform=trace"),
    };
    if let Some(parsed) = directive.and_then(|directive| directive.parse().ok()) {
        env_filter = env_filter.add_directive(parsed);
    }

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    // Load session defaults
    let session = match &cli.defaults {
        Some(path) => SessionDefaults::load_from(path)
            .with_context(|| format!("loading defaults from {}", path.display()))?,
        None => SessionDefaults::load().context("loading session defaults")?,
    };

    // Dispatch to appropriate command
    match &cli.command {
        Commands::Resolve(args) => {
            commands::resolve::execute(args, &session, &cli.format)
                .with_context(|| format!("resolving {}", args.service.display()))?;
        }
        Commands::Validate(args) => {
            let valid = commands::validate::execute(args, &session, &cli.format)
                .with_context(|| format!("validating {}", args.service.display()))?;
            if !valid {
                std::process::exit(1);
            }
        }
        Commands::Minimize(args) => {
            commands::minimize::execute(args, &session, &cli.format)
                .with_context(|| format!("minimizing {}", args.service.display()))?;
        }
        Commands::Fields(args) => {
            commands::fields::execute(args, &session, &cli.format)
                .with_context(|| format!("reading {}", args.service.display()))?;
        }
        Commands::Defaults => {
            commands::defaults::execute(&session, &cli.format)?;
        }
    }

    Ok(())
}
