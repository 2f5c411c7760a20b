// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! hcgk - hardware capability gatekeeper
//!
//! Entry point for the hcgk CLI binary.

use clap::Parser;

use hcgk::cli::{Cli, Commands};
use hcgk::commands;
use hcgk::config::GatekeeperConfig;
use hcgk::error::Result;

fn main() {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    match run(cli) {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(1);
        }
    }
}

/// Initialize tracing. `RUST_LOG` takes precedence over `-v`.
fn init_tracing(verbose: u8) {
    let mut env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing::Level::WARN.into());

    let directive = match verbose {
        0 => None,
        1 => Some("hcgk=debug"),
        _ => Some("hcgk=trace"),
    };
    if let Some(directive) = directive {
        if let Ok(parsed) = directive.parse() {
            env_filter = env_filter.add_directive(parsed);
        }
    }

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<i32> {
    // Defaults -> settings file -> environment -> validation. Any failure
    // here prints to stderr and exits 1, for `validate` like everything else.
    let config = match &cli.config {
        Some(path) => GatekeeperConfig::load_from(path)?,
        None => GatekeeperConfig::load()?,
    };

    match &cli.command {
        Commands::Check(args) => commands::check::execute(&config, args, cli.verbose),
        Commands::Info(args) => {
            commands::info::execute(&config, args)?;
            Ok(0)
        }
        Commands::Config(args) => {
            commands::config::execute(&config, args)?;
            Ok(0)
        }
        Commands::Validate => {
            commands::validate::execute(&config);
            Ok(0)
        }
    }
}
