// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! CLI argument definitions using Clap
//!
//! Defines all command-line arguments and subcommands for hcgk.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// hcgk - hardware capability gatekeeper
#[derive(Parser, Debug)]
#[command(name = "hcgk")]
#[command(version, about = "Decide whether this machine can safely load a large local model")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Settings file path (defaults to ~/.hcgk/settings.json)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check whether current hardware is authorized; exit 0 if so, 1 if not
    Check(CheckArgs),

    /// Show the system hardware snapshot
    Info(InfoArgs),

    /// Show the active configuration
    #[command(alias = "settings")]
    Config(ConfigArgs),

    /// Validate the loaded configuration, exit 0/1
    Validate,
}

/// Arguments for the check subcommand
#[derive(clap::Args, Debug, Default)]
pub struct CheckArgs {
    /// Suppress message printing; the exit code carries the decision
    #[arg(short, long)]
    pub silent: bool,
}

/// Arguments for the info subcommand
#[derive(clap::Args, Debug, Default)]
pub struct InfoArgs {
    /// Print the snapshot as JSON
    #[arg(long)]
    pub json: bool,

    /// Print the configured requirements alongside the snapshot
    #[arg(short, long)]
    pub requirements: bool,
}

/// Arguments for the config subcommand
#[derive(clap::Args, Debug, Default)]
pub struct ConfigArgs {
    /// Print the configuration as JSON
    #[arg(long)]
    pub json: bool,
}
