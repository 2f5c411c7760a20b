// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Authorization check command

use crate::cli::args::CheckArgs;
use crate::config::GatekeeperConfig;
use crate::error::{HcgkError, Result};
use crate::gatekeeper::{Decision, Gatekeeper};

use super::info::render_snapshot;

/// Execute the check command; the returned code becomes the process exit code.
pub fn execute(config: &GatekeeperConfig, args: &CheckArgs, verbose: u8) -> Result<i32> {
    let gatekeeper = Gatekeeper::with_config(config.clone())?.silent(args.silent);

    // Scan once; the same snapshot feeds both the verbose report and the
    // decision so they can never disagree.
    let decision = match gatekeeper.system_info() {
        Ok(snapshot) => {
            if verbose > 0 && !args.silent {
                render_snapshot(&snapshot);
                println!();
            }
            gatekeeper.evaluate(&snapshot)
        }
        Err(HcgkError::Scan(err)) => gatekeeper.scan_failure_decision(&err),
        Err(other) => return Err(other),
    };

    if !args.silent {
        println!("{}", decision.message);
    }

    Ok(exit_code(&decision))
}

/// Map a decision onto the CLI contract: 0 authorized, 1 denied.
pub fn exit_code(decision: &Decision) -> i32 {
    if decision.authorized {
        0
    } else {
        1
    }
}
