// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Active configuration display command

use crate::cli::args::ConfigArgs;
use crate::config::GatekeeperConfig;
use crate::error::Result;

/// Execute the config command.
pub fn execute(config: &GatekeeperConfig, args: &ConfigArgs) -> Result<()> {
    if args.json {
        println!("{}", serde_json::to_string_pretty(config)?);
        return Ok(());
    }

    println!("=== Active Configuration ===");
    println!("min_ram_gb:        {:.1}", config.min_ram_gb);
    println!("min_vram_gb:       {:.1}", config.min_vram_gb);
    println!("min_ram_no_gpu_gb: {:.1}", config.min_ram_no_gpu_gb);
    println!("ram_safety_margin: {}", config.ram_safety_margin);
    println!("max_scan_retries:  {}", config.max_scan_retries);
    println!("strict_mode:       {}", config.strict_mode);

    Ok(())
}
