// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Configuration validation command
//!
//! Invalid settings already fail in `main` during loading, so reaching this
//! point means the configuration passed; this confirms it to the user.

use crate::config::GatekeeperConfig;

/// Execute the validate command.
pub fn execute(config: &GatekeeperConfig) {
    println!("configuration valid");
    println!(
        "thresholds: {:.1}GB RAM / {:.1}GB VRAM with GPU, {:.1}GB RAM without",
        config.min_ram_gb, config.min_vram_gb, config.min_ram_no_gpu_gb
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_execute_prints_without_panicking() {
        execute(&GatekeeperConfig::default());
    }
}
