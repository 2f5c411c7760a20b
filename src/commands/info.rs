// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! System snapshot reporting command
//!
//! Pure data exposure: prints the same snapshot the engine would decide
//! on, with no policy logic applied.

use serde::Serialize;

use crate::cli::args::InfoArgs;
use crate::config::GatekeeperConfig;
use crate::error::Result;
use crate::gatekeeper::Gatekeeper;
use crate::hardware::SystemSnapshot;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct InfoReport<'a> {
    snapshot: &'a SystemSnapshot,
    #[serde(skip_serializing_if = "Option::is_none")]
    requirements: Option<&'a GatekeeperConfig>,
}

/// Execute the info command. Scan errors propagate verbatim.
pub fn execute(config: &GatekeeperConfig, args: &InfoArgs) -> Result<()> {
    let gatekeeper = Gatekeeper::with_config(config.clone())?;
    let snapshot = gatekeeper.system_info()?;

    if args.json {
        let report = InfoReport {
            snapshot: &snapshot,
            requirements: args.requirements.then_some(config),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    render_snapshot(&snapshot);

    if args.requirements {
        println!("\n=== Configured Requirements ===");
        println!("Min RAM (GPU present): {:.1}GB", config.min_ram_gb);
        println!("Min VRAM:              {:.1}GB", config.min_vram_gb);
        println!("Min RAM (no GPU):      {:.1}GB", config.min_ram_no_gpu_gb);
        println!(
            "RAM safety margin:     {:.0}%",
            config.ram_safety_margin * 100.0
        );
    }

    Ok(())
}

/// Human-readable snapshot rendering, shared with `check --verbose`.
pub fn render_snapshot(snapshot: &SystemSnapshot) {
    println!("=== System Hardware Snapshot ===");
    println!(
        "RAM: {:.1}GB total, {:.1}GB available",
        snapshot.ram.total_gb, snapshot.ram.available_gb
    );

    if snapshot.gpu.available {
        println!(
            "GPU: {}",
            snapshot.gpu.name.as_deref().unwrap_or("unknown GPU")
        );
        match (snapshot.gpu.vram_total_gb, snapshot.gpu.vram_available_gb) {
            (Some(total), Some(available)) => {
                println!("VRAM: {total:.1}GB total, {available:.1}GB available");
            }
            _ => println!("VRAM: not reported"),
        }
    } else {
        println!("GPU: none detected");
    }
}

#[cfg(test)]
mod tests {
    use crate::hardware::{GpuInfo, RamInfo};

    use super::*;

    #[test]
    fn test_info_report_json_shape() {
        let snapshot = SystemSnapshot {
            ram: RamInfo {
                total_gb: 32.0,
                available_gb: 20.0,
            },
            gpu: GpuInfo::absent(),
        };
        let config = GatekeeperConfig::default();

        let report = InfoReport {
            snapshot: &snapshot,
            requirements: Some(&config),
        };
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"snapshot\""));
        assert!(json.contains("\"requirements\""));
        assert!(json.contains("\"totalGb\":32.0"));
        assert!(json.contains("min_ram_gb"));
    }

    #[test]
    fn test_info_report_omits_requirements_by_default() {
        let snapshot = SystemSnapshot {
            ram: RamInfo {
                total_gb: 16.0,
                available_gb: 8.0,
            },
            gpu: GpuInfo::absent(),
        };
        let report = InfoReport {
            snapshot: &snapshot,
            requirements: None,
        };
        let json = serde_json::to_string(&report).unwrap();
        assert!(!json.contains("requirements"));
    }

    #[test]
    fn test_execute_against_real_hardware() {
        let args = InfoArgs {
            json: true,
            requirements: true,
        };
        execute(&GatekeeperConfig::default(), &args).unwrap();
    }
}
