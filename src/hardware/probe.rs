// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Hardware probes
//!
//! A probe answers two questions per attempt: what is the RAM state, and is
//! there a usable GPU. Outcomes form a closed set: `Ok(Some(gpu))` for a
//! present GPU, `Ok(None)` for permanent absence (terminal, never retried),
//! `Err` for a transient query failure (retried by the scanner).

use sysinfo::System;

use crate::error::ScanError;

use super::snapshot::{bytes_to_gb, mib_to_gb, GpuInfo, RamInfo};

/// A source of raw hardware readings.
///
/// Production code uses [`SystemProbe`]; tests substitute deterministic
/// fakes to exercise the scanner's retry behavior.
pub trait HardwareProbe {
    /// Read current RAM totals. Failure is transient.
    fn memory(&self) -> Result<RamInfo, ScanError>;

    /// Detect GPU presence and VRAM state. `Ok(None)` means no GPU, which
    /// is a valid terminal state. The RAM reading is passed in because
    /// unified-memory GPUs report VRAM from system memory.
    fn gpu(&self, ram: &RamInfo) -> Result<Option<GpuInfo>, ScanError>;
}

/// Production probe backed by sysinfo and platform GPU sources
#[derive(Debug, Default)]
pub struct SystemProbe;

impl HardwareProbe for SystemProbe {
    fn memory(&self) -> Result<RamInfo, ScanError> {
        let mut sys = System::new();
        sys.refresh_memory();

        let total = sys.total_memory();
        if total == 0 {
            return Err(ScanError::MemoryQuery(
                "OS reported zero total memory".to_string(),
            ));
        }

        // available_memory() reports 0 on some platforms; fall back to
        // total - used there.
        let mut available = sys.available_memory();
        if available == 0 {
            available = total.saturating_sub(sys.used_memory());
        }

        Ok(RamInfo {
            total_gb: bytes_to_gb(total),
            available_gb: bytes_to_gb(available),
        })
    }

    fn gpu(&self, ram: &RamInfo) -> Result<Option<GpuInfo>, ScanError> {
        detect_gpu(ram)
    }
}

/// Apple Silicon shares system memory with the GPU, so VRAM figures come
/// straight from the RAM reading. Intel Macs report no GPU here.
#[cfg(target_os = "macos")]
fn detect_gpu(ram: &RamInfo) -> Result<Option<GpuInfo>, ScanError> {
    if std::env::consts::ARCH == "aarch64" {
        return Ok(Some(GpuInfo {
            available: true,
            name: Some("Apple Silicon GPU".to_string()),
            vram_total_gb: Some(ram.total_gb),
            vram_available_gb: Some(ram.available_gb),
        }));
    }
    Ok(None)
}

/// NVIDIA is the supported discrete GPU path; nvidia-smi is the source of
/// truth for VRAM totals.
#[cfg(not(target_os = "macos"))]
fn detect_gpu(_ram: &RamInfo) -> Result<Option<GpuInfo>, ScanError> {
    use std::process::Command;

    let output = match Command::new("nvidia-smi")
        .args([
            "--query-gpu=name,memory.total,memory.free",
            "--format=csv,noheader,nounits",
        ])
        .output()
    {
        Ok(output) => output,
        // No binary on PATH means no NVIDIA driver stack: terminal absence.
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(ScanError::GpuQuery(format!(
                "failed to run nvidia-smi: {e}"
            )))
        }
    };

    // Tooling present but no usable device behind it.
    if !output.status.success() {
        return Ok(None);
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    match stdout.lines().find(|l| !l.trim().is_empty()) {
        Some(line) => parse_nvidia_smi_line(line).map(Some),
        None => Ok(None),
    }
}

/// Parse one `name, memory.total, memory.free` CSV line (MiB, nounits).
#[cfg(any(not(target_os = "macos"), test))]
fn parse_nvidia_smi_line(line: &str) -> Result<GpuInfo, ScanError> {
    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    if fields.len() != 3 {
        return Err(ScanError::GpuQuery(format!(
            "unexpected nvidia-smi output: '{line}'"
        )));
    }

    let total_mib: u64 = fields[1].parse().map_err(|_| {
        ScanError::GpuQuery(format!("unexpected nvidia-smi memory.total: '{}'", fields[1]))
    })?;
    let free_mib: u64 = fields[2].parse().map_err(|_| {
        ScanError::GpuQuery(format!("unexpected nvidia-smi memory.free: '{}'", fields[2]))
    })?;

    Ok(GpuInfo {
        available: true,
        name: Some(fields[0].to_string()),
        vram_total_gb: Some(mib_to_gb(total_mib)),
        vram_available_gb: Some(mib_to_gb(free_mib)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_probe_smoke() {
        let ram = SystemProbe.memory().unwrap();
        assert!(ram.total_gb > 0.0);
        assert!(ram.available_gb > 0.0);
        assert!(ram.available_gb.is_finite());
    }

    #[test]
    fn test_gpu_probe_does_not_panic() {
        let ram = RamInfo {
            total_gb: 16.0,
            available_gb: 8.0,
        };
        // Present, absent, or transient failure are all acceptable here;
        // the point is that probing a machine without a GPU is not a panic.
        let _ = SystemProbe.gpu(&ram);
    }

    #[test]
    fn test_parse_nvidia_smi_line() {
        let gpu =
            parse_nvidia_smi_line("NVIDIA GeForce RTX 4090, 24564, 20480").unwrap();
        assert!(gpu.available);
        assert_eq!(gpu.name.as_deref(), Some("NVIDIA GeForce RTX 4090"));
        assert!((gpu.vram_total_gb.unwrap() - 23.98828125).abs() < 1e-9);
        assert!((gpu.vram_available_gb.unwrap() - 20.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_parse_nvidia_smi_line_wrong_field_count() {
        let err = parse_nvidia_smi_line("NVIDIA GeForce RTX 4090, 24564").unwrap_err();
        assert!(matches!(err, ScanError::GpuQuery(_)));
        assert!(err.to_string().contains("unexpected nvidia-smi output"));
    }

    #[test]
    fn test_parse_nvidia_smi_line_non_numeric_memory() {
        let err =
            parse_nvidia_smi_line("NVIDIA GeForce RTX 4090, lots, 20480").unwrap_err();
        assert!(err.to_string().contains("memory.total"));
    }

    #[test]
    fn test_parse_nvidia_smi_line_non_numeric_free() {
        let err =
            parse_nvidia_smi_line("NVIDIA GeForce RTX 4090, 24564, [N/A]").unwrap_err();
        assert!(err.to_string().contains("memory.free"));
    }
}
