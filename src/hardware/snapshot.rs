// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Point-in-time system state
//!
//! A snapshot is immutable and owned solely by the caller that requested
//! it; the engine never caches one across `authorize()` calls.

use serde::{Deserialize, Serialize};

const BYTES_PER_GB: f64 = (1024u64 * 1024 * 1024) as f64;
const MIB_PER_GB: f64 = 1024.0;

/// Convert a byte count from the OS into fractional gigabytes.
pub fn bytes_to_gb(bytes: u64) -> f64 {
    bytes as f64 / BYTES_PER_GB
}

/// Convert a MiB count (nvidia-smi reports MiB) into fractional gigabytes.
pub fn mib_to_gb(mib: u64) -> f64 {
    mib as f64 / MIB_PER_GB
}

/// System RAM state in GB
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RamInfo {
    pub total_gb: f64,
    pub available_gb: f64,
}

/// GPU state; `available = false` means no usable GPU, which is a valid
/// terminal state, not an error
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GpuInfo {
    pub available: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vram_total_gb: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vram_available_gb: Option<f64>,
}

impl GpuInfo {
    /// The "no GPU present" state.
    pub fn absent() -> Self {
        Self {
            available: false,
            name: None,
            vram_total_gb: None,
            vram_available_gb: None,
        }
    }
}

/// One immutable point-in-time reading of RAM/GPU/VRAM state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemSnapshot {
    pub ram: RamInfo,
    pub gpu: GpuInfo,
}
