// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Authorization engine
//!
//! Combines one fresh `SystemSnapshot` with a `GatekeeperConfig` and renders
//! a deterministic allow/deny decision. Denial is a normal return value;
//! `authorize()` never propagates scan errors, it folds them into a denial
//! whose tone depends on strict mode.

use serde::Serialize;

use crate::config::GatekeeperConfig;
use crate::error::{Result, ScanError};
use crate::hardware::{HardwareProbe, Scanner, SystemProbe, SystemSnapshot};

/// The outcome of an authorization check: a value, not an error
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Decision {
    pub authorized: bool,
    pub message: String,
}

/// Decides whether this machine may load the workload
#[derive(Debug)]
pub struct Gatekeeper<P = SystemProbe> {
    config: GatekeeperConfig,
    scanner: Scanner<P>,
    silent: bool,
}

impl Gatekeeper {
    /// Gatekeeper over the default configuration and the real hardware.
    pub fn new() -> Self {
        let config = GatekeeperConfig::default();
        let scanner = Scanner::new(config.max_scan_retries);
        Self {
            config,
            scanner,
            silent: false,
        }
    }

    /// Gatekeeper over an explicit configuration, which is validated here.
    pub fn with_config(config: GatekeeperConfig) -> Result<Self> {
        let config = config.validated()?;
        let scanner = Scanner::new(config.max_scan_retries);
        Ok(Self {
            config,
            scanner,
            silent: false,
        })
    }
}

impl Default for Gatekeeper {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: HardwareProbe> Gatekeeper<P> {
    /// Gatekeeper over an arbitrary probe (tests use deterministic fakes).
    pub fn with_config_and_probe(config: GatekeeperConfig, probe: P) -> Result<Self> {
        let config = config.validated()?;
        let scanner = Scanner::with_probe(probe, config.max_scan_retries);
        Ok(Self {
            config,
            scanner,
            silent: false,
        })
    }

    /// Suppress log output. Never changes returned values.
    pub fn silent(mut self, silent: bool) -> Self {
        self.silent = silent;
        self
    }

    /// The active configuration.
    pub fn config(&self) -> &GatekeeperConfig {
        &self.config
    }

    /// Scan current hardware and decide.
    ///
    /// Each call re-scans; decisions always reflect current state. A scan
    /// failure becomes a denial, never an error.
    pub fn authorize(&self) -> Decision {
        let decision = match self.scanner.scan() {
            Ok(snapshot) => self.evaluate(&snapshot),
            Err(err) => self.scan_failure_decision(&err),
        };
        if !self.silent {
            tracing::info!(authorized = decision.authorized, "authorization decision");
        }
        decision
    }

    /// Evaluate policy against a caller-supplied snapshot.
    ///
    /// Pure and deterministic: identical snapshot and configuration always
    /// produce an identical decision.
    pub fn evaluate(&self, snapshot: &SystemSnapshot) -> Decision {
        let cfg = &self.config;

        let required_ram = if snapshot.gpu.available {
            cfg.min_ram_gb
        } else {
            cfg.min_ram_no_gpu_gb
        };
        let adjusted_ram = snapshot.ram.available_gb * (1.0 - cfg.ram_safety_margin);
        let margin_pct = cfg.ram_safety_margin * 100.0;

        let ram_ok = adjusted_ram >= required_ram;
        // No GPU: the VRAM floor is vacuously satisfied. A present GPU whose
        // VRAM cannot be read fails the check, since the floor is unverifiable.
        let vram_ok = if snapshot.gpu.available {
            snapshot
                .gpu
                .vram_available_gb
                .is_some_and(|v| v >= cfg.min_vram_gb)
        } else {
            true
        };

        if ram_ok && vram_ok {
            let mut message = format!(
                "hardware authorized: RAM {adjusted_ram:.1}GB available \
                 (after {margin_pct:.0}% margin) >= {required_ram:.1}GB required"
            );
            if snapshot.gpu.available {
                if let Some(vram) = snapshot.gpu.vram_available_gb {
                    message.push_str(&format!(
                        "; VRAM {vram:.1}GB available >= {:.1}GB required",
                        cfg.min_vram_gb
                    ));
                }
            } else {
                message.push_str("; no GPU detected, CPU-only thresholds applied");
            }
            return Decision {
                authorized: true,
                message,
            };
        }

        // Name every unmet dimension with measured vs required values.
        let mut shortfalls = Vec::new();
        if !ram_ok {
            shortfalls.push(format!(
                "RAM {adjusted_ram:.1}GB available (after {margin_pct:.0}% margin) \
                 < {required_ram:.1}GB required"
            ));
        }
        if !vram_ok {
            match snapshot.gpu.vram_available_gb {
                Some(vram) => shortfalls.push(format!(
                    "VRAM {vram:.1}GB available < {:.1}GB required",
                    cfg.min_vram_gb
                )),
                None => shortfalls.push(format!(
                    "VRAM could not be measured ({:.1}GB required)",
                    cfg.min_vram_gb
                )),
            }
        }
        let detail = shortfalls.join("; ");

        let message = if cfg.strict_mode {
            format!("authorization denied: {detail}")
        } else {
            format!("warning: {detail}; authorization withheld")
        };

        Decision {
            authorized: false,
            message,
        }
    }

    /// Fold a scan failure into a denial per strict mode.
    ///
    /// Pessimistic in both modes: with no valid data there is nothing to
    /// authorize against. Lenient mode only softens the phrasing.
    pub fn scan_failure_decision(&self, error: &ScanError) -> Decision {
        if !self.silent {
            tracing::warn!(error = %error, "hardware scan failed");
        }
        let message = if self.config.strict_mode {
            format!("authorization denied: {error}")
        } else {
            format!("warning: could not verify hardware ({error}); proceeding with caution, authorization withheld")
        };
        Decision {
            authorized: false,
            message,
        }
    }

    /// Expose the raw snapshot used internally, bypassing policy.
    ///
    /// Unlike `authorize()`, scan errors propagate verbatim here.
    pub fn system_info(&self) -> Result<SystemSnapshot> {
        Ok(self.scanner.scan()?)
    }
}
