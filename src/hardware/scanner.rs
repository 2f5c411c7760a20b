// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Resource scanner with bounded retry
//!
//! Transient probe failures are retried up to the configured budget with a
//! small fixed backoff. GPU absence is a result, not a failure, so it never
//! consumes retries. Every successful scan is a fresh reading; nothing is
//! cached between calls.

use std::thread;
use std::time::Duration;

use crate::error::ScanError;

use super::probe::{HardwareProbe, SystemProbe};
use super::snapshot::{GpuInfo, SystemSnapshot};

/// Fixed pause between scan attempts.
const RETRY_BACKOFF: Duration = Duration::from_millis(200);

/// Queries live hardware state, retrying transient failures
#[derive(Debug)]
pub struct Scanner<P = SystemProbe> {
    probe: P,
    max_retries: u32,
}

impl Scanner {
    /// Scanner over the real hardware with the given retry budget.
    pub fn new(max_retries: u32) -> Self {
        Self::with_probe(SystemProbe, max_retries)
    }
}

impl<P: HardwareProbe> Scanner<P> {
    /// Scanner over an arbitrary probe (tests use deterministic fakes).
    pub fn with_probe(probe: P, max_retries: u32) -> Self {
        Self { probe, max_retries }
    }

    /// Take one snapshot of current hardware state.
    ///
    /// Fails with [`ScanError::RetriesExhausted`] only after
    /// `max_retries + 1` attempts have all hit transient errors; the error
    /// carries the last underlying failure.
    pub fn scan(&self) -> Result<SystemSnapshot, ScanError> {
        let attempts = self.max_retries + 1;
        let mut last = String::new();

        for attempt in 1..=attempts {
            match self.try_scan() {
                Ok(snapshot) => {
                    tracing::debug!(attempt, "hardware scan succeeded");
                    return Ok(snapshot);
                }
                Err(err) => {
                    tracing::debug!(attempt, error = %err, "hardware scan attempt failed");
                    last = err.to_string();
                    if attempt < attempts {
                        thread::sleep(RETRY_BACKOFF);
                    }
                }
            }
        }

        Err(ScanError::RetriesExhausted { attempts, last })
    }

    fn try_scan(&self) -> Result<SystemSnapshot, ScanError> {
        let ram = self.probe.memory()?;
        let gpu = match self.probe.gpu(&ram)? {
            Some(gpu) => gpu,
            None => GpuInfo::absent(),
        };
        Ok(SystemSnapshot { ram, gpu })
    }
}
