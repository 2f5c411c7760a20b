// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Error types for the gatekeeper
//!
//! Authorization denial is NOT an error: a denied check is a normal
//! `Decision { authorized: false, .. }` return. Errors cover invalid
//! configuration and hardware scans that failed after the retry budget.

use thiserror::Error;

/// Main error type for gatekeeper operations
#[derive(Error, Debug)]
pub enum HcgkError {
    /// Invalid threshold, margin, or retry value at construction or load time
    #[error("Configuration error: {0}")]
    Config(String),

    /// Hardware scan failed after exhausting retries
    #[error("Scan error: {0}")]
    Scan(#[from] ScanError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Scan-specific error types
///
/// `MemoryQuery` and `GpuQuery` are transient per-attempt failures; the
/// scanner retries them. A missing GPU is not an error at all.
/// `RetriesExhausted` is what a caller of `scan()` ultimately sees.
#[derive(Error, Debug, Clone)]
pub enum ScanError {
    /// Memory statistics could not be read from the OS
    #[error("memory query failed: {0}")]
    MemoryQuery(String),

    /// GPU state could not be read (distinct from "no GPU present")
    #[error("GPU query failed: {0}")]
    GpuQuery(String),

    /// Retry budget exhausted; carries the last underlying error
    #[error("hardware scan failed after {attempts} attempt(s): {last}")]
    RetriesExhausted { attempts: u32, last: String },
}

/// Result type alias for gatekeeper operations
pub type Result<T> = std::result::Result<T, HcgkError>;
