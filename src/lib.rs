// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! hcgk - hardware capability gatekeeper.
//!
//! Decides whether the current machine meets the resource requirements
//! needed to safely load a large in-memory workload (typically a local
//! LLM) before anything attempts to load it.
//!
//! Architecture, leaf-first:
//! - `config`: immutable validated thresholds and policy switches
//! - `hardware`: probes, retrying scanner, and the point-in-time snapshot
//! - `gatekeeper`: the authorization engine turning snapshot + config into
//!   a `Decision`
//! - `cli`, `commands`: the `hcgk` binary surface
//!
//! Library callers construct a [`Gatekeeper`] (optionally with their own
//! [`GatekeeperConfig`]) and call [`Gatekeeper::authorize`] for a decision
//! or [`Gatekeeper::system_info`] for the raw snapshot.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod gatekeeper;
pub mod hardware;

pub use config::GatekeeperConfig;
pub use error::{HcgkError, Result, ScanError};
pub use gatekeeper::{Decision, Gatekeeper};
pub use hardware::{GpuInfo, RamInfo, Scanner, SystemSnapshot};
