// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Subcommand implementations
//!
//! One module per CLI subcommand; each renders a decision or report and
//! hands an exit code back to `main`.

pub mod check;
pub mod config;
pub mod info;
pub mod validate;
