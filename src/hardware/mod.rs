// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Hardware state scanning
//!
//! One `Scanner::scan()` call yields one immutable `SystemSnapshot` of
//! RAM/GPU/VRAM state. Probes sit behind the `HardwareProbe` trait so the
//! retry loop can be tested without real hardware.

pub mod probe;
pub mod scanner;
pub mod snapshot;

pub use probe::*;
pub use scanner::*;
pub use snapshot::*;
