// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Loading pipeline: defaults -> settings file -> environment -> validation
//!
//! The settings file is optional and partial; environment variables win over
//! it. Malformed values surface as configuration errors, never silently
//! ignored.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{HcgkError, Result};

use super::GatekeeperConfig;

// Environment variables recognized by the loader, one per config field.
pub const ENV_MIN_RAM_GB: &str = "HCGK_MIN_RAM_GB";
pub const ENV_MIN_VRAM_GB: &str = "HCGK_MIN_VRAM_GB";
pub const ENV_MIN_RAM_NO_GPU_GB: &str = "HCGK_MIN_RAM_NO_GPU_GB";
pub const ENV_RAM_SAFETY_MARGIN: &str = "HCGK_RAM_SAFETY_MARGIN";
pub const ENV_MAX_SCAN_RETRIES: &str = "HCGK_MAX_SCAN_RETRIES";
pub const ENV_STRICT_MODE: &str = "HCGK_STRICT_MODE";

/// Partial settings as stored on disk; any subset of fields may appear.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SettingsOverlay {
    min_ram_gb: Option<f64>,
    min_vram_gb: Option<f64>,
    min_ram_no_gpu_gb: Option<f64>,
    ram_safety_margin: Option<f64>,
    max_scan_retries: Option<u32>,
    strict_mode: Option<bool>,
}

impl GatekeeperConfig {
    /// Get the hcgk home directory (~/.hcgk or $HCGK_HOME).
    pub fn hcgk_home() -> PathBuf {
        if let Ok(home) = std::env::var("HCGK_HOME") {
            return PathBuf::from(home);
        }
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".hcgk")
    }

    /// Get the default settings file path.
    pub fn default_path() -> PathBuf {
        Self::hcgk_home().join("settings.json")
    }

    /// Load from the default path, then apply environment overrides.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::default_path())
    }

    /// Load from a specific path, then apply environment overrides.
    ///
    /// A missing file is not an error; defaults are used. A file that exists
    /// but does not parse is.
    pub fn load_from(path: &Path) -> Result<Self> {
        let mut config = Self::default();

        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let overlay: SettingsOverlay = serde_json::from_str(&content).map_err(|e| {
                HcgkError::Config(format!("invalid settings file {}: {e}", path.display()))
            })?;
            config = config.apply_overlay(overlay);
        }

        config.with_env_overrides()?.validated()
    }

    /// Apply `HCGK_*` environment overrides from the process environment.
    pub fn with_env_overrides(self) -> Result<Self> {
        self.with_env_overrides_from(|key| std::env::var(key).ok())
    }

    /// Apply environment overrides through an arbitrary lookup.
    ///
    /// Factored over the lookup so tests can inject a map instead of racing
    /// on process-global environment state.
    pub fn with_env_overrides_from(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        if let Some(raw) = lookup(ENV_MIN_RAM_GB) {
            self.min_ram_gb = parse_float(ENV_MIN_RAM_GB, &raw)?;
        }
        if let Some(raw) = lookup(ENV_MIN_VRAM_GB) {
            self.min_vram_gb = parse_float(ENV_MIN_VRAM_GB, &raw)?;
        }
        if let Some(raw) = lookup(ENV_MIN_RAM_NO_GPU_GB) {
            self.min_ram_no_gpu_gb = parse_float(ENV_MIN_RAM_NO_GPU_GB, &raw)?;
        }
        if let Some(raw) = lookup(ENV_RAM_SAFETY_MARGIN) {
            self.ram_safety_margin = parse_float(ENV_RAM_SAFETY_MARGIN, &raw)?;
        }
        if let Some(raw) = lookup(ENV_MAX_SCAN_RETRIES) {
            self.max_scan_retries = raw.trim().parse().map_err(|_| {
                HcgkError::Config(format!(
                    "{ENV_MAX_SCAN_RETRIES}: expected a non-negative integer, got '{raw}'"
                ))
            })?;
        }
        if let Some(raw) = lookup(ENV_STRICT_MODE) {
            self.strict_mode = parse_bool(ENV_STRICT_MODE, &raw)?;
        }
        Ok(self)
    }

    fn apply_overlay(mut self, overlay: SettingsOverlay) -> Self {
        if let Some(v) = overlay.min_ram_gb {
            self.min_ram_gb = v;
        }
        if let Some(v) = overlay.min_vram_gb {
            self.min_vram_gb = v;
        }
        if let Some(v) = overlay.min_ram_no_gpu_gb {
            self.min_ram_no_gpu_gb = v;
        }
        if let Some(v) = overlay.ram_safety_margin {
            self.ram_safety_margin = v;
        }
        if let Some(v) = overlay.max_scan_retries {
            self.max_scan_retries = v;
        }
        if let Some(v) = overlay.strict_mode {
            self.strict_mode = v;
        }
        self
    }
}

fn parse_float(var: &str, raw: &str) -> Result<f64> {
    raw.trim()
        .parse()
        .map_err(|_| HcgkError::Config(format!("{var}: expected a number, got '{raw}'")))
}

fn parse_bool(var: &str, raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(HcgkError::Config(format!(
            "{var}: expected a boolean, got '{raw}'"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn apply(config: GatekeeperConfig, vars: &HashMap<String, String>) -> Result<GatekeeperConfig> {
        config.with_env_overrides_from(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_empty_env_leaves_defaults() {
        let config = apply(GatekeeperConfig::default(), &env(&[])).unwrap();
        assert_eq!(config, GatekeeperConfig::default());
    }

    #[test]
    fn test_env_overrides_each_field() {
        let vars = env(&[
            (ENV_MIN_RAM_GB, "12.5"),
            (ENV_MIN_VRAM_GB, "6"),
            (ENV_MIN_RAM_NO_GPU_GB, "24"),
            (ENV_RAM_SAFETY_MARGIN, "0.2"),
            (ENV_MAX_SCAN_RETRIES, "5"),
            (ENV_STRICT_MODE, "true"),
        ]);
        let config = apply(GatekeeperConfig::default(), &vars).unwrap();
        assert!((config.min_ram_gb - 12.5).abs() < f64::EPSILON);
        assert!((config.min_vram_gb - 6.0).abs() < f64::EPSILON);
        assert!((config.min_ram_no_gpu_gb - 24.0).abs() < f64::EPSILON);
        assert!((config.ram_safety_margin - 0.2).abs() < f64::EPSILON);
        assert_eq!(config.max_scan_retries, 5);
        assert!(config.strict_mode);
    }

    #[test]
    fn test_env_value_whitespace_trimmed() {
        let vars = env(&[(ENV_MIN_RAM_GB, " 10.0 ")]);
        let config = apply(GatekeeperConfig::default(), &vars).unwrap();
        assert!((config.min_ram_gb - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_malformed_float_names_the_variable() {
        let vars = env(&[(ENV_RAM_SAFETY_MARGIN, "lots")]);
        let err = apply(GatekeeperConfig::default(), &vars).unwrap_err();
        assert!(matches!(err, HcgkError::Config(_)));
        assert!(err.to_string().contains(ENV_RAM_SAFETY_MARGIN));
        assert!(err.to_string().contains("lots"));
    }

    #[test]
    fn test_malformed_retries_rejected() {
        let vars = env(&[(ENV_MAX_SCAN_RETRIES, "-1")]);
        let err = apply(GatekeeperConfig::default(), &vars).unwrap_err();
        assert!(err.to_string().contains(ENV_MAX_SCAN_RETRIES));
    }

    #[test]
    fn test_bool_spellings() {
        for (raw, expected) in [
            ("true", true),
            ("TRUE", true),
            ("1", true),
            ("yes", true),
            ("on", true),
            ("false", false),
            ("0", false),
            ("no", false),
            ("off", false),
        ] {
            let vars = env(&[(ENV_STRICT_MODE, raw)]);
            let config = apply(GatekeeperConfig::default(), &vars).unwrap();
            assert_eq!(config.strict_mode, expected, "spelling {raw:?}");
        }
    }

    #[test]
    fn test_malformed_bool_rejected() {
        let vars = env(&[(ENV_STRICT_MODE, "maybe")]);
        let err = apply(GatekeeperConfig::default(), &vars).unwrap_err();
        assert!(err.to_string().contains(ENV_STRICT_MODE));
    }

    #[test]
    fn test_load_from_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = GatekeeperConfig::load_from(&dir.path().join("nope.json")).unwrap();
        assert_eq!(config.max_scan_retries, GatekeeperConfig::default().max_scan_retries);
    }

    #[test]
    fn test_load_from_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{"min_ram_gb": 32.0, "strict_mode": true}"#).unwrap();

        let config = GatekeeperConfig::load_from(&path).unwrap();
        assert!((config.min_ram_gb - 32.0).abs() < f64::EPSILON);
        assert!(config.strict_mode);
        // Untouched fields keep their defaults.
        assert!((config.min_vram_gb - 4.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_load_from_corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{not json").unwrap();

        let err = GatekeeperConfig::load_from(&path).unwrap_err();
        assert!(matches!(err, HcgkError::Config(_)));
        assert!(err.to_string().contains("settings.json"));
    }

    #[test]
    fn test_load_from_invalid_values_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{"ram_safety_margin": 1.2}"#).unwrap();

        let err = GatekeeperConfig::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("ram_safety_margin"));
    }

    #[test]
    fn test_file_then_env_precedence() {
        // Environment wins over the file; exercised through the injectable
        // lookup since load_from reads the real process environment.
        let overlay: SettingsOverlay =
            serde_json::from_str(r#"{"min_ram_gb": 32.0}"#).unwrap();
        let vars = env(&[(ENV_MIN_RAM_GB, "64")]);

        let config = apply(GatekeeperConfig::default().apply_overlay(overlay), &vars).unwrap();
        assert!((config.min_ram_gb - 64.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_unknown_file_keys_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{"min_ram_gb": 9.0, "future_knob": 3}"#).unwrap();

        let config = GatekeeperConfig::load_from(&path).unwrap();
        assert!((config.min_ram_gb - 9.0).abs() < f64::EPSILON);
    }
}
