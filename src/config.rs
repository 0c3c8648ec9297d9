// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Engine configuration: tie tolerances and construction thresholds

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default configuration file looked up by [`ProximityConfig::load`]
pub const CONFIG_FILE: &str = "polyprox.toml";

/// Band used to decide whether two candidate distances are tied
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tolerance {
    /// Absolute slack added to the minimum distance
    pub absolute: f64,
    /// Slack proportional to the minimum distance
    pub relative: f64,
}

impl Tolerance {
    pub const fn new(absolute: f64, relative: f64) -> Self {
        Self { absolute, relative }
    }

    /// Only bit-identical distances tie.
    pub const fn exact() -> Self {
        Self::new(0.0, 0.0)
    }

    /// Width of the tie band above `minimum`.
    pub fn band(&self, minimum: f64) -> f64 {
        self.absolute + self.relative * minimum.abs()
    }

    /// Whether `distance` falls within the tie band of `minimum`.
    ///
    /// Equal values always tie, including two infinite distances from a query
    /// point far enough out to overflow.
    pub fn ties(&self, distance: f64, minimum: f64) -> bool {
        distance == minimum || distance - minimum <= self.band(minimum)
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::new(1e-9, 1e-9)
    }
}

/// Proximity engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProximityConfig {
    /// Tie detection for vertex and edge minimization
    pub tolerance: Tolerance,
    /// A face is degenerate when |cross| <= this * (longest edge)^2
    pub degenerate_tolerance: f64,
    /// Face count from which the adjacency index is built in parallel
    pub parallel_threshold: usize,
}

impl Default for ProximityConfig {
    fn default() -> Self {
        Self {
            tolerance: Tolerance::default(),
            degenerate_tolerance: 1e-12,
            parallel_threshold: 50_000,
        }
    }
}

impl ProximityConfig {
    /// Load configuration from file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;
        let config: ProximityConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path.as_ref()))?;
        Ok(config)
    }

    /// Load `polyprox.toml` from the working directory if present, then apply
    /// environment variable overrides
    pub fn load() -> Result<Self> {
        let mut config = if PathBuf::from(CONFIG_FILE).exists() {
            Self::from_file(CONFIG_FILE)?
        } else {
            Self::default()
        };
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Apply `POLYPROX_*` environment overrides
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        if let Some(value) = env_override("POLYPROX_ABS_TOLERANCE")? {
            self.tolerance.absolute = value;
        }
        if let Some(value) = env_override("POLYPROX_REL_TOLERANCE")? {
            self.tolerance.relative = value;
        }
        if let Some(value) = env_override("POLYPROX_DEGENERATE_TOLERANCE")? {
            self.degenerate_tolerance = value;
        }
        if let Some(value) = env_override("POLYPROX_PARALLEL_THRESHOLD")? {
            self.parallel_threshold = value;
        }
        Ok(())
    }

    /// Save configuration to file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path.as_ref(), content)
            .with_context(|| format!("Failed to write config file: {:?}", path.as_ref()))?;
        Ok(())
    }
}

fn env_override<T>(name: &str) -> Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .with_context(|| format!("Invalid value for {}: {:?}", name, raw)),
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_tolerance_band() {
        let tol = Tolerance::new(1e-6, 1e-3);
        assert!(tol.ties(10.0 + 5e-3, 10.0));
        assert!(!tol.ties(10.0 + 2e-2, 10.0));
        assert!(Tolerance::exact().ties(1.0, 1.0));
        assert!(!Tolerance::exact().ties(1.0 + f64::EPSILON, 1.0));
    }

    #[test]
    fn test_overflowed_distances_tie() {
        let tol = Tolerance::default();
        assert!(tol.ties(f64::INFINITY, f64::INFINITY));
        assert!(Tolerance::exact().ties(f64::INFINITY, f64::INFINITY));
        assert!(!tol.ties(f64::INFINITY, 1e300));
    }

    #[test]
    fn test_config_roundtrip() -> Result<()> {
        let file = NamedTempFile::new()?;
        let mut config = ProximityConfig::default();
        config.tolerance.absolute = 1e-6;
        config.parallel_threshold = 10;
        config.save(file.path())?;

        let loaded = ProximityConfig::from_file(file.path())?;
        assert_eq!(loaded.tolerance, config.tolerance);
        assert_eq!(loaded.parallel_threshold, 10);
        Ok(())
    }

    #[test]
    fn test_partial_config_uses_defaults() -> Result<()> {
        let config: ProximityConfig = toml::from_str("parallel_threshold = 7\n")?;
        assert_eq!(config.parallel_threshold, 7);
        assert_eq!(config.tolerance, Tolerance::default());
        Ok(())
    }
}
