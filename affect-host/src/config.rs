//! Host configuration for the emotion engine.
//!
//! One `affect.toml` carries both the engine settings and the host tuning:
//!
//! ```toml
//! [decay]
//! function = "exponential"
//! factor = 0.8
//!
//! [host]
//! decay_interval_ms = 1000
//! scheduler_period_ms = 1000
//! use_gain_in_reports = false
//! ```

use affect_core::{AffectConfig, AffectError, AppraisalEngine, Result};
use serde::{Deserialize, Serialize};

/// Engine configuration plus host-side tuning.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HostConfig {
    /// Engine settings (`[general]`, `[decay]`, `[appraisal]`).
    #[serde(flatten)]
    pub affect: AffectConfig,
    /// Host settings (`[host]`).
    #[serde(default)]
    pub host: HostSettings,
}

/// How the host drives the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HostSettings {
    /// Game time between frame-driven decay passes.
    #[serde(default = "default_interval_ms")]
    pub decay_interval_ms: u64,
    /// Period of the background decay scheduler.
    #[serde(default = "default_interval_ms")]
    pub scheduler_period_ms: u64,
    /// Report gain-compressed intensities instead of raw ones.
    #[serde(default)]
    pub use_gain_in_reports: bool,
}

impl Default for HostSettings {
    fn default() -> Self {
        Self {
            decay_interval_ms: default_interval_ms(),
            scheduler_period_ms: default_interval_ms(),
            use_gain_in_reports: false,
        }
    }
}

impl HostConfig {
    /// Parse and validate a TOML document.
    ///
    /// # Errors
    /// Returns `AffectError::Config` for malformed TOML or out-of-range values.
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        let config: Self = toml::from_str(toml_str).map_err(|e| AffectError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Check engine and host values.
    ///
    /// # Errors
    /// Returns `AffectError::Config` naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        self.affect.validate()?;
        if self.host.scheduler_period_ms == 0 {
            return Err(AffectError::Config("host.scheduler_period_ms must be > 0".to_string()));
        }
        Ok(())
    }

    /// Build an engine from the `affect` part.
    ///
    /// # Errors
    /// See [`AppraisalEngine::from_config`].
    pub fn build_engine(&self) -> Result<AppraisalEngine> {
        AppraisalEngine::from_config(&self.affect)
    }
}

fn default_interval_ms() -> u64 { 1_000 }
