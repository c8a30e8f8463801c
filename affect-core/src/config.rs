//! Configuration for the appraisal engine.
//!
//! Maps directly to `affect.toml`:
//!
//! ```toml
//! [general]
//! log_level = "info"
//! debug = false
//!
//! [decay]
//! function = "exponential"
//! factor = 0.8
//! removal_threshold = 0.001
//!
//! [appraisal]
//! default_gain = 1.0
//! initial_goal_likelihood = 0.5
//! validate_targeted = true
//! ```

use serde::{Deserialize, Serialize};

use crate::decay::{DEFAULT_DECAY_FACTOR, DEFAULT_REMOVAL_THRESHOLD, DecayFunction, DecaySettings};
use crate::error::{AffectError, Result};
use crate::gain;
use crate::goal::NEUTRAL_LIKELIHOOD;

/// Top-level configuration, loadable from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AffectConfig {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,
    /// Emotional decay.
    #[serde(default)]
    pub decay: DecayConfig,
    /// Appraisal behaviour.
    #[serde(default)]
    pub appraisal: AppraisalConfig,
}

impl AffectConfig {
    /// Load configuration from a TOML string.
    ///
    /// # Errors
    /// Returns `AffectError::Config` if the TOML is invalid or a value is out
    /// of range.
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        let config: Self = toml::from_str(toml_str).map_err(|e| AffectError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Check every value against its accepted range.
    ///
    /// # Errors
    /// Returns `AffectError::Config` naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        self.decay
            .function
            .validate_factor(self.decay.factor)
            .map_err(|e| AffectError::Config(format!("decay.factor: {e}")))?;
        if !(self.decay.removal_threshold.is_finite() && self.decay.removal_threshold >= 0.0) {
            return Err(AffectError::Config(format!(
                "decay.removal_threshold must be >= 0, got {}",
                self.decay.removal_threshold
            )));
        }
        gain::validate(self.appraisal.default_gain)
            .map_err(|e| AffectError::Config(format!("appraisal.default_gain: {e}")))?;
        if !(0.0..=1.0).contains(&self.appraisal.initial_goal_likelihood) {
            return Err(AffectError::Config(format!(
                "appraisal.initial_goal_likelihood must be in [0, 1], got {}",
                self.appraisal.initial_goal_likelihood
            )));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Sub-configs
// ---------------------------------------------------------------------------

/// General settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Log level used by hosts that install a subscriber: trace, debug, info, warn, error.
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Emit a full emotional snapshot after every appraisal.
    #[serde(default)]
    pub debug: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            debug: false,
        }
    }
}

/// Emotional decay settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecayConfig {
    /// Decay curve: "linear" or "exponential".
    #[serde(default)]
    pub function: DecayFunction,
    /// Curve factor (per second).
    #[serde(default = "default_decay_factor")]
    pub factor: f64,
    /// Intensities at or below this are pruned.
    #[serde(default = "default_removal_threshold")]
    pub removal_threshold: f64,
}

impl Default for DecayConfig {
    fn default() -> Self {
        Self {
            function: DecayFunction::Exponential,
            factor: DEFAULT_DECAY_FACTOR,
            removal_threshold: DEFAULT_REMOVAL_THRESHOLD,
        }
    }
}

impl From<&DecayConfig> for DecaySettings {
    fn from(config: &DecayConfig) -> Self {
        Self {
            function: config.function,
            factor: config.factor,
            removal_threshold: config.removal_threshold,
        }
    }
}

/// Appraisal settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppraisalConfig {
    /// Gain given to agents created through the engine.
    #[serde(default = "default_gain")]
    pub default_gain: f64,
    /// Likelihood of goals created through the engine.
    #[serde(default = "default_initial_likelihood")]
    pub initial_goal_likelihood: f64,
    /// Reject malformed beliefs in targeted appraisal too.
    #[serde(default = "default_true")]
    pub validate_targeted: bool,
}

impl Default for AppraisalConfig {
    fn default() -> Self {
        Self {
            default_gain: gain::DEFAULT_GAIN,
            initial_goal_likelihood: NEUTRAL_LIKELIHOOD,
            validate_targeted: true,
        }
    }
}

// ---------------------------------------------------------------------------
// Serde default helpers
// ---------------------------------------------------------------------------

fn default_true() -> bool { true }
fn default_log_level() -> String { "info".to_string() }
fn default_decay_factor() -> f64 { DEFAULT_DECAY_FACTOR }
fn default_removal_threshold() -> f64 { DEFAULT_REMOVAL_THRESHOLD }
fn default_gain() -> f64 { gain::DEFAULT_GAIN }
fn default_initial_likelihood() -> f64 { NEUTRAL_LIKELIHOOD }

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_gives_defaults() {
        let config = AffectConfig::from_toml("").expect("parse");
        assert_eq!(config.decay.function, DecayFunction::Exponential);
        assert!((config.decay.factor - 0.8).abs() < f64::EPSILON);
        assert!((config.appraisal.default_gain - 1.0).abs() < f64::EPSILON);
        assert!(config.appraisal.validate_targeted);
        assert!(!config.general.debug);
    }

    #[test]
    fn partial_toml_overrides() {
        let config = AffectConfig::from_toml(
            r#"
            [decay]
            function = "linear"
            factor = 0.05

            [general]
            debug = true
            "#,
        )
        .expect("parse");
        assert_eq!(config.decay.function, DecayFunction::Linear);
        assert!((config.decay.factor - 0.05).abs() < f64::EPSILON);
        assert!((config.decay.removal_threshold - 0.001).abs() < f64::EPSILON);
        assert!(config.general.debug);
    }

    #[test]
    fn out_of_range_values_are_rejected() {
        assert!(AffectConfig::from_toml("[decay]\nfactor = 1.5").is_err());
        assert!(AffectConfig::from_toml("[appraisal]\ndefault_gain = 0.0").is_err());
        assert!(AffectConfig::from_toml("[appraisal]\ninitial_goal_likelihood = 2.0").is_err());
        assert!(AffectConfig::from_toml("[decay]\nremoval_threshold = -1.0").is_err());
    }

    #[test]
    fn unknown_decay_function_is_a_parse_error() {
        let err = AffectConfig::from_toml("[decay]\nfunction = \"cubic\"").expect_err("cubic is not a decay function");
        assert!(matches!(err, AffectError::Config(_)));
    }

    #[test]
    fn loads_from_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("affect.toml");
        std::fs::write(&path, "[appraisal]\ndefault_gain = 4.0\n").expect("write");

        let config = AffectConfig::from_file(&path).expect("load");
        assert!((config.appraisal.default_gain - 4.0).abs() < f64::EPSILON);

        let missing = AffectConfig::from_file(&dir.path().join("missing.toml"));
        assert!(matches!(missing, Err(AffectError::Io(_))));
    }
}
