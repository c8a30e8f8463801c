//! Emotional decay — intensities drift back toward neutral over time.
//!
//! Two decay curves are available:
//!
//!   linear:      I' = I - f * t
//!   exponential: I' = I * f^t
//!
//! Where:
//!   I = current intensity
//!   f = decay factor (per second)
//!   t = elapsed wall-clock seconds since the previous decay tick
//!
//! Anything that lands at or below the removal threshold is pruned. Both
//! curves leave intensities untouched when no time has passed.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

use crate::emotion::Emotion;
use crate::error::{AffectError, Result};

/// Default exponential decay factor: 20% of an emotion fades per second.
pub const DEFAULT_DECAY_FACTOR: f64 = 0.8;

/// Default threshold below which a decayed emotion is dropped.
pub const DEFAULT_REMOVAL_THRESHOLD: f64 = 0.001;

/// Shape of the decay curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DecayFunction {
    /// Subtract `factor` per second.
    Linear,
    /// Multiply by `factor` per second.
    #[default]
    Exponential,
}

impl DecayFunction {
    /// Decay `value` over `elapsed_secs` with the given factor.
    #[must_use]
    pub fn apply(self, value: f64, factor: f64, elapsed_secs: f64) -> f64 {
        match self {
            Self::Linear => value - factor * elapsed_secs,
            Self::Exponential => value * factor.powf(elapsed_secs),
        }
    }

    /// Check that `factor` makes sense for this curve.
    ///
    /// Linear decay needs a non-negative rate; exponential decay needs a
    /// retention ratio in `[0, 1]` (1 disables decay).
    ///
    /// # Errors
    /// Returns [`AffectError::InvalidDecayFactor`] otherwise.
    pub fn validate_factor(self, factor: f64) -> Result<()> {
        let ok = factor.is_finite()
            && match self {
                Self::Linear => factor >= 0.0,
                Self::Exponential => (0.0..=1.0).contains(&factor),
            };
        if ok {
            Ok(())
        } else {
            Err(AffectError::InvalidDecayFactor {
                factor,
                function: self.name(),
            })
        }
    }

    /// Lowercase name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::Exponential => "exponential",
        }
    }
}

impl fmt::Display for DecayFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Active decay configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DecaySettings {
    /// Curve shape.
    pub function: DecayFunction,
    /// Curve factor, see [`DecayFunction`].
    pub factor: f64,
    /// Intensities at or below this are removed.
    pub removal_threshold: f64,
}

impl Default for DecaySettings {
    fn default() -> Self {
        Self {
            function: DecayFunction::Exponential,
            factor: DEFAULT_DECAY_FACTOR,
            removal_threshold: DEFAULT_REMOVAL_THRESHOLD,
        }
    }
}

impl DecaySettings {
    /// Decay a single intensity. Returns `None` when it should be removed.
    #[must_use]
    pub fn decay_value(&self, value: f64, elapsed_ms: u64) -> Option<f64> {
        #[allow(clippy::cast_precision_loss)]
        let elapsed_secs = elapsed_ms as f64 / 1000.0;
        let decayed = self.function.apply(value, self.factor, elapsed_secs);
        (decayed > self.removal_threshold).then_some(decayed)
    }
}

/// Decay every emotion in `emotions`, dropping those that fade out.
///
/// Returns the number of emotions removed.
pub fn decay_emotions(emotions: &mut Vec<Emotion>, settings: &DecaySettings, elapsed_ms: u64) -> usize {
    let before = emotions.len();
    emotions.retain_mut(|emotion| match settings.decay_value(emotion.intensity, elapsed_ms) {
        Some(intensity) => {
            emotion.intensity = intensity;
            true
        }
        None => false,
    });
    before - emotions.len()
}

// ---------------------------------------------------------------------------
// Clocks
// ---------------------------------------------------------------------------

/// Millisecond wall-clock source for [`AppraisalEngine::decay_all`](crate::AppraisalEngine::decay_all).
pub trait Clock: fmt::Debug + Send + Sync {
    /// Current time in milliseconds. Must not go backwards between calls;
    /// if it does, the engine treats the interval as zero.
    fn now_millis(&self) -> i64;
}

/// Real wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }
}

/// A clock advanced by hand, such as a game clock or a test clock.
///
/// Clones share the same underlying time.
#[derive(Debug, Clone, Default)]
pub struct ManualClock(Arc<AtomicI64>);

impl ManualClock {
    /// Create a clock reading `start_ms`.
    #[must_use]
    pub fn new(start_ms: i64) -> Self {
        Self(Arc::new(AtomicI64::new(start_ms)))
    }

    /// Move the clock forward by `ms`.
    pub fn advance(&self, ms: i64) {
        self.0.fetch_add(ms, Ordering::Relaxed);
    }

    /// Jump the clock to `ms`.
    pub fn set(&self, ms: i64) {
        self.0.store(ms, Ordering::Relaxed);
    }
}

impl Clock for ManualClock {
    fn now_millis(&self) -> i64 {
        self.0.load(Ordering::Relaxed)
    }
}
