//! Gain transform — squashes raw intensities into a bounded range.
//!
//!   x >= 0:  g·x / (g·x + 1)      ∈ [0, 1)
//!   x <  0: -g·x / (g·x - 1)      ∈ (-1, 0)
//!
//! Monotonic, sign-preserving, and 0 at 0. Higher gain saturates sooner.

use crate::error::{AffectError, Result};

/// Default gain for new agents.
pub const DEFAULT_GAIN: f64 = 1.0;

/// Largest accepted gain.
pub const MAX_GAIN: f64 = 20.0;

/// Check that `gain` is in `(0, 20]`.
///
/// # Errors
/// Returns [`AffectError::InvalidGain`] otherwise.
pub fn validate(gain: f64) -> Result<()> {
    if gain > 0.0 && gain <= MAX_GAIN {
        Ok(())
    } else {
        Err(AffectError::InvalidGain(gain))
    }
}

/// Apply the gain transform to `x`.
#[must_use]
pub fn apply(gain: f64, x: f64) -> f64 {
    if x >= 0.0 {
        gain * x / (gain * x + 1.0)
    } else {
        -gain * x / (gain * x - 1.0)
    }
}
