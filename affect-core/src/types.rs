//! Core type definitions shared across the engine.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul};

// ---------------------------------------------------------------------------
// Identity Types
// ---------------------------------------------------------------------------

/// Arena index of an agent registered with an [`AppraisalEngine`](crate::AppraisalEngine).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AgentId(pub usize);

/// Arena index of a goal registered with an [`AppraisalEngine`](crate::AppraisalEngine).
///
/// Agents hold goal ids rather than goal values, so every agent holding the
/// same id sees the same likelihood.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GoalId(pub usize);

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "agent#{}", self.0)
    }
}

impl fmt::Display for GoalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "goal#{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Emotional Model — PAD (Pleasure-Arousal-Dominance)
// ---------------------------------------------------------------------------

/// PAD mood vector (Mehrabian & Russell, 1974).
///
/// Unlike a single emotion's coordinates, an aggregate is not clamped: it is
/// the intensity-weighted sum over every active emotion and can leave
/// `[-1, 1]` until it goes through the gain transform.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PadState {
    /// Unhappy (negative) to happy (positive).
    pub pleasure: f64,
    /// Calm (negative) to excited (positive).
    pub arousal: f64,
    /// Submissive (negative) to dominant (positive).
    pub dominance: f64,
}

impl PadState {
    /// Neutral mood.
    pub const NEUTRAL: Self = Self {
        pleasure: 0.0,
        arousal: 0.0,
        dominance: 0.0,
    };

    /// Create a PAD vector.
    #[must_use]
    pub const fn new(pleasure: f64, arousal: f64, dominance: f64) -> Self {
        Self {
            pleasure,
            arousal,
            dominance,
        }
    }

    /// Apply `f` to each dimension.
    #[must_use]
    pub fn map(self, f: impl Fn(f64) -> f64) -> Self {
        Self::new(f(self.pleasure), f(self.arousal), f(self.dominance))
    }

    /// Magnitude of the PAD vector.
    #[must_use]
    pub fn intensity(&self) -> f64 {
        (self.pleasure * self.pleasure
            + self.arousal * self.arousal
            + self.dominance * self.dominance)
            .sqrt()
    }
}

impl Add for PadState {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(
            self.pleasure + rhs.pleasure,
            self.arousal + rhs.arousal,
            self.dominance + rhs.dominance,
        )
    }
}

impl AddAssign for PadState {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Mul<f64> for PadState {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        self.map(|v| v * rhs)
    }
}

impl fmt::Display for PadState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "P {:.2} A {:.2} D {:.2}",
            self.pleasure, self.arousal, self.dominance
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pad_add_and_scale() {
        let a = PadState::new(0.5, -0.25, 0.1);
        let b = PadState::new(0.25, 0.25, 0.1);
        let sum = (a + b) * 2.0;
        assert!((sum.pleasure - 1.5).abs() < 1e-12);
        assert!(sum.arousal.abs() < 1e-12);
        assert!((sum.dominance - 0.4).abs() < 1e-12);
    }

    #[test]
    fn neutral_has_zero_intensity() {
        assert!(PadState::NEUTRAL.intensity().abs() < f64::EPSILON);
        assert!((PadState::new(0.0, 3.0, 4.0).intensity() - 5.0).abs() < 1e-12);
    }
}
