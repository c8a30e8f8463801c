//! Emotion categories and intensity records.
//!
//! The sixteen categories are the goal-based and social emotions of the
//! OCC model (Ortony, Clore & Collins, 1988). Each maps to a fixed PAD
//! coordinate used when an agent's mood is aggregated.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::types::PadState;

/// An OCC emotion category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EmotionKind {
    /// Prospect of a desirable outcome.
    Hope,
    /// Prospect of an undesirable outcome.
    Fear,
    /// A desirable outcome happened.
    Joy,
    /// An undesirable outcome happened.
    Distress,
    /// A hoped-for outcome was confirmed.
    Satisfaction,
    /// A feared outcome was confirmed.
    FearConfirmed,
    /// A hoped-for outcome was disconfirmed.
    Disappointment,
    /// A feared outcome was disconfirmed.
    Relief,
    /// Something good happened to someone liked.
    HappyFor,
    /// Something good happened to someone disliked.
    Resentment,
    /// Something bad happened to someone liked.
    Pity,
    /// Something bad happened to someone disliked.
    Gloating,
    /// Another agent caused something good for me.
    Gratitude,
    /// Another agent caused something bad for me.
    Anger,
    /// I caused something good for someone I like.
    Gratification,
    /// I caused something bad for someone I like.
    Remorse,
}

impl EmotionKind {
    /// Every category, in table order.
    pub const ALL: [Self; 16] = [
        Self::Hope,
        Self::Fear,
        Self::Joy,
        Self::Distress,
        Self::Satisfaction,
        Self::FearConfirmed,
        Self::Disappointment,
        Self::Relief,
        Self::HappyFor,
        Self::Resentment,
        Self::Pity,
        Self::Gloating,
        Self::Gratitude,
        Self::Anger,
        Self::Gratification,
        Self::Remorse,
    ];

    /// Canonical kebab-case name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Hope => "hope",
            Self::Fear => "fear",
            Self::Joy => "joy",
            Self::Distress => "distress",
            Self::Satisfaction => "satisfaction",
            Self::FearConfirmed => "fear-confirmed",
            Self::Disappointment => "disappointment",
            Self::Relief => "relief",
            Self::HappyFor => "happy-for",
            Self::Resentment => "resentment",
            Self::Pity => "pity",
            Self::Gloating => "gloating",
            Self::Gratitude => "gratitude",
            Self::Anger => "anger",
            Self::Gratification => "gratification",
            Self::Remorse => "remorse",
        }
    }

    /// Fixed PAD coordinate of this category.
    #[must_use]
    pub const fn pad(self) -> PadState {
        match self {
            Self::Distress => PadState::new(-0.61, 0.28, -0.36),
            Self::Fear => PadState::new(-0.64, 0.60, -0.43),
            Self::Hope => PadState::new(0.51, 0.23, 0.14),
            Self::Joy => PadState::new(0.76, 0.48, 0.35),
            Self::Satisfaction => PadState::new(0.87, 0.20, 0.62),
            Self::FearConfirmed => PadState::new(-0.61, 0.06, -0.32),
            Self::Disappointment => PadState::new(-0.61, -0.15, -0.29),
            Self::Relief => PadState::new(0.29, -0.19, -0.28),
            Self::HappyFor => PadState::new(0.64, 0.35, 0.25),
            Self::Resentment => PadState::new(-0.35, 0.35, 0.29),
            Self::Pity => PadState::new(-0.52, 0.02, -0.21),
            Self::Gloating => PadState::new(-0.45, 0.48, 0.42),
            Self::Gratitude => PadState::new(0.64, 0.16, -0.21),
            Self::Anger => PadState::new(-0.51, 0.59, 0.25),
            Self::Gratification => PadState::new(0.69, 0.57, 0.63),
            Self::Remorse => PadState::new(-0.57, 0.28, -0.34),
        }
    }
}

impl fmt::Display for EmotionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EmotionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown emotion: {s}"))
    }
}

/// A named scalar intensity.
///
/// Agents and relations own their own copies; an emotion is never shared
/// between two holders.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Emotion {
    /// Category.
    pub kind: EmotionKind,
    /// Intensity. Non-negative in steady state.
    pub intensity: f64,
}

impl Emotion {
    /// Create an emotion record.
    #[must_use]
    pub const fn new(kind: EmotionKind, intensity: f64) -> Self {
        Self { kind, intensity }
    }
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({:.2})", self.kind, self.intensity)
    }
}

/// Merge `emotion` into `list`: an existing entry of the same kind has its
/// intensity incremented, otherwise a copy is appended.
pub fn accumulate(list: &mut Vec<Emotion>, emotion: Emotion) {
    match list.iter_mut().find(|e| e.kind == emotion.kind) {
        Some(existing) => existing.intensity += emotion.intensity,
        None => list.push(emotion),
    }
}
