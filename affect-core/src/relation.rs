//! Relations — one agent's attitude toward another, plus the emotions felt
//! through that attitude (pity for, angry at, ...).

use serde::Serialize;

use crate::decay::{self, DecaySettings};
use crate::emotion::{self, Emotion};

/// An agent's relation to a target agent.
///
/// Relations are never removed once created: the `like` value can drop to
/// zero and the emotion list can decay to empty, but the record stays.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Relation {
    /// Name of the target agent.
    pub target: String,
    /// Attitude toward the target, in `[-1, 1]`.
    pub like: f64,
    emotions: Vec<Emotion>,
}

impl Relation {
    /// Create a relation with no emotion history.
    #[must_use]
    pub fn new(target: impl Into<String>, like: f64) -> Self {
        Self {
            target: target.into(),
            like,
            emotions: Vec::new(),
        }
    }

    /// Emotions currently felt through this relation.
    #[must_use]
    pub fn emotions(&self) -> &[Emotion] {
        &self.emotions
    }

    /// Fold an emotion into this relation (same-kind intensities add up).
    pub fn add_emotion(&mut self, emotion: Emotion) {
        emotion::accumulate(&mut self.emotions, emotion);
    }

    /// Decay the emotion list. Returns how many emotions faded out.
    pub fn decay(&mut self, settings: &DecaySettings, elapsed_ms: u64) -> usize {
        decay::decay_emotions(&mut self.emotions, settings, elapsed_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decay::DecayFunction;
    use crate::emotion::EmotionKind;

    #[test]
    fn add_emotion_accumulates() {
        let mut rel = Relation::new("blacksmith", 0.7);
        rel.add_emotion(Emotion::new(EmotionKind::Pity, 0.2));
        rel.add_emotion(Emotion::new(EmotionKind::Pity, 0.3));
        assert_eq!(rel.emotions().len(), 1);
        assert!((rel.emotions()[0].intensity - 0.5).abs() < 1e-12);
    }

    #[test]
    fn decay_keeps_relation_but_drops_emotions() {
        let mut rel = Relation::new("blacksmith", -0.4);
        rel.add_emotion(Emotion::new(EmotionKind::Gloating, 0.2));
        let settings = DecaySettings {
            function: DecayFunction::Linear,
            factor: 1.0,
            ..DecaySettings::default()
        };

        assert_eq!(rel.decay(&settings, 1_000), 1);
        assert!(rel.emotions().is_empty());
        assert!((rel.like + 0.4).abs() < f64::EPSILON);
    }
}
