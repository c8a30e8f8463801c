//! Appraisal rules — which emotions an evaluated goal change produces.
//!
//! These are pure functions of the numbers the engine computes per goal;
//! the engine decides who receives the result. Every rule returns nothing
//! for a zero-intensity outcome.
//!
//! Reference: Popescu, Broekens & van Someren (2014). "GAMYGDALA: An
//! Emotion Engine for Games." IEEE Trans. Affective Computing 5(1).

use serde::Serialize;

use crate::emotion::{Emotion, EmotionKind};

/// Numbers derived from one goal for one belief.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GoalOutcome {
    /// Goal utility, in `[-1, 1]`.
    pub utility: f64,
    /// Change in the goal's likelihood caused by the belief.
    pub delta_likelihood: f64,
    /// The goal's likelihood after the update.
    pub likelihood: f64,
}

impl GoalOutcome {
    /// `delta_likelihood * utility`: positive when the event was good for
    /// the goal owner.
    #[must_use]
    pub fn desirability(&self) -> f64 {
        self.delta_likelihood * self.utility
    }

    /// `|utility * delta_likelihood|`.
    #[must_use]
    pub fn magnitude(&self) -> f64 {
        (self.utility * self.delta_likelihood).abs()
    }

    /// Whether the owner sees the change as good news: a wanted goal got
    /// more likely, or an unwanted one got less likely.
    #[must_use]
    pub fn is_positive(&self) -> bool {
        if self.utility >= 0.0 {
            self.delta_likelihood >= 0.0
        } else {
            self.delta_likelihood < 0.0
        }
    }
}

/// Goal-owner emotions that need no relation: prospect-based (hope, fear)
/// while the outcome is uncertain, confirmation-based once it is settled.
/// A confirmation companion (satisfaction, relief, ...) precedes joy or
/// distress in the result.
#[allow(clippy::float_cmp)]
#[must_use]
pub fn internal_emotions(outcome: &GoalOutcome) -> Vec<Emotion> {
    let intensity = outcome.magnitude();
    if intensity == 0.0 {
        return Vec::new();
    }

    let wanted = outcome.utility >= 0.0;
    let delta = outcome.delta_likelihood;
    let mut kinds = Vec::with_capacity(2);

    if outcome.likelihood > 0.0 && outcome.likelihood < 1.0 {
        kinds.push(if outcome.is_positive() {
            EmotionKind::Hope
        } else {
            EmotionKind::Fear
        });
    } else if outcome.likelihood == 1.0 {
        if wanted {
            if delta < 0.5 {
                kinds.push(EmotionKind::Satisfaction);
            }
            kinds.push(EmotionKind::Joy);
        } else {
            if delta < 0.5 {
                kinds.push(EmotionKind::FearConfirmed);
            }
            kinds.push(EmotionKind::Distress);
        }
    } else if outcome.likelihood == 0.0 {
        if wanted {
            if delta > 0.5 {
                kinds.push(EmotionKind::Disappointment);
            }
            kinds.push(EmotionKind::Distress);
        } else {
            if delta > 0.5 {
                kinds.push(EmotionKind::Relief);
            }
            kinds.push(EmotionKind::Joy);
        }
    }

    kinds.into_iter().map(|kind| Emotion::new(kind, intensity)).collect()
}

/// Fortune-of-others emotion felt by an observer whose attitude toward the
/// goal owner is `like`.
#[must_use]
pub fn social_emotion(outcome: &GoalOutcome, like: f64) -> Option<Emotion> {
    let kind = match (outcome.desirability() >= 0.0, like >= 0.0) {
        (true, true) => EmotionKind::HappyFor,
        (true, false) => EmotionKind::Resentment,
        (false, true) => EmotionKind::Pity,
        (false, false) => EmotionKind::Gloating,
    };
    let intensity = (outcome.utility * outcome.delta_likelihood * like).abs();
    (intensity > 0.0).then(|| Emotion::new(kind, intensity))
}

/// Emotion felt by the affected agent toward another agent who caused the
/// event.
#[must_use]
pub fn toward_causal_agent(outcome: &GoalOutcome) -> Option<Emotion> {
    let kind = if outcome.desirability() >= 0.0 {
        EmotionKind::Gratitude
    } else {
        EmotionKind::Anger
    };
    let intensity = outcome.magnitude();
    (intensity > 0.0).then(|| Emotion::new(kind, intensity))
}

/// Emotion felt by the causal agent about what it did to an affected agent
/// it has attitude `like` toward. Nothing is felt toward disliked agents.
#[must_use]
pub fn toward_affected_agent(outcome: &GoalOutcome, like: f64) -> Option<Emotion> {
    if like < 0.0 {
        return None;
    }
    let kind = if outcome.desirability() >= 0.0 {
        EmotionKind::Gratification
    } else {
        EmotionKind::Remorse
    };
    let intensity = (outcome.utility * outcome.delta_likelihood * like).abs();
    (intensity > 0.0).then(|| Emotion::new(kind, intensity))
}
