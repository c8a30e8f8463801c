//! Agents — entities with goals, relations, and an internal emotional state.

use serde::Serialize;
use tracing::warn;

use crate::decay::DecaySettings;
use crate::emotion::{self, Emotion, EmotionKind};
use crate::error::Result;
use crate::gain;
use crate::relation::Relation;
use crate::types::{GoalId, PadState};

/// An agent taking part in appraisal.
///
/// Goals are held by id so that the same goal can be shared between agents.
/// Emotions, both internal and relational, are owned copies.
#[derive(Debug, Clone, Serialize)]
pub struct Agent {
    name: String,
    goals: Vec<GoalId>,
    relations: Vec<Relation>,
    internal_state: Vec<Emotion>,
    gain: f64,
}

impl Agent {
    /// Create an agent with no goals, relations, or emotions.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            goals: Vec::new(),
            relations: Vec::new(),
            internal_state: Vec::new(),
            gain: gain::DEFAULT_GAIN,
        }
    }

    /// Unique name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    // -- goals --------------------------------------------------------------

    /// Goals held by this agent, in insertion order.
    #[must_use]
    pub fn goals(&self) -> &[GoalId] {
        &self.goals
    }

    /// Attach a goal. Returns `false` if the agent already holds it.
    pub fn add_goal(&mut self, goal: GoalId) -> bool {
        if self.goals.contains(&goal) {
            return false;
        }
        self.goals.push(goal);
        true
    }

    /// Detach a goal. Returns `false` if the agent did not hold it.
    pub fn remove_goal(&mut self, goal: GoalId) -> bool {
        let before = self.goals.len();
        self.goals.retain(|g| *g != goal);
        self.goals.len() != before
    }

    /// Whether this agent holds `goal`.
    #[must_use]
    pub fn has_goal(&self, goal: GoalId) -> bool {
        self.goals.contains(&goal)
    }

    // -- relations ----------------------------------------------------------

    /// All relations, in creation order.
    #[must_use]
    pub fn relations(&self) -> &[Relation] {
        &self.relations
    }

    /// Relation toward `target`, if one exists.
    #[must_use]
    pub fn relation(&self, target: &str) -> Option<&Relation> {
        self.relations.iter().find(|r| r.target == target)
    }

    /// Mutable relation toward `target`, if one exists.
    pub fn relation_mut(&mut self, target: &str) -> Option<&mut Relation> {
        self.relations.iter_mut().find(|r| r.target == target)
    }

    /// Whether a relation toward `target` exists.
    #[must_use]
    pub fn has_relation_with(&self, target: &str) -> bool {
        self.relation(target).is_some()
    }

    /// Set the `like` value toward `target`, creating the relation on first
    /// use. `like` is clamped to `[-1, 1]`.
    pub fn update_relation(&mut self, target: &str, like: f64) {
        let like = like.clamp(-1.0, 1.0);
        match self.relation_mut(target) {
            Some(relation) => relation.like = like,
            None => self.relations.push(Relation::new(target, like)),
        }
    }

    /// Relation toward `target`, created with a neutral attitude if absent.
    pub fn relation_or_insert(&mut self, target: &str) -> &mut Relation {
        let idx = match self.relations.iter().position(|r| r.target == target) {
            Some(idx) => idx,
            None => {
                self.relations.push(Relation::new(target, 0.0));
                self.relations.len() - 1
            }
        };
        &mut self.relations[idx]
    }

    // -- emotional state ----------------------------------------------------

    /// Fold an emotion into the internal state. Repeated appraisals add up
    /// until decay brings them down.
    pub fn update_emotional_state(&mut self, emotion: Emotion) {
        emotion::accumulate(&mut self.internal_state, emotion);
    }

    /// Raw internal emotions.
    #[must_use]
    pub fn emotions(&self) -> &[Emotion] {
        &self.internal_state
    }

    /// Raw intensity of `kind`, or 0 if not currently felt.
    #[must_use]
    pub fn intensity_of(&self, kind: EmotionKind) -> f64 {
        self.internal_state
            .iter()
            .find(|e| e.kind == kind)
            .map_or(0.0, |e| e.intensity)
    }

    /// Internal emotions, either raw or passed through this agent's gain.
    #[must_use]
    pub fn emotional_state(&self, use_gain: bool) -> Vec<Emotion> {
        if !use_gain {
            return self.internal_state.clone();
        }
        self.internal_state
            .iter()
            .map(|e| Emotion::new(e.kind, gain::apply(self.gain, e.intensity)))
            .collect()
    }

    /// Intensity-weighted PAD aggregate of the internal state, optionally
    /// gain-compressed per dimension.
    #[must_use]
    pub fn pad_state(&self, use_gain: bool) -> PadState {
        let pad = self
            .internal_state
            .iter()
            .fold(PadState::NEUTRAL, |acc, e| acc + e.kind.pad() * e.intensity);
        if use_gain {
            pad.map(|v| gain::apply(self.gain, v))
        } else {
            pad
        }
    }

    /// Strongest internal emotion, if any.
    #[must_use]
    pub fn dominant_emotion(&self) -> Option<Emotion> {
        self.internal_state
            .iter()
            .copied()
            .max_by(|a, b| a.intensity.total_cmp(&b.intensity))
    }

    /// Current gain.
    #[must_use]
    pub fn gain(&self) -> f64 {
        self.gain
    }

    /// Set the gain used by the `use_gain` views.
    ///
    /// # Errors
    /// Returns [`AffectError::InvalidGain`](crate::AffectError::InvalidGain)
    /// outside `(0, 20]`; the previous gain is kept.
    pub fn set_gain(&mut self, gain: f64) -> Result<()> {
        if let Err(e) = gain::validate(gain) {
            warn!(agent = %self.name, gain, "Rejected gain factor");
            return Err(e);
        }
        self.gain = gain;
        Ok(())
    }

    /// Decay internal emotions and every relation's emotions by `elapsed_ms`.
    ///
    /// Returns the total number of emotions that faded out.
    pub fn decay(&mut self, settings: &DecaySettings, elapsed_ms: u64) -> usize {
        let mut removed = crate::decay::decay_emotions(&mut self.internal_state, settings, elapsed_ms);
        for relation in &mut self.relations {
            removed += relation.decay(settings, elapsed_ms);
        }
        removed
    }
}
