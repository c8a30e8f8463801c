//! Goals — the objectives that give events their emotional meaning.

use serde::{Serialize, Serializer};
use std::fmt;
use std::sync::Arc;

/// Likelihood a goal has before any belief touched it: halfway between
/// disconfirmed (0) and confirmed (1).
pub const NEUTRAL_LIKELIHOOD: f64 = 0.5;

/// Where a goal's likelihood comes from during appraisal.
#[derive(Clone, Default)]
pub enum LikelihoodSource {
    /// Derived from each appraised belief's likelihood and congruence.
    #[default]
    FromBeliefs,
    /// Computed by a host-supplied function whenever the goal is appraised.
    /// The belief's own likelihood and congruence are ignored.
    Computed(Arc<dyn Fn() -> f64 + Send + Sync>),
}

impl LikelihoodSource {
    /// Wrap a likelihood function.
    pub fn computed(f: impl Fn() -> f64 + Send + Sync + 'static) -> Self {
        Self::Computed(Arc::new(f))
    }
}

impl fmt::Debug for LikelihoodSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FromBeliefs => f.write_str("FromBeliefs"),
            Self::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

impl Serialize for LikelihoodSource {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(match self {
            Self::FromBeliefs => "from-beliefs",
            Self::Computed(_) => "computed",
        })
    }
}

/// A named objective with a utility and a current likelihood of realisation.
///
/// Achievement goals (the default) freeze once they are fully confirmed or
/// disconfirmed. Maintenance goals (e.g. "stay well fed") can swing
/// indefinitely.
#[derive(Debug, Clone, Serialize)]
pub struct Goal {
    /// Unique name across the engine.
    pub name: String,
    /// Value the owner attributes to the goal becoming true, in `[-1, 1]`.
    /// Negative means the owner does not want it to happen.
    pub utility: f64,
    /// Current likelihood of the goal being realised.
    pub likelihood: f64,
    /// Maintenance goals never freeze.
    pub is_maintenance: bool,
    /// Likelihood update policy.
    pub source: LikelihoodSource,
}

impl Goal {
    /// Create an achievement goal with neutral likelihood. Utility is
    /// clamped to `[-1, 1]`.
    #[must_use]
    pub fn new(name: impl Into<String>, utility: f64) -> Self {
        Self {
            name: name.into(),
            utility: utility.clamp(-1.0, 1.0),
            likelihood: NEUTRAL_LIKELIHOOD,
            is_maintenance: false,
            source: LikelihoodSource::FromBeliefs,
        }
    }

    /// Builder: mark as a maintenance goal.
    #[must_use]
    pub fn maintenance(mut self, is_maintenance: bool) -> Self {
        self.is_maintenance = is_maintenance;
        self
    }

    /// Builder: set the starting likelihood.
    #[must_use]
    pub fn with_likelihood(mut self, likelihood: f64) -> Self {
        self.likelihood = likelihood.clamp(-1.0, 1.0);
        self
    }

    /// Builder: compute the likelihood with `f` instead of from beliefs.
    #[must_use]
    pub fn with_likelihood_fn(mut self, f: impl Fn() -> f64 + Send + Sync + 'static) -> Self {
        self.source = LikelihoodSource::computed(f);
        self
    }

    /// Whether belief-driven updates can no longer move this goal.
    ///
    /// An achievement goal is settled once its likelihood sits at an
    /// extreme of the scale (1 or -1) or exactly at 0. Incremental evidence
    /// anywhere in between keeps moving it.
    #[allow(clippy::float_cmp)]
    #[must_use]
    pub fn is_settled(&self) -> bool {
        !self.is_maintenance
            && (self.likelihood >= 1.0 || self.likelihood <= -1.0 || self.likelihood == 0.0)
    }

    /// Move the likelihood in response to one belief and return the change.
    ///
    /// - settled achievement goals return 0 and stay put
    /// - computed goals take their likelihood from the host function
    /// - incremental beliefs add `likelihood * congruence` to the current value
    /// - absolute beliefs replace the value with `(congruence * likelihood + 1) / 2`
    pub fn update_likelihood(&mut self, belief_likelihood: f64, congruence: f64, incremental: bool) -> f64 {
        if self.is_settled() {
            return 0.0;
        }

        let old = self.likelihood;
        let new = match &self.source {
            LikelihoodSource::Computed(f) => f().clamp(-1.0, 1.0),
            LikelihoodSource::FromBeliefs if incremental => {
                (old + belief_likelihood * congruence).clamp(-1.0, 1.0)
            }
            LikelihoodSource::FromBeliefs => (congruence * belief_likelihood + 1.0) / 2.0,
        };

        self.likelihood = new;
        new - old
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_goal_starts_neutral_and_clamps_utility() {
        let goal = Goal::new("village destroyed", -3.0);
        assert!((goal.likelihood - NEUTRAL_LIKELIHOOD).abs() < f64::EPSILON);
        assert!((goal.utility + 1.0).abs() < f64::EPSILON);
        assert!(!goal.is_maintenance);
    }

    #[test]
    fn absolute_belief_replaces_likelihood() {
        let mut goal = Goal::new("harvest", 0.8);
        let delta = goal.update_likelihood(0.6, 1.0, false);
        assert!((goal.likelihood - 0.8).abs() < 1e-12);
        assert!((delta - 0.3).abs() < 1e-12);
    }

    #[test]
    fn incremental_belief_adds_and_clamps() {
        let mut goal = Goal::new("harvest", 0.8).maintenance(true);
        goal.update_likelihood(0.4, 1.0, true);
        assert!((goal.likelihood - 0.9).abs() < 1e-12);
        let delta = goal.update_likelihood(1.0, 1.0, true);
        assert!((goal.likelihood - 1.0).abs() < f64::EPSILON);
        assert!((delta - 0.1).abs() < 1e-12);
    }

    #[test]
    fn settled_achievement_goal_is_frozen() {
        let mut goal = Goal::new("promotion", 1.0);
        goal.update_likelihood(1.0, 1.0, false);
        assert!(goal.is_settled());

        let delta = goal.update_likelihood(1.0, -1.0, false);
        assert!(delta.abs() < f64::EPSILON);
        assert!((goal.likelihood - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn negative_likelihood_is_not_settled() {
        let mut goal = Goal::new("harvest", 0.8);
        goal.update_likelihood(1.0, -1.0, true);
        assert!((goal.likelihood + 0.5).abs() < 1e-12);
        assert!(!goal.is_settled());

        let delta = goal.update_likelihood(0.7, 1.0, true);
        assert!((goal.likelihood - 0.2).abs() < 1e-12);
        assert!((delta - 0.7).abs() < 1e-12);

        goal.update_likelihood(1.0, -1.0, true);
        goal.update_likelihood(1.0, -1.0, true);
        assert!((goal.likelihood + 1.0).abs() < f64::EPSILON);
        assert!(goal.is_settled());
    }

    #[test]
    fn maintenance_goal_keeps_moving() {
        let mut goal = Goal::new("well fed", 0.5).maintenance(true);
        goal.update_likelihood(1.0, 1.0, false);
        let delta = goal.update_likelihood(1.0, -1.0, false);
        assert!((delta + 1.0).abs() < 1e-12);
        assert!(goal.likelihood.abs() < f64::EPSILON);
    }

    #[test]
    fn computed_source_ignores_belief() {
        let mut goal = Goal::new("bridge repaired", 0.7).with_likelihood_fn(|| 0.9);
        let delta = goal.update_likelihood(1.0, -1.0, false);
        assert!((goal.likelihood - 0.9).abs() < 1e-12);
        assert!((delta - 0.4).abs() < 1e-12);
    }
}
