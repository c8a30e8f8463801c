//! Beliefs — interpreted world events fed into the appraisal engine.

use serde::{Deserialize, Serialize};

/// One interpreted event: how likely it is, who caused it, and how it bears
/// on each affected goal.
///
/// Beliefs are constructed per event and consumed synchronously; the engine
/// never retains them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Belief {
    likelihood: f64,
    causal_agent: Option<String>,
    affected_goals: Vec<String>,
    congruences: Vec<f64>,
    is_incremental: bool,
}

impl Belief {
    /// Build a belief.
    ///
    /// `likelihood` and every congruence are clamped to `[-1, 1]`. An empty
    /// `causal_agent` means the event had no causal agent. The goal and
    /// congruence lists are copied; a length mismatch is kept as-is and
    /// reported by the engine at appraisal time.
    #[must_use]
    pub fn new<S: AsRef<str>>(
        likelihood: f64,
        causal_agent: Option<&str>,
        affected_goals: &[S],
        congruences: &[f64],
    ) -> Self {
        Self {
            likelihood: likelihood.clamp(-1.0, 1.0),
            causal_agent: causal_agent
                .filter(|name| !name.is_empty())
                .map(str::to_owned),
            affected_goals: affected_goals.iter().map(|g| g.as_ref().to_owned()).collect(),
            congruences: congruences.iter().map(|c| c.clamp(-1.0, 1.0)).collect(),
            is_incremental: false,
        }
    }

    /// Builder: treat this belief as incremental evidence for or against its
    /// goals instead of a statement of their absolute likelihood.
    #[must_use]
    pub fn incremental(mut self, is_incremental: bool) -> Self {
        self.is_incremental = is_incremental;
        self
    }

    /// Clamped likelihood.
    #[must_use]
    pub fn likelihood(&self) -> f64 {
        self.likelihood
    }

    /// Name of the agent that caused the event, if any.
    #[must_use]
    pub fn causal_agent(&self) -> Option<&str> {
        self.causal_agent.as_deref()
    }

    /// Affected goal names, in order.
    #[must_use]
    pub fn affected_goals(&self) -> &[String] {
        &self.affected_goals
    }

    /// Clamped congruences, parallel to [`affected_goals`](Self::affected_goals).
    #[must_use]
    pub fn congruences(&self) -> &[f64] {
        &self.congruences
    }

    /// Whether this belief is incremental evidence.
    #[must_use]
    pub fn is_incremental(&self) -> bool {
        self.is_incremental
    }

    /// Whether the goal and congruence lists line up.
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        self.affected_goals.len() == self.congruences.len()
    }

    /// Iterate `(goal name, congruence)` pairs. Stops at the shorter list.
    pub fn goal_congruences(&self) -> impl Iterator<Item = (&str, f64)> {
        self.affected_goals
            .iter()
            .map(String::as_str)
            .zip(self.congruences.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn likelihood_and_congruences_are_clamped() {
        let belief = Belief::new(5.0, Some("villager"), &["a", "b"], &[2.0, -7.5]);
        assert!((belief.likelihood() - 1.0).abs() < f64::EPSILON);
        assert_eq!(belief.congruences(), &[1.0, -1.0]);
    }

    #[test]
    fn empty_causal_agent_means_none() {
        let belief = Belief::new(0.5, Some(""), &["a"], &[1.0]);
        assert_eq!(belief.causal_agent(), None);
    }

    #[test]
    fn inputs_are_copied() {
        let mut goals = vec!["harvest".to_string()];
        let belief = Belief::new(0.5, None, &goals, &[1.0]);
        goals[0].push_str(" failed");
        assert_eq!(belief.affected_goals(), &["harvest".to_string()]);
    }

    #[test]
    fn mismatched_lengths_are_not_well_formed() {
        let belief = Belief::new(0.5, None, &["a", "b"], &[1.0]);
        assert!(!belief.is_well_formed());
        assert_eq!(belief.goal_congruences().count(), 1);
    }
}
