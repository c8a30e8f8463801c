//! World events that trigger appraisal.
//!
//! The host describes what happened in game terms; [`WorldEvent::to_belief`]
//! interprets it as a [`Belief`] the engine can appraise.

use affect_core::Belief;
use serde::{Deserialize, Serialize};

/// Something that happened in the world and matters to someone's goals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum WorldEvent {
    /// `helper` did something that made `goal` of `helped` more likely.
    Helped {
        /// Agent that caused the event.
        helper: String,
        /// Agent whose goal benefits.
        helped: String,
        /// Goal that moved.
        goal: String,
        /// How much more likely the goal became, in `[0, 1]`.
        amount: f64,
    },

    /// `perpetrator` did something that made `goal` of `victim` less likely.
    Harmed {
        /// Agent that caused the event.
        perpetrator: String,
        /// Agent whose goal suffers.
        victim: String,
        /// Goal that moved.
        goal: String,
        /// How much less likely the goal became, in `[0, 1]`.
        amount: f64,
    },

    /// New information about a goal, replacing its likelihood.
    GoalProgress {
        /// Goal the information is about.
        goal: String,
        /// Agent responsible, if any.
        cause: Option<String>,
        /// Likelihood that the information is true, in `[0, 1]`.
        likelihood: f64,
        /// `1.0` facilitates the goal, `-1.0` blocks it.
        congruence: f64,
    },

    /// The goal was definitively achieved or failed.
    GoalResolved {
        /// Goal that was resolved.
        goal: String,
        /// Agent responsible, if any.
        cause: Option<String>,
        /// Whether the goal came true.
        achieved: bool,
    },
}

impl WorldEvent {
    /// Interpret the event as a belief.
    ///
    /// Help and harm are incremental nudges of the goal's likelihood;
    /// progress and resolution replace it.
    #[must_use]
    pub fn to_belief(&self) -> Belief {
        match self {
            Self::Helped {
                helper, goal, amount, ..
            } => Belief::new(*amount, Some(helper.as_str()), &[goal], &[1.0]).incremental(true),
            Self::Harmed {
                perpetrator,
                goal,
                amount,
                ..
            } => Belief::new(*amount, Some(perpetrator.as_str()), &[goal], &[-1.0]).incremental(true),
            Self::GoalProgress {
                goal,
                cause,
                likelihood,
                congruence,
            } => Belief::new(*likelihood, cause.as_deref(), &[goal], &[*congruence]),
            Self::GoalResolved { goal, cause, achieved } => {
                let congruence = if *achieved { 1.0 } else { -1.0 };
                Belief::new(1.0, cause.as_deref(), &[goal], &[congruence])
            }
        }
    }

    /// The single agent whose goal is affected, when the event names one.
    #[must_use]
    pub fn affected_agent(&self) -> Option<&str> {
        match self {
            Self::Helped { helped, .. } => Some(helped),
            Self::Harmed { victim, .. } => Some(victim),
            Self::GoalProgress { .. } | Self::GoalResolved { .. } => None,
        }
    }

    /// Agent responsible for the event, if any.
    #[must_use]
    pub fn cause(&self) -> Option<&str> {
        match self {
            Self::Helped { helper, .. } => Some(helper),
            Self::Harmed { perpetrator, .. } => Some(perpetrator),
            Self::GoalProgress { cause, .. } | Self::GoalResolved { cause, .. } => cause.as_deref(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn help_is_incremental_and_congruent() {
        let event = WorldEvent::Helped {
            helper: "player".to_string(),
            helped: "farmer".to_string(),
            goal: "harvest saved".to_string(),
            amount: 0.4,
        };
        let belief = event.to_belief();
        assert!(belief.is_incremental());
        assert_eq!(belief.causal_agent(), Some("player"));
        assert_eq!(belief.congruences(), &[1.0]);
        assert_eq!(event.affected_agent(), Some("farmer"));
    }

    #[test]
    fn harm_blocks_the_goal() {
        let event = WorldEvent::Harmed {
            perpetrator: "thief".to_string(),
            victim: "merchant".to_string(),
            goal: "shop prospers".to_string(),
            amount: 2.0,
        };
        let belief = event.to_belief();
        assert_eq!(belief.congruences(), &[-1.0]);
        assert!((belief.likelihood() - 1.0).abs() < f64::EPSILON, "amount is clamped");
        assert_eq!(event.cause(), Some("thief"));
    }

    #[test]
    fn resolution_is_absolute() {
        let failed = WorldEvent::GoalResolved {
            goal: "village destroyed".to_string(),
            cause: None,
            achieved: false,
        };
        let belief = failed.to_belief();
        assert!(!belief.is_incremental());
        assert_eq!(belief.causal_agent(), None);
        assert_eq!(belief.congruences(), &[-1.0]);
        assert!(failed.affected_agent().is_none());
    }

    #[test]
    fn events_round_trip_through_json() {
        let event = WorldEvent::GoalProgress {
            goal: "village destroyed".to_string(),
            cause: Some("dragon".to_string()),
            likelihood: 0.6,
            congruence: 1.0,
        };
        let json = serde_json::to_string(&event).expect("serialize");
        assert!(json.contains("\"kind\":\"goal-progress\""));
        let back: WorldEvent = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, event);
    }
}
