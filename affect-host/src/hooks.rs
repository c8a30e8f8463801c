//! Integration hooks for the game's existing systems.
//!
//! Combat, trade, and quest code call these to raise [`WorldEvent`]s
//! without knowing how the engine interprets them.

use crate::events::WorldEvent;

/// Someone helped another agent toward a goal (e.g. defended a farm).
#[must_use]
pub fn on_help(helper: &str, helped: &str, goal: &str, amount: f64) -> WorldEvent {
    WorldEvent::Helped {
        helper: helper.to_owned(),
        helped: helped.to_owned(),
        goal: goal.to_owned(),
        amount,
    }
}

/// Someone set back another agent's goal (e.g. theft, sabotage).
#[must_use]
pub fn on_harm(perpetrator: &str, victim: &str, goal: &str, amount: f64) -> WorldEvent {
    WorldEvent::Harmed {
        perpetrator: perpetrator.to_owned(),
        victim: victim.to_owned(),
        goal: goal.to_owned(),
        amount,
    }
}

/// A rumour, sighting, or report changed how likely a goal is.
#[must_use]
pub fn on_news(goal: &str, cause: Option<&str>, likelihood: f64, congruence: f64) -> WorldEvent {
    WorldEvent::GoalProgress {
        goal: goal.to_owned(),
        cause: cause.map(str::to_owned),
        likelihood,
        congruence,
    }
}

/// A quest or world state resolved a goal for good.
#[must_use]
pub fn on_resolved(goal: &str, cause: Option<&str>, achieved: bool) -> WorldEvent {
    WorldEvent::GoalResolved {
        goal: goal.to_owned(),
        cause: cause.map(str::to_owned),
        achieved,
    }
}
