//! Per-frame systems driving the emotion engine.
//!
//! In a full ECS integration these would run as scheduled systems. Here
//! they are plain functions and a small stateful accumulator.
//!
//! ## Frame budget:
//!
//! | System       | Frequency                  |
//! |--------------|----------------------------|
//! | Observation  | On world event             |
//! | Decay        | Every `decay_interval_ms`  |

use std::time::Duration;

use affect_core::{AppraisalEngine, AppraisalReport, Result};
use tracing::{debug, trace};

use crate::events::WorldEvent;

/// Appraise a world event.
///
/// Events naming a single affected agent that the engine knows are
/// appraised for that agent only; everything else is appraised for every
/// agent holding the goal.
///
/// # Errors
/// Propagates the engine's appraisal errors.
pub fn observe_event(engine: &mut AppraisalEngine, event: &WorldEvent) -> Result<AppraisalReport> {
    let belief = event.to_belief();
    let target = event.affected_agent().and_then(|name| engine.agent_id(name));
    let report = match target {
        Some(id) => engine.appraise_for(&belief, id)?,
        None => engine.appraise(&belief)?,
    };
    debug!(
        goals = report.goals_appraised,
        skipped = report.goals_skipped.len(),
        emitted = report.emotions_emitted,
        "Observed world event"
    );
    Ok(report)
}

/// Frame-driven decay.
///
/// Frame deltas accumulate until at least one interval has passed; the
/// engine is then decayed by the whole accumulated time at once.
#[derive(Debug, Clone)]
pub struct DecaySystem {
    interval_ms: u64,
    accumulated_ms: u64,
}

impl DecaySystem {
    /// Decay once every `interval_ms` of game time. An interval of 0 decays
    /// on every frame.
    #[must_use]
    pub fn new(interval_ms: u64) -> Self {
        Self {
            interval_ms,
            accumulated_ms: 0,
        }
    }

    /// Game time accumulated since the last decay pass.
    #[must_use]
    pub fn pending_ms(&self) -> u64 {
        self.accumulated_ms
    }

    /// Advance by one frame. Returns the number of emotions removed when a
    /// decay pass ran, `None` otherwise.
    pub fn tick(&mut self, engine: &mut AppraisalEngine, frame: Duration) -> Option<usize> {
        let frame_ms = u64::try_from(frame.as_millis()).unwrap_or(u64::MAX);
        self.accumulated_ms = self.accumulated_ms.saturating_add(frame_ms);
        if self.accumulated_ms < self.interval_ms {
            return None;
        }
        let elapsed = std::mem::take(&mut self.accumulated_ms);
        let removed = engine.decay_elapsed(elapsed);
        trace!(elapsed_ms = elapsed, removed, "Decay system ran");
        Some(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use affect_core::{DecayFunction, EmotionKind};

    use crate::hooks;

    fn village() -> AppraisalEngine {
        let mut engine = AppraisalEngine::new();
        engine.create_agent("villager").expect("agent");
        engine.create_agent("mayor").expect("agent");
        engine.create_agent("thief").expect("agent");
        engine
            .create_goal_for_agent("villager", "harvest saved", 0.8, false)
            .expect("goal");
        engine.create_relation("mayor", "villager", 1.0).expect("relation");
        engine
    }

    #[test]
    fn harm_event_angers_victim_and_saddens_friends() {
        let mut engine = village();
        let event = hooks::on_harm("thief", "villager", "harvest saved", 0.3);
        let report = observe_event(&mut engine, &event).expect("appraise");
        assert_eq!(report.goals_appraised, 1);

        let villager = engine.agent_by_name("villager").expect("agent");
        assert!(villager.intensity_of(EmotionKind::Fear) > 0.0);
        assert!(villager.intensity_of(EmotionKind::Anger) > 0.0);
        let toward_thief = villager.relation("thief").expect("relation created");
        assert_eq!(toward_thief.emotions()[0].kind, EmotionKind::Anger);

        let mayor = engine.agent_by_name("mayor").expect("agent");
        assert!(mayor.intensity_of(EmotionKind::Pity) > 0.0);
    }

    #[test]
    fn news_without_target_reaches_every_owner() {
        let mut engine = village();
        engine
            .create_goal_for_agent("mayor", "harvest saved", 0.8, false)
            .expect("goal");
        let event = hooks::on_news("harvest saved", None, 0.6, 1.0);
        observe_event(&mut engine, &event).expect("appraise");

        for name in ["villager", "mayor"] {
            let agent = engine.agent_by_name(name).expect("agent");
            assert!(agent.intensity_of(EmotionKind::Hope) > 0.0, "{name} should hope");
        }
    }

    #[test]
    fn decay_waits_for_interval() {
        let mut engine = village();
        engine.set_decay(0.5, DecayFunction::Exponential).expect("decay");
        observe_event(&mut engine, &hooks::on_news("harvest saved", None, 0.6, 1.0)).expect("appraise");
        let before = engine.agent_by_name("villager").expect("agent").intensity_of(EmotionKind::Hope);

        let mut system = DecaySystem::new(1_000);
        assert_eq!(system.tick(&mut engine, Duration::from_millis(400)), None);
        assert_eq!(system.tick(&mut engine, Duration::from_millis(400)), None);
        assert_eq!(system.pending_ms(), 800);
        assert_eq!(system.tick(&mut engine, Duration::from_millis(1_200)), Some(0));
        assert_eq!(system.pending_ms(), 0);

        let after = engine.agent_by_name("villager").expect("agent").intensity_of(EmotionKind::Hope);
        assert!((after - before * 0.25).abs() < 1e-12);
        assert_eq!(engine.last_elapsed_ms(), 2_000);
    }
}
