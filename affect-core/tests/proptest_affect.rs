//! Property-Based Tests for the appraisal engine
//!
//! Uses `proptest` to check clamping, freezing, accumulation, decay, and
//! gain invariants under random inputs.

use proptest::prelude::*;

use affect_core::decay::{DecayFunction, DecaySettings};
use affect_core::emotion::{self, Emotion, EmotionKind};
use affect_core::gain;
use affect_core::{AppraisalEngine, Belief, Goal};

// ---------------------------------------------------------------------------
// Strategy helpers
// ---------------------------------------------------------------------------

fn arb_kind() -> impl Strategy<Value = EmotionKind> {
    (0..EmotionKind::ALL.len()).prop_map(|i| EmotionKind::ALL[i])
}

fn arb_belief(goals: &'static [&'static str]) -> impl Strategy<Value = Belief> {
    (
        0.0..=1.0f64,
        prop::sample::select(goals),
        -1.0..=1.0f64,
        any::<bool>(),
    )
        .prop_map(|(likelihood, goal, congruence, incremental)| {
            Belief::new(likelihood, None, &[goal], &[congruence]).incremental(incremental)
        })
}

// ---------------------------------------------------------------------------
// Property: inputs are clamped into range
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn goal_utility_always_clamped(utility in -100.0..100.0f64) {
        let goal = Goal::new("g", utility);
        prop_assert!((-1.0..=1.0).contains(&goal.utility));
    }

    #[test]
    fn belief_values_always_clamped(likelihood in -10.0..10.0f64, congruence in -10.0..10.0f64) {
        let belief = Belief::new(likelihood, Some("x"), &["g"], &[congruence]);
        prop_assert!((-1.0..=1.0).contains(&belief.likelihood()));
        prop_assert!((-1.0..=1.0).contains(&belief.congruences()[0]));
    }
}

// ---------------------------------------------------------------------------
// Property: likelihood updates stay in range and settled goals freeze
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn absolute_update_lands_in_unit_interval(l in 0.0..=1.0f64, c in -1.0..=1.0f64) {
        let mut goal = Goal::new("g", 0.5);
        let delta = goal.update_likelihood(l, c, false);
        prop_assert!((0.0..=1.0).contains(&goal.likelihood));
        prop_assert!((delta - (goal.likelihood - 0.5)).abs() < 1e-12);
    }

    #[test]
    fn incremental_update_stays_bounded(steps in prop::collection::vec((0.0..=1.0f64, -1.0..=1.0f64), 1..30)) {
        let mut goal = Goal::new("g", 0.5).maintenance(true);
        for (l, c) in steps {
            goal.update_likelihood(l, c, true);
            prop_assert!((-1.0..=1.0).contains(&goal.likelihood));
        }
    }

    #[test]
    fn settled_goal_is_frozen(
        start in prop::sample::select(vec![1.0f64, 0.0, -1.0]),
        l in 0.0..=1.0f64,
        c in -1.0..=1.0f64,
        inc in any::<bool>(),
    ) {
        let mut goal = Goal::new("g", 0.5).with_likelihood(start);
        prop_assert!(goal.is_settled());
        let delta = goal.update_likelihood(l, c, inc);
        prop_assert!(delta.abs() < f64::EPSILON);
        prop_assert!((goal.likelihood - start).abs() < f64::EPSILON);
    }

    #[test]
    fn interior_negative_goal_keeps_moving(start in -0.99..-0.01f64, l in 0.01..=1.0f64) {
        let mut goal = Goal::new("g", 0.5).with_likelihood(start);
        prop_assert!(!goal.is_settled());
        let delta = goal.update_likelihood(l, 1.0, true);
        prop_assert!(delta > 0.0);
        prop_assert!((goal.likelihood - (start + l).min(1.0)).abs() < 1e-12);
    }
}

// ---------------------------------------------------------------------------
// Property: accumulation is additive per kind
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn accumulation_sums_same_kind(kind in arb_kind(), a in 0.0..5.0f64, b in 0.0..5.0f64) {
        let mut list = Vec::new();
        emotion::accumulate(&mut list, Emotion::new(kind, a));
        emotion::accumulate(&mut list, Emotion::new(kind, b));
        prop_assert_eq!(list.len(), 1);
        prop_assert!((list[0].intensity - (a + b)).abs() < 1e-12);
    }

    #[test]
    fn one_entry_per_kind(kinds in prop::collection::vec(arb_kind(), 0..50)) {
        let mut list = Vec::new();
        for kind in &kinds {
            emotion::accumulate(&mut list, Emotion::new(*kind, 0.1));
        }
        let mut seen: Vec<EmotionKind> = list.iter().map(|e| e.kind).collect();
        seen.sort();
        seen.dedup();
        prop_assert_eq!(seen.len(), list.len());
    }
}

// ---------------------------------------------------------------------------
// Property: decay follows its curve and removes faded emotions
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn exponential_decay_is_geometric(value in 0.01..2.0f64, factor in 0.05..1.0f64, ms in 0u64..5_000) {
        let settings = DecaySettings {
            function: DecayFunction::Exponential,
            factor,
            removal_threshold: 0.0,
        };
        #[allow(clippy::cast_precision_loss)]
        let expected = value * factor.powf(ms as f64 / 1000.0);
        match settings.decay_value(value, ms) {
            Some(v) => prop_assert!((v - expected).abs() < 1e-12),
            None => prop_assert!(expected <= 0.0),
        }
    }

    #[test]
    fn decay_never_raises_or_keeps_faded(
        intensities in prop::collection::vec(0.0..1.0f64, 0..20),
        factor in 0.0..0.5f64,
        ms in 0u64..10_000,
    ) {
        let settings = DecaySettings {
            function: DecayFunction::Linear,
            factor,
            removal_threshold: 0.001,
        };
        let mut list: Vec<Emotion> = intensities
            .iter()
            .zip(EmotionKind::ALL.iter().cycle())
            .map(|(i, k)| Emotion::new(*k, *i))
            .collect();
        let max_before = list.iter().map(|e| e.intensity).fold(0.0, f64::max);
        affect_core::decay::decay_emotions(&mut list, &settings, ms);
        for e in &list {
            prop_assert!(e.intensity > 0.001);
            prop_assert!(e.intensity <= max_before);
        }
    }
}

// ---------------------------------------------------------------------------
// Property: gain is bounded, sign-preserving, and monotonic
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn gain_is_bounded(g in 0.01..=20.0f64, x in -50.0..50.0f64) {
        let y = gain::apply(g, x);
        prop_assert!(y > -1.0 && y < 1.0);
        prop_assert!(y * x >= 0.0);
    }

    #[test]
    fn gain_is_monotonic(g in 0.01..=20.0f64, a in -5.0..5.0f64, b in -5.0..5.0f64) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(gain::apply(g, lo) <= gain::apply(g, hi));
    }
}

// ---------------------------------------------------------------------------
// Property: random belief streams keep engine state well-formed
// ---------------------------------------------------------------------------

const GOALS: &[&str] = &["harvest saved", "village destroyed", "bridge repaired"];

proptest! {
    #[test]
    fn engine_state_stays_well_formed(beliefs in prop::collection::vec(arb_belief(GOALS), 1..40)) {
        let mut engine = AppraisalEngine::new();
        engine.create_agent("a").expect("agent");
        engine.create_agent("b").expect("agent");
        engine.create_goal_for_agent("a", GOALS[0], 0.8, false).expect("goal");
        engine.create_goal_for_agent("a", GOALS[1], -0.9, true).expect("goal");
        engine.create_goal_for_agent("b", GOALS[2], 0.4, false).expect("goal");
        engine.create_relation("a", "b", 0.7).expect("relation");
        engine.create_relation("b", "a", -0.3).expect("relation");

        for belief in &beliefs {
            engine.appraise(belief).expect("well-formed belief");
            engine.decay_elapsed(100);
        }

        for goal in engine.goals() {
            prop_assert!((-1.0..=1.0).contains(&goal.likelihood));
        }
        for agent in engine.agents() {
            for e in agent.emotions() {
                prop_assert!(e.intensity > 0.0 && e.intensity.is_finite());
            }
            let pad = agent.pad_state(true);
            prop_assert!(pad.pleasure.abs() < 1.0 && pad.arousal.abs() < 1.0 && pad.dominance.abs() < 1.0);
        }
    }
}
