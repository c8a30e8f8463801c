//! Human-readable emotional state, for consoles, logs, and debug overlays.

use std::fmt::Write as _;

use affect_core::{Agent, AppraisalEngine};

/// `"<agent> feels FEAR : 0.27, JOY : 0.72"`, or `None` when the agent
/// feels nothing.
#[must_use]
pub fn emotional_state_line(agent: &Agent, use_gain: bool) -> Option<String> {
    let emotions = agent.emotional_state(use_gain);
    if emotions.is_empty() {
        return None;
    }
    let felt: Vec<String> = emotions
        .iter()
        .map(|e| format!("{} : {:.2}", e.kind.name().to_uppercase(), e.intensity))
        .collect();
    Some(format!("{} feels {}", agent.name(), felt.join(", ")))
}

/// Sentiments toward other agents, one relation per line:
///
/// ```text
/// villager has the following sentiments:
///    anger(0.24) for thief, and
///    gratitude(0.10) for mayor
/// ```
///
/// Pass `toward` to report a single relation. Returns `None` when no
/// reported relation carries an emotion.
#[must_use]
pub fn sentiments(agent: &Agent, toward: Option<&str>) -> Option<String> {
    let lines: Vec<String> = agent
        .relations()
        .iter()
        .filter(|r| toward.is_none_or(|name| r.target == name))
        .filter(|r| !r.emotions().is_empty())
        .map(|r| {
            let mut line = String::new();
            for e in r.emotions() {
                let _ = write!(line, "{}({:.2}) ", e.kind, e.intensity);
            }
            let _ = write!(line, "for {}", r.target);
            line
        })
        .collect();
    if lines.is_empty() {
        return None;
    }
    Some(format!(
        "{} has the following sentiments:\n   {}",
        agent.name(),
        lines.join(", and\n   ")
    ))
}

/// `"<agent> mood: P 0.12 A 0.30 D -0.05 (strength 0.33)"`, where strength
/// is the length of the PAD vector.
#[must_use]
pub fn mood_line(agent: &Agent, use_gain: bool) -> String {
    let pad = agent.pad_state(use_gain);
    format!("{} mood: {pad} (strength {:.2})", agent.name(), pad.intensity())
}

/// Every line above for every agent that feels something.
#[must_use]
pub fn engine_report(engine: &AppraisalEngine, use_gain: bool) -> Vec<String> {
    let mut out = Vec::new();
    for agent in engine.agents() {
        if let Some(line) = emotional_state_line(agent, use_gain) {
            out.push(line);
            out.push(mood_line(agent, use_gain));
        }
        if let Some(block) = sentiments(agent, None) {
            out.push(block);
        }
    }
    out
}

/// The engine snapshot as pretty-printed JSON.
///
/// # Errors
/// Returns the serializer error, which only happens for non-finite numbers.
pub fn snapshot_json(engine: &AppraisalEngine) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&engine.snapshot())
}
