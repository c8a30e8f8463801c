//! Serialisable, read-only views of engine state.
//!
//! The library defines no save format of its own. Hosts that want to show,
//! log, or store emotional state take a snapshot and serialise it however
//! they like.

use serde::Serialize;

use crate::emotion::Emotion;
use crate::engine::AppraisalEngine;
use crate::relation::Relation;
use crate::types::PadState;

/// Everything the engine knows, at one instant.
#[derive(Debug, Clone, Serialize)]
pub struct EngineSnapshot {
    /// One entry per agent, in registration order.
    pub agents: Vec<AgentSnapshot>,
    /// One entry per goal, in registration order.
    pub goals: Vec<GoalSnapshot>,
}

/// One agent's state.
#[derive(Debug, Clone, Serialize)]
pub struct AgentSnapshot {
    /// Agent name.
    pub name: String,
    /// Gain used for the gained views.
    pub gain: f64,
    /// Names of goals the agent holds.
    pub goals: Vec<String>,
    /// Raw internal emotions.
    pub emotions: Vec<Emotion>,
    /// Gain-compressed internal emotions.
    pub gained_emotions: Vec<Emotion>,
    /// Raw PAD aggregate.
    pub pad: PadState,
    /// Gain-compressed PAD aggregate.
    pub gained_pad: PadState,
    /// Relations with their emotion lists.
    pub relations: Vec<Relation>,
}

/// One goal's state.
#[derive(Debug, Clone, Serialize)]
pub struct GoalSnapshot {
    /// Goal name.
    pub name: String,
    /// Utility.
    pub utility: f64,
    /// Current likelihood.
    pub likelihood: f64,
    /// Maintenance goal flag.
    pub is_maintenance: bool,
    /// Settled achievement goal flag.
    pub is_settled: bool,
}

impl EngineSnapshot {
    /// Capture the current state of `engine`.
    #[must_use]
    pub fn capture(engine: &AppraisalEngine) -> Self {
        let agents = engine
            .agents()
            .iter()
            .enumerate()
            .map(|(idx, agent)| AgentSnapshot {
                name: agent.name().to_owned(),
                gain: agent.gain(),
                goals: engine
                    .goals_of(crate::types::AgentId(idx))
                    .map(|g| g.name.clone())
                    .collect(),
                emotions: agent.emotional_state(false),
                gained_emotions: agent.emotional_state(true),
                pad: agent.pad_state(false),
                gained_pad: agent.pad_state(true),
                relations: agent.relations().to_vec(),
            })
            .collect();

        let goals = engine
            .goals()
            .iter()
            .map(|goal| GoalSnapshot {
                name: goal.name.clone(),
                utility: goal.utility,
                likelihood: goal.likelihood,
                is_maintenance: goal.is_maintenance,
                is_settled: goal.is_settled(),
            })
            .collect();

        Self { agents, goals }
    }

    /// Agent entry by name.
    #[must_use]
    pub fn agent(&self, name: &str) -> Option<&AgentSnapshot> {
        self.agents.iter().find(|a| a.name == name)
    }
}
