//! The appraisal engine — registries, belief appraisal, and decay ticks.
//!
//! One call to [`AppraisalEngine::appraise`] is one atomic pass over a
//! belief. Per affected goal:
//!
//! 1. the goal's likelihood is updated and the change measured
//! 2. every owner of the goal gets its internal emotions (hope, joy, ...)
//! 3. the owner feels gratitude/anger toward the causal agent, if another
//!    agent caused the event
//! 4. every agent with a relation toward the owner gets a social emotion
//!    (happy-for, pity, ...) and, if it caused the event, gratification or
//!    remorse
//!
//! The engine is single-owner: hosts that need to share it across threads
//! wrap it in a mutex and drive appraisal and decay from one logical thread.

use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, trace, warn};

use crate::agent::Agent;
use crate::appraisal::{self, GoalOutcome};
use crate::belief::Belief;
use crate::config::AffectConfig;
use crate::decay::{Clock, DecayFunction, DecaySettings, SystemClock};
use crate::emotion::Emotion;
use crate::error::{AffectError, Result};
use crate::gain;
use crate::goal::{Goal, NEUTRAL_LIKELIHOOD};
use crate::snapshot::EngineSnapshot;
use crate::types::{AgentId, GoalId};

/// Summary of one appraisal pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AppraisalReport {
    /// Goals whose likelihood was evaluated.
    pub goals_appraised: usize,
    /// Goal names that were skipped because nobody knows them.
    pub goals_skipped: Vec<String>,
    /// Emotion emissions, internal and relational, across all agents.
    pub emotions_emitted: usize,
}

/// Which agents own the goal being appraised.
#[derive(Clone, Copy)]
enum Scope {
    /// Every registered agent holding the goal.
    AllOwners,
    /// Only this agent.
    Only(AgentId),
}

/// Owns every agent and goal of one simulation and runs appraisal over them.
///
/// Clones are independent copies of the state that share the clock.
#[derive(Debug, Clone)]
pub struct AppraisalEngine {
    agents: Vec<Agent>,
    agent_index: HashMap<String, AgentId>,
    goals: Vec<Goal>,
    goal_index: HashMap<String, GoalId>,
    decay: DecaySettings,
    default_gain: f64,
    initial_goal_likelihood: f64,
    validate_targeted: bool,
    debug: bool,
    clock: Arc<dyn Clock>,
    last_tick_ms: i64,
    last_elapsed_ms: u64,
}

impl Default for AppraisalEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl AppraisalEngine {
    /// Create an engine with default settings and the system clock.
    #[must_use]
    pub fn new() -> Self {
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);
        let last_tick_ms = clock.now_millis();
        Self {
            agents: Vec::new(),
            agent_index: HashMap::new(),
            goals: Vec::new(),
            goal_index: HashMap::new(),
            decay: DecaySettings::default(),
            default_gain: gain::DEFAULT_GAIN,
            initial_goal_likelihood: NEUTRAL_LIKELIHOOD,
            validate_targeted: true,
            debug: false,
            clock,
            last_tick_ms,
            last_elapsed_ms: 0,
        }
    }

    /// Create an engine from a validated configuration.
    ///
    /// # Errors
    /// Returns `AffectError::Config` if the configuration is out of range.
    pub fn from_config(config: &AffectConfig) -> Result<Self> {
        config.validate()?;
        let mut engine = Self::new();
        engine.decay = DecaySettings::from(&config.decay);
        engine.default_gain = config.appraisal.default_gain;
        engine.initial_goal_likelihood = config.appraisal.initial_goal_likelihood;
        engine.validate_targeted = config.appraisal.validate_targeted;
        engine.debug = config.general.debug;
        Ok(engine)
    }

    /// Builder: read time from `clock` instead of the system clock. The
    /// decay interval restarts from the clock's current reading.
    #[must_use]
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self.last_tick_ms = self.clock.now_millis();
        self
    }

    // -----------------------------------------------------------------------
    // Agent registry
    // -----------------------------------------------------------------------

    /// Register an agent built elsewhere.
    ///
    /// # Errors
    /// Returns [`AffectError::DuplicateAgent`] if the name is taken.
    pub fn register_agent(&mut self, agent: Agent) -> Result<AgentId> {
        if self.agent_index.contains_key(agent.name()) {
            warn!(agent = agent.name(), "Agent already registered");
            return Err(AffectError::DuplicateAgent(agent.name().to_owned()));
        }
        let id = AgentId(self.agents.len());
        self.agent_index.insert(agent.name().to_owned(), id);
        self.agents.push(agent);
        Ok(id)
    }

    /// Create and register an agent with the engine's default gain.
    ///
    /// # Errors
    /// Returns [`AffectError::DuplicateAgent`] if the name is taken.
    pub fn create_agent(&mut self, name: &str) -> Result<AgentId> {
        let mut agent = Agent::new(name);
        agent.set_gain(self.default_gain)?;
        self.register_agent(agent)
    }

    /// All agents, in registration order.
    #[must_use]
    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    /// Agent by id.
    #[must_use]
    pub fn agent(&self, id: AgentId) -> Option<&Agent> {
        self.agents.get(id.0)
    }

    /// Mutable agent by id.
    pub fn agent_mut(&mut self, id: AgentId) -> Option<&mut Agent> {
        self.agents.get_mut(id.0)
    }

    /// Id of the agent named `name`.
    #[must_use]
    pub fn agent_id(&self, name: &str) -> Option<AgentId> {
        self.agent_index.get(name).copied()
    }

    /// Agent named `name`.
    #[must_use]
    pub fn agent_by_name(&self, name: &str) -> Option<&Agent> {
        self.agent_id(name).and_then(|id| self.agent(id))
    }

    fn require_agent(&self, name: &str) -> Result<AgentId> {
        self.agent_id(name).ok_or_else(|| {
            warn!(agent = name, "Agent not found");
            AffectError::AgentNotFound(name.to_owned())
        })
    }

    // -----------------------------------------------------------------------
    // Goal registry
    // -----------------------------------------------------------------------

    /// Register a goal built elsewhere.
    ///
    /// # Errors
    /// Returns [`AffectError::DuplicateGoal`] if the name is taken; the
    /// registered goal is left as it was.
    pub fn register_goal(&mut self, goal: Goal) -> Result<GoalId> {
        if self.goal_index.contains_key(&goal.name) {
            warn!(goal = %goal.name, "Failed adding a second goal with the same name");
            return Err(AffectError::DuplicateGoal(goal.name));
        }
        let id = GoalId(self.goals.len());
        self.goal_index.insert(goal.name.clone(), id);
        self.goals.push(goal);
        Ok(id)
    }

    /// Create a goal and attach it to `agent_name`.
    ///
    /// If a goal called `goal_name` already exists, it is treated as a
    /// common goal: the existing goal is attached instead and `utility` is
    /// ignored. `is_maintenance = true` marks the goal as a maintenance goal
    /// either way.
    ///
    /// # Errors
    /// Returns [`AffectError::AgentNotFound`] for an unknown agent.
    pub fn create_goal_for_agent(
        &mut self,
        agent_name: &str,
        goal_name: &str,
        utility: f64,
        is_maintenance: bool,
    ) -> Result<GoalId> {
        let agent_id = self.require_agent(agent_name)?;

        let goal_id = if let Some(existing) = self.goal_id(goal_name) {
            warn!(
                goal = goal_name,
                agent = agent_name,
                "Goal already registered, attaching it as a common goal"
            );
            existing
        } else {
            let goal = Goal::new(goal_name, utility).with_likelihood(self.initial_goal_likelihood);
            self.register_goal(goal)?
        };

        if is_maintenance {
            self.goals[goal_id.0].is_maintenance = true;
        }
        self.agents[agent_id.0].add_goal(goal_id);
        Ok(goal_id)
    }

    /// Detach the goal named `goal_name` from `agent_name`. The goal stays
    /// registered. Returns whether the agent held it.
    ///
    /// # Errors
    /// Returns [`AffectError::AgentNotFound`] or [`AffectError::GoalNotFound`].
    pub fn remove_goal_from_agent(&mut self, agent_name: &str, goal_name: &str) -> Result<bool> {
        let agent_id = self.require_agent(agent_name)?;
        let goal_id = self.goal_id(goal_name).ok_or_else(|| {
            warn!(goal = goal_name, "Goal not found");
            AffectError::GoalNotFound(goal_name.to_owned())
        })?;
        Ok(self.agents[agent_id.0].remove_goal(goal_id))
    }

    /// All goals, in registration order.
    #[must_use]
    pub fn goals(&self) -> &[Goal] {
        &self.goals
    }

    /// Goal by id.
    #[must_use]
    pub fn goal(&self, id: GoalId) -> Option<&Goal> {
        self.goals.get(id.0)
    }

    /// Mutable goal by id, e.g. to reset its likelihood externally.
    pub fn goal_mut(&mut self, id: GoalId) -> Option<&mut Goal> {
        self.goals.get_mut(id.0)
    }

    /// Id of the goal named `name`.
    #[must_use]
    pub fn goal_id(&self, name: &str) -> Option<GoalId> {
        self.goal_index.get(name).copied()
    }

    /// Goal named `name`.
    #[must_use]
    pub fn goal_by_name(&self, name: &str) -> Option<&Goal> {
        self.goal_id(name).and_then(|id| self.goal(id))
    }

    /// Goals held by `agent`, resolved.
    pub fn goals_of(&self, agent: AgentId) -> impl Iterator<Item = &Goal> {
        self.agent(agent)
            .map(Agent::goals)
            .unwrap_or_default()
            .iter()
            .filter_map(|id| self.goal(*id))
    }

    // -----------------------------------------------------------------------
    // Relations
    // -----------------------------------------------------------------------

    /// Set `source`'s attitude toward `target`.
    ///
    /// # Errors
    /// Returns [`AffectError::AgentNotFound`] if either agent is unknown, or
    /// [`AffectError::InvalidLike`] if `like` is outside `[-1, 1]`.
    pub fn create_relation(&mut self, source: &str, target: &str, like: f64) -> Result<()> {
        let source_id = self.require_agent(source)?;
        self.require_agent(target)?;
        if !(-1.0..=1.0).contains(&like) {
            warn!(source, target, like, "Cannot relate agents with this intensity");
            return Err(AffectError::InvalidLike(like));
        }
        self.agents[source_id.0].update_relation(target, like);
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Settings
    // -----------------------------------------------------------------------

    /// Set the gain of every registered agent and of agents created later.
    ///
    /// # Errors
    /// Returns [`AffectError::InvalidGain`] outside `(0, 20]`; no agent is
    /// changed in that case.
    pub fn set_gain(&mut self, gain: f64) -> Result<()> {
        if let Err(e) = gain::validate(gain) {
            warn!(gain, "Gain factor for appraisal integration must be in (0, 20]");
            return Err(e);
        }
        self.default_gain = gain;
        for agent in &mut self.agents {
            agent.set_gain(gain)?;
        }
        Ok(())
    }

    /// Select the decay curve and its factor.
    ///
    /// # Errors
    /// Returns [`AffectError::InvalidDecayFactor`] if the factor does not
    /// suit the curve; the previous settings are kept.
    pub fn set_decay(&mut self, factor: f64, function: DecayFunction) -> Result<()> {
        if let Err(e) = function.validate_factor(factor) {
            warn!(factor, %function, "Rejected decay settings");
            return Err(e);
        }
        self.decay.factor = factor;
        self.decay.function = function;
        Ok(())
    }

    /// Set the intensity at or below which decayed emotions are removed.
    ///
    /// # Errors
    /// Returns `AffectError::Config` for a negative or non-finite threshold.
    pub fn set_removal_threshold(&mut self, threshold: f64) -> Result<()> {
        if !(threshold.is_finite() && threshold >= 0.0) {
            warn!(threshold, "Rejected decay removal threshold");
            return Err(AffectError::Config(format!(
                "removal threshold must be >= 0, got {threshold}"
            )));
        }
        self.decay.removal_threshold = threshold;
        Ok(())
    }

    /// Active decay settings.
    #[must_use]
    pub fn decay_settings(&self) -> DecaySettings {
        self.decay
    }

    /// Toggle the post-appraisal emotional snapshot in the debug log.
    pub fn set_debug(&mut self, debug: bool) {
        self.debug = debug;
    }

    /// Whether debug snapshots are on.
    #[must_use]
    pub fn is_debug(&self) -> bool {
        self.debug
    }

    // -----------------------------------------------------------------------
    // Appraisal
    // -----------------------------------------------------------------------

    /// Build a belief from parts and appraise it for every agent.
    ///
    /// # Errors
    /// See [`appraise`](Self::appraise).
    pub fn appraise_belief<S: AsRef<str>>(
        &mut self,
        likelihood: f64,
        causal_agent: Option<&str>,
        affected_goals: &[S],
        congruences: &[f64],
        is_incremental: bool,
    ) -> Result<AppraisalReport> {
        let belief = Belief::new(likelihood, causal_agent, affected_goals, congruences)
            .incremental(is_incremental);
        self.appraise(&belief)
    }

    /// Appraise `belief` for every agent holding an affected goal, and
    /// propagate through every relation toward those agents.
    ///
    /// Goal names nobody registered are skipped and listed in the report.
    ///
    /// # Errors
    /// - [`AffectError::CongruenceLengthMismatch`] for a malformed belief
    /// - [`AffectError::NoGoalsRegistered`] when there is nothing to appraise
    ///
    /// Nothing is changed when an error is returned.
    pub fn appraise(&mut self, belief: &Belief) -> Result<AppraisalReport> {
        debug!(
            likelihood = belief.likelihood(),
            causal = belief.causal_agent().unwrap_or("-"),
            goals = ?belief.affected_goals(),
            incremental = belief.is_incremental(),
            "Appraising belief"
        );
        check_well_formed(belief)?;
        if self.goals.is_empty() {
            warn!("No goals registered, all goals to be considered in appraisal need to be registered");
            return Err(AffectError::NoGoalsRegistered);
        }

        let mut report = AppraisalReport::default();
        for (goal_name, congruence) in belief.goal_congruences() {
            let Some(goal_id) = self.goal_id(goal_name) else {
                warn!(goal = goal_name, "Skipping unknown goal");
                report.goals_skipped.push(goal_name.to_owned());
                continue;
            };
            self.appraise_goal(goal_id, congruence, belief, Scope::AllOwners, &mut report);
        }

        self.log_snapshot();
        Ok(report)
    }

    /// Appraise `belief` for one agent's goals only.
    ///
    /// This is the fast path for hosts that know a single agent is affected:
    /// goals are looked up among that agent's own goals, and other agents
    /// sharing those goals are not appraised as owners. Relations toward the
    /// agent still produce social emotions.
    ///
    /// # Errors
    /// - [`AffectError::AgentNotFound`] for an unknown id
    /// - [`AffectError::CongruenceLengthMismatch`] for a malformed belief,
    ///   unless targeted validation is turned off in the configuration
    pub fn appraise_for(&mut self, belief: &Belief, agent: AgentId) -> Result<AppraisalReport> {
        let Some(owner) = self.agent(agent) else {
            warn!(%agent, "Agent not found");
            return Err(AffectError::AgentNotFound(agent.to_string()));
        };
        if self.validate_targeted {
            check_well_formed(belief)?;
        }

        let held: Vec<(String, GoalId)> = owner
            .goals()
            .iter()
            .filter_map(|id| self.goal(*id).map(|g| (g.name.clone(), *id)))
            .collect();

        let mut report = AppraisalReport::default();
        for (goal_name, congruence) in belief.goal_congruences() {
            let Some((_, goal_id)) = held.iter().find(|(name, _)| name == goal_name) else {
                report.goals_skipped.push(goal_name.to_owned());
                continue;
            };
            self.appraise_goal(*goal_id, congruence, belief, Scope::Only(agent), &mut report);
        }

        self.log_snapshot();
        Ok(report)
    }

    fn appraise_goal(
        &mut self,
        goal_id: GoalId,
        congruence: f64,
        belief: &Belief,
        scope: Scope,
        report: &mut AppraisalReport,
    ) {
        let goal = &mut self.goals[goal_id.0];
        let delta_likelihood =
            goal.update_likelihood(belief.likelihood(), congruence, belief.is_incremental());
        let outcome = GoalOutcome {
            utility: goal.utility,
            delta_likelihood,
            likelihood: goal.likelihood,
        };
        report.goals_appraised += 1;
        debug!(
            goal = %goal.name,
            utility = outcome.utility,
            delta = delta_likelihood,
            likelihood = outcome.likelihood,
            "Evaluated goal"
        );

        let owners: Vec<AgentId> = match scope {
            Scope::AllOwners => (0..self.agents.len())
                .map(AgentId)
                .filter(|id| self.agents[id.0].has_goal(goal_id))
                .collect(),
            Scope::Only(id) => vec![id],
        };

        for owner in owners {
            report.emotions_emitted += self.appraise_owner(owner, &outcome, belief.causal_agent());
        }
    }

    /// Internal, causal, and social emotions for one goal owner. Returns the
    /// number of emissions.
    fn appraise_owner(&mut self, owner: AgentId, outcome: &GoalOutcome, causal: Option<&str>) -> usize {
        let owner_name = self.agents[owner.0].name().to_owned();
        debug!(owner = %owner_name, "Goal owned by");
        let mut emitted = 0;

        for emotion in appraisal::internal_emotions(outcome) {
            trace!(agent = %owner_name, %emotion, "Internal emotion");
            self.agents[owner.0].update_emotional_state(emotion);
            emitted += 1;
        }

        emitted += self.causal_emotions(&owner_name, causal, owner, outcome);

        for observer in 0..self.agents.len() {
            if observer == owner.0 {
                continue;
            }
            let agent = &mut self.agents[observer];
            let Some(relation) = agent.relation_mut(&owner_name) else {
                continue;
            };
            if let Some(emotion) = appraisal::social_emotion(outcome, relation.like) {
                relation.add_emotion(emotion);
                trace!(agent = agent.name(), toward = %owner_name, %emotion, "Social emotion");
                agent.update_emotional_state(emotion);
                emitted += 1;
            }
            emitted += self.causal_emotions(&owner_name, causal, AgentId(observer), outcome);
        }

        emitted
    }

    /// Emotions about who caused the event, seen from `perspective`.
    ///
    /// - `perspective` is the affected agent and someone else caused it:
    ///   gratitude or anger toward the causal agent
    /// - `perspective` caused it to someone else: gratification or remorse,
    ///   if it has a relation toward the affected agent
    /// - the affected agent caused it to itself: nothing
    fn causal_emotions(
        &mut self,
        affected: &str,
        causal: Option<&str>,
        perspective: AgentId,
        outcome: &GoalOutcome,
    ) -> usize {
        let Some(causal) = causal else {
            return 0;
        };
        let agent = &mut self.agents[perspective.0];
        let is_affected = agent.name() == affected;
        let is_causal = agent.name() == causal;

        let emotion = if is_affected && !is_causal {
            let emotion = appraisal::toward_causal_agent(outcome);
            let relation = agent.relation_or_insert(causal);
            emotion.inspect(|e| relation.add_emotion(*e))
        } else if !is_affected && is_causal {
            let Some(relation) = agent.relation_mut(affected) else {
                return 0;
            };
            let emotion = appraisal::toward_affected_agent(outcome, relation.like);
            emotion.inspect(|e| relation.add_emotion(*e))
        } else {
            None
        };

        match emotion {
            Some(emotion) => {
                trace!(agent = agent.name(), %emotion, "Causal emotion");
                agent.update_emotional_state(emotion);
                1
            }
            None => 0,
        }
    }

    // -----------------------------------------------------------------------
    // Decay
    // -----------------------------------------------------------------------

    /// Decay every agent by the wall-clock time since the previous tick.
    ///
    /// Returns the number of emotions that faded out.
    pub fn decay_all(&mut self) -> usize {
        let now = self.clock.now_millis();
        let elapsed = u64::try_from(now - self.last_tick_ms).unwrap_or(0);
        self.last_tick_ms = self.last_tick_ms.max(now);
        self.decay_elapsed(elapsed)
    }

    /// Decay every agent by an explicit interval, for hosts that keep their
    /// own game clock.
    ///
    /// Returns the number of emotions that faded out.
    pub fn decay_elapsed(&mut self, elapsed_ms: u64) -> usize {
        self.last_elapsed_ms = elapsed_ms;
        let settings = self.decay;
        let removed: usize = self
            .agents
            .iter_mut()
            .map(|agent| agent.decay(&settings, elapsed_ms))
            .sum();
        trace!(elapsed_ms, removed, "Decay pass");
        removed
    }

    /// Length of the most recent decay interval, in milliseconds.
    #[must_use]
    pub fn last_elapsed_ms(&self) -> u64 {
        self.last_elapsed_ms
    }

    // -----------------------------------------------------------------------
    // Inspection
    // -----------------------------------------------------------------------

    /// Read-only, serialisable view of the whole engine.
    #[must_use]
    pub fn snapshot(&self) -> EngineSnapshot {
        EngineSnapshot::capture(self)
    }

    fn log_snapshot(&self) {
        if !self.debug {
            return;
        }
        for agent in &self.agents {
            let emotions: Vec<String> = agent.emotions().iter().map(Emotion::to_string).collect();
            debug!(
                agent = agent.name(),
                emotions = ?emotions,
                pad = %agent.pad_state(false),
                "Emotional state"
            );
            for relation in agent.relations() {
                if relation.emotions().is_empty() {
                    continue;
                }
                let felt: Vec<String> = relation.emotions().iter().map(Emotion::to_string).collect();
                debug!(agent = agent.name(), toward = %relation.target, emotions = ?felt, "Sentiments");
            }
        }
    }
}

fn check_well_formed(belief: &Belief) -> Result<()> {
    if belief.is_well_formed() {
        return Ok(());
    }
    let goals = belief.affected_goals().len();
    let congruences = belief.congruences().len();
    warn!(goals, congruences, "Congruence list was not of the same length as the affected goal list");
    Err(AffectError::CongruenceLengthMismatch { goals, congruences })
}
