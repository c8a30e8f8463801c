//! Error types for the affect core library.

use thiserror::Error;

/// Top-level error type for all appraisal-engine operations.
///
/// None of these are fatal: the engine stays usable after any of them and
/// the rejected operation leaves prior state untouched.
#[derive(Error, Debug)]
pub enum AffectError {
    /// Gain outside the accepted `(0, 20]` range.
    #[error("Gain factor must be in (0, 20], got {0}")]
    InvalidGain(f64),

    /// Decay factor that the selected decay function cannot use.
    #[error("Invalid decay factor {factor} for {function} decay")]
    InvalidDecayFactor {
        /// The rejected factor.
        factor: f64,
        /// Name of the decay function it was meant for.
        function: &'static str,
    },

    /// Relation `like` value outside `[-1, 1]`.
    #[error("Relation like value must be in [-1, 1], got {0}")]
    InvalidLike(f64),

    /// No agent registered under this name.
    #[error("Agent not found: {0}")]
    AgentNotFound(String),

    /// No goal registered under this name.
    #[error("Goal not found: {0}")]
    GoalNotFound(String),

    /// An agent with this name is already registered.
    #[error("Agent already registered: {0}")]
    DuplicateAgent(String),

    /// A goal with this name is already registered.
    #[error("Goal already registered: {0}")]
    DuplicateGoal(String),

    /// Belief goal list and congruence list differ in length.
    #[error("Belief has {goals} affected goals but {congruences} congruences")]
    CongruenceLengthMismatch {
        /// Number of affected goal names.
        goals: usize,
        /// Number of congruence values.
        congruences: usize,
    },

    /// Global appraisal was requested before any goal was registered.
    #[error("No goals registered, nothing to appraise")]
    NoGoalsRegistered,

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience Result type alias.
pub type Result<T> = std::result::Result<T, AffectError>;
