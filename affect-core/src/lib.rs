//! # Affect Core Library
//!
//! Synthetic emotions for non-player characters, driven by appraisal of
//! interpreted world events.
//!
//! Every character is an [`Agent`] with goals, relations toward other
//! agents, and an internal emotional state. The host feeds [`Belief`]s
//! (interpreted events) to an [`AppraisalEngine`], which turns them into:
//!
//! - **Internal emotions** — hope, fear, joy, distress, satisfaction,
//!   fear-confirmed, disappointment, relief (OCC model, Ortony et al. 1988)
//! - **Social emotions** — happy-for, resentment, pity, gloating, felt
//!   through relations toward the agent whose goal was affected
//! - **Causal emotions** — gratitude, anger, gratification, remorse, felt
//!   about who caused the event
//!
//! Emotions aggregate into a PAD mood vector (Mehrabian & Russell, 1974)
//! and decay back toward neutral on a host-driven tick.
//!
//! ## Usage
//!
//! ```
//! use affect_core::{AppraisalEngine, EmotionKind};
//!
//! let mut engine = AppraisalEngine::new();
//! engine.create_agent("villager")?;
//! engine.create_goal_for_agent("villager", "village destroyed", -0.9, false)?;
//!
//! engine.appraise_belief(0.6, Some("villager"), &["village destroyed"], &[1.0], false)?;
//!
//! let villager = engine.agent_by_name("villager").expect("registered");
//! assert!(villager.intensity_of(EmotionKind::Fear) > 0.0);
//! # Ok::<(), affect_core::AffectError>(())
//! ```

#![deny(clippy::unwrap_used)]
#![deny(missing_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod agent;
pub mod appraisal;
pub mod belief;
pub mod config;
pub mod decay;
pub mod emotion;
pub mod engine;
pub mod error;
pub mod gain;
pub mod goal;
pub mod relation;
pub mod snapshot;
pub mod types;

pub use agent::Agent;
pub use belief::Belief;
pub use config::AffectConfig;
pub use decay::{Clock, DecayFunction, DecaySettings, ManualClock, SystemClock};
pub use emotion::{Emotion, EmotionKind};
pub use engine::{AppraisalEngine, AppraisalReport};
pub use error::{AffectError, Result};
pub use goal::{Goal, LikelihoodSource};
pub use relation::Relation;
pub use snapshot::EngineSnapshot;
pub use types::*;
