//! # affect-host — Game-side integration for `affect-core`
//!
//! This crate sits between a game loop and the game-agnostic
//! `affect-core` engine.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │               Game loop                  │
//! │  ┌───────────────────────────────────┐  │
//! │  │          affect-host              │  │
//! │  │  ┌─────────────┐ ┌─────────────┐ │  │
//! │  │  │ Hooks/Events│ │   Systems   │ │  │
//! │  │  └──────┬──────┘ └──────┬──────┘ │  │
//! │  │         │               │         │  │
//! │  │         ▼               ▼         │  │
//! │  │    ┌─────────────────────────┐    │  │
//! │  │    │      affect-core        │    │  │
//! │  │    └─────────────────────────┘    │  │
//! │  └───────────────────────────────────┘  │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - `events` — world events and their translation into beliefs
//! - `hooks` — constructors the game's own systems call to raise events
//! - `systems` — per-frame event observation and decay
//! - `scheduler` — optional tokio task that decays a shared engine
//! - `report` — human-readable emotional state lines
//! - `config` — host tuning on top of `affect_core::AffectConfig`

#![deny(clippy::unwrap_used)]
#![deny(missing_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod events;
pub mod hooks;
pub mod report;
pub mod scheduler;
pub mod systems;
