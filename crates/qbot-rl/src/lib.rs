//! qbot RL - Online Q-learning for a game-playing controller
//!
//! This crate provides a small feed-forward Q-network, epsilon-greedy action
//! selection with linear exploration decay, and the one-step TD update that
//! trains the network while the game is being played.

// Clippy pedantic allows - these are intentional design choices
#![allow(clippy::doc_markdown)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::float_cmp)]
#![allow(clippy::module_name_repetitions)]

pub mod agent;
pub mod config;
pub mod controller;
pub mod network;
pub mod policy;
pub mod shared;

pub use agent::{AgentStats, QLearningAgent, UpdateOutcome};
pub use config::{AgentConfig, HiddenInit};
pub use controller::{Controller, Game, GameSummary, TickOutcome};
pub use network::QNetwork;
pub use shared::get_agent;
