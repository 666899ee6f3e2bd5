//! qbot Core - State, action, and error types
//!
//! This crate provides the foundational types shared by the learning agent
//! and the game-control loop that drives it.

// Clippy pedantic allows - these are intentional design choices
#![allow(clippy::doc_markdown)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::module_name_repetitions)]

pub mod action;
pub mod error;
pub mod state;

pub use action::Action;
pub use error::{QbotError, Result};
pub use state::{PlayerFeatures, Reward, State, MAX_PLAYERS, STATE_DIM};
