//! Process-wide agent accessor
//!
//! For callers that cannot thread an agent through their control loop. New
//! code should own a `QLearningAgent` (or a `Controller`) directly.

use std::sync::{Mutex, OnceLock};

use qbot_core::{QbotError, Result};

use crate::agent::QLearningAgent;
use crate::config::AgentConfig;

static AGENT: OnceLock<Mutex<QLearningAgent>> = OnceLock::new();

/// Return the shared agent, creating it with default settings on first call
pub fn get_agent() -> &'static Mutex<QLearningAgent> {
    AGENT.get_or_init(|| Mutex::new(QLearningAgent::default()))
}

/// Install the shared agent with `config`; fails once an agent exists
pub fn init_agent(config: AgentConfig) -> Result<&'static Mutex<QLearningAgent>> {
    let agent = QLearningAgent::new(config)?;
    AGENT
        .set(Mutex::new(agent))
        .map_err(|_| QbotError::Config("shared agent is already initialized".to_string()))?;
    Ok(get_agent())
}

pub fn is_initialized() -> bool {
    AGENT.get().is_some()
}
