//! Online Q-learning agent
//!
//! Owns the Q-network and the exploration schedule. The caller drives it one
//! game tick at a time: `select_action`, act in the game, then `update`.

use ndarray::Array1;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use tracing::{debug, info};

use qbot_core::{Action, QbotError, Result, Reward, State, STATE_DIM};

use crate::config::AgentConfig;
use crate::network::QNetwork;
use crate::policy::{self, EpsilonGreedy};

fn build_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Result of a single TD update
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct UpdateOutcome {
    /// Loss before the gradient step
    pub loss: f64,
    /// `reward + discount * max(Q(new_state))`
    pub td_target: f64,
    /// Exploration rate after decay
    pub exploration_rate: f64,
}

/// Agent statistics
#[derive(Debug, Clone, Serialize)]
pub struct AgentStats {
    pub total_updates: u64,
    pub total_reward: f64,
    pub average_reward: f64,
    pub exploration_rate: f64,
    pub last_loss: Option<f64>,
}

/// Q-learning agent with a feed-forward function approximator
#[derive(Debug)]
pub struct QLearningAgent {
    network: QNetwork,
    exploration: EpsilonGreedy,
    config: AgentConfig,
    rng: StdRng,
    total_updates: u64,
    total_reward: f64,
    last_loss: Option<f64>,
}

impl QLearningAgent {
    /// Create a ready agent; fails if the configuration is out of range
    pub fn new(config: AgentConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: AgentConfig) -> Self {
        let mut rng = build_rng(config.seed);

        let mut network = QNetwork::new(STATE_DIM, config.hidden_size, Action::SPACE_SIZE);
        network.initialize(&mut rng, config.hidden_init);

        let exploration =
            EpsilonGreedy::new(config.initial_exploration_rate, config.exploration_delta());

        info!(
            learning_rate = config.learning_rate,
            discount = config.discount,
            exploration_rate = exploration.rate(),
            exploration_delta = exploration.delta(),
            hidden_init = ?config.hidden_init,
            parameters = network.parameter_count(),
            "Q-learning agent ready"
        );

        Self {
            network,
            exploration,
            config,
            rng,
            total_updates: 0,
            total_reward: 0.0,
            last_loss: None,
        }
    }

    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    pub fn exploration_rate(&self) -> f64 {
        self.exploration.rate()
    }

    pub fn exploration_delta(&self) -> f64 {
        self.exploration.delta()
    }

    /// Override the exploration rate, e.g. 0 for pure exploitation
    pub fn set_exploration_rate(&mut self, rate: f64) {
        self.exploration.set_rate(rate);
    }

    /// Q-values for every action in `state`
    pub fn evaluate(&self, state: &State) -> Result<Array1<f64>> {
        self.network.evaluate(state.as_slice())
    }

    /// Action with the highest Q-value; ties go to the lowest index
    pub fn greedy_action(&self, state: &State) -> Result<Action> {
        let q_values = self.evaluate(state)?;
        Action::from_index(policy::argmax(&q_values))
    }

    /// Epsilon-greedy action selection
    pub fn select_action(&mut self, state: &State) -> Result<Action> {
        if self.exploration.should_explore(&mut self.rng) {
            Ok(policy::random_action(&mut self.rng))
        } else {
            self.greedy_action(state)
        }
    }

    /// One-step Q-learning update followed by exploration decay
    pub fn update(
        &mut self,
        old_state: &State,
        action_index: usize,
        reward: Reward,
        new_state: &State,
    ) -> Result<UpdateOutcome> {
        if action_index >= Action::SPACE_SIZE {
            return Err(QbotError::InvalidIndex {
                index: action_index,
                size: Action::SPACE_SIZE,
            });
        }

        let mut target = self.evaluate(old_state)?;
        let q_new = self.evaluate(new_state)?;

        let max_next = q_new.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let td_target = reward + self.config.discount * max_next;
        target[action_index] = td_target;

        let loss = self.network.fit_step(
            old_state.as_slice(),
            &target.to_vec(),
            self.config.learning_rate,
        )?;

        let was_exhausted = self.exploration.is_exhausted();
        let exploration_rate = self.exploration.decay();
        if !was_exhausted && self.exploration.is_exhausted() {
            info!(
                updates = self.total_updates + 1,
                "Exploration exhausted, acting greedily from now on"
            );
        }

        self.total_updates += 1;
        self.total_reward += reward;
        self.last_loss = Some(loss);

        debug!(
            action = action_index,
            reward, loss, td_target, exploration_rate, "TD update"
        );

        Ok(UpdateOutcome {
            loss,
            td_target,
            exploration_rate,
        })
    }

    /// `update` with a typed action
    pub fn update_action(
        &mut self,
        old_state: &State,
        action: Action,
        reward: Reward,
        new_state: &State,
    ) -> Result<UpdateOutcome> {
        self.update(old_state, action.to_index(), reward, new_state)
    }

    /// Get statistics
    pub fn stats(&self) -> AgentStats {
        AgentStats {
            total_updates: self.total_updates,
            total_reward: self.total_reward,
            average_reward: if self.total_updates > 0 {
                self.total_reward / self.total_updates as f64
            } else {
                0.0
            },
            exploration_rate: self.exploration.rate(),
            last_loss: self.last_loss,
        }
    }

    /// Get agent parameters as JSON
    pub fn params(&self) -> serde_json::Value {
        serde_json::json!({
            "learning_rate": self.config.learning_rate,
            "discount": self.config.discount,
            "exploration_rate": self.exploration.rate(),
            "exploration_delta": self.exploration.delta(),
            "hidden_size": self.config.hidden_size,
            "hidden_init": self.config.hidden_init,
            "parameter_count": self.network.parameter_count(),
        })
    }
}

impl Default for QLearningAgent {
    fn default() -> Self {
        Self::build(AgentConfig::default())
    }
}
