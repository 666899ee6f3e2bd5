//! Agent hyperparameters

use serde::{Deserialize, Serialize};

use qbot_core::{QbotError, Result};

/// Default number of planned training steps: 200 episodes x 20 games
pub const DEFAULT_TOTAL_PLANNED_STEPS: u64 = 200 * 20;

/// Initialization scheme for the hidden-layer weights
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HiddenInit {
    /// All hidden weights start at zero
    #[default]
    Zeros,
    /// Glorot-uniform, same as the output layer
    Xavier,
}

/// Hyperparameters for `QLearningAgent`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    pub learning_rate: f64,
    /// How much future reward is worth relative to immediate reward
    pub discount: f64,
    pub initial_exploration_rate: f64,
    /// Training steps across the whole run (episodes x games)
    pub total_planned_steps: u64,
    /// Overrides `1 / total_planned_steps` when set
    pub exploration_decay_per_step: Option<f64>,
    pub hidden_size: usize,
    pub hidden_init: HiddenInit,
    /// Seed for weight init and exploration; entropy-seeded when absent
    pub seed: Option<u64>,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            learning_rate: 0.5,
            discount: 0.95,
            initial_exploration_rate: 1.0,
            total_planned_steps: DEFAULT_TOTAL_PLANNED_STEPS,
            exploration_decay_per_step: None,
            hidden_size: 8,
            hidden_init: HiddenInit::Zeros,
            seed: None,
        }
    }
}

impl AgentConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Per-update decrement of the exploration rate
    pub fn exploration_delta(&self) -> f64 {
        self.exploration_decay_per_step
            .unwrap_or(1.0 / self.total_planned_steps as f64)
    }

    /// Check that every hyperparameter is in range
    pub fn validate(&self) -> Result<()> {
        if !(self.learning_rate.is_finite() && self.learning_rate > 0.0) {
            return Err(QbotError::Config(format!(
                "learning_rate must be positive, got {}",
                self.learning_rate
            )));
        }
        if !(0.0..=1.0).contains(&self.discount) {
            return Err(QbotError::Config(format!(
                "discount must be in [0, 1], got {}",
                self.discount
            )));
        }
        if !(0.0..=1.0).contains(&self.initial_exploration_rate) {
            return Err(QbotError::Config(format!(
                "initial_exploration_rate must be in [0, 1], got {}",
                self.initial_exploration_rate
            )));
        }
        if self.total_planned_steps == 0 && self.exploration_decay_per_step.is_none() {
            return Err(QbotError::Config(
                "total_planned_steps must be non-zero".to_string(),
            ));
        }
        if let Some(delta) = self.exploration_decay_per_step {
            if !(delta.is_finite() && delta >= 0.0) {
                return Err(QbotError::Config(format!(
                    "exploration_decay_per_step must be non-negative, got {delta}"
                )));
            }
        }
        if self.hidden_size == 0 {
            return Err(QbotError::Config("hidden_size must be non-zero".to_string()));
        }
        Ok(())
    }
}
