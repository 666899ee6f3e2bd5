//! Epsilon-greedy exploration with linear decay

use ndarray::Array1;
use rand::Rng;

use qbot_core::Action;

/// Index of the largest value; ties go to the lowest index
pub fn argmax(values: &Array1<f64>) -> usize {
    let mut best = 0;
    for (i, &v) in values.iter().enumerate().skip(1) {
        if v > values[best] {
            best = i;
        }
    }
    best
}

/// Uniformly random action from the fixed action set
pub fn random_action<R: Rng>(rng: &mut R) -> Action {
    Action::ALL[rng.gen_range(0..Action::SPACE_SIZE)]
}

/// Exploration schedule: the rate drops by `delta` per update and stops at 0
#[derive(Debug, Clone, PartialEq)]
pub struct EpsilonGreedy {
    rate: f64,
    delta: f64,
}

impl EpsilonGreedy {
    pub fn new(initial_rate: f64, delta: f64) -> Self {
        Self {
            rate: initial_rate.clamp(0.0, 1.0),
            delta,
        }
    }

    pub fn rate(&self) -> f64 {
        self.rate
    }

    pub fn delta(&self) -> f64 {
        self.delta
    }

    /// Force the rate; values outside [0, 1] are clamped
    pub fn set_rate(&mut self, rate: f64) {
        self.rate = rate.clamp(0.0, 1.0);
    }

    /// Draw r in [0, 1) and explore when r < rate
    pub fn should_explore<R: Rng>(&self, rng: &mut R) -> bool {
        rng.gen::<f64>() < self.rate
    }

    /// Apply one step of decay and return the new rate
    pub fn decay(&mut self) -> f64 {
        self.rate = (self.rate - self.delta).max(0.0);
        self.rate
    }

    pub fn is_exhausted(&self) -> bool {
        self.rate <= 0.0
    }
}
