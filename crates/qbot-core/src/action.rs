//! Discrete actions available to the controlled character

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{QbotError, Result};

/// Action in the game environment
///
/// The discriminant order matches the output neuron order of the Q-network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    DoNothing,
    TurnLeft,
    TurnRight,
    StepForward,
    Attack,
}

impl Action {
    /// Number of discrete actions
    pub const SPACE_SIZE: usize = 5;

    /// Every action, in index order
    pub const ALL: [Action; Action::SPACE_SIZE] = [
        Action::DoNothing,
        Action::TurnLeft,
        Action::TurnRight,
        Action::StepForward,
        Action::Attack,
    ];

    /// Convert action to its output-neuron index
    pub fn to_index(self) -> usize {
        match self {
            Action::DoNothing => 0,
            Action::TurnLeft => 1,
            Action::TurnRight => 2,
            Action::StepForward => 3,
            Action::Attack => 4,
        }
    }

    /// Create action from an output-neuron index
    pub fn from_index(index: usize) -> Result<Self> {
        Action::ALL
            .get(index)
            .copied()
            .ok_or(QbotError::InvalidIndex {
                index,
                size: Action::SPACE_SIZE,
            })
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::DoNothing => write!(f, "do_nothing"),
            Action::TurnLeft => write!(f, "turn_left"),
            Action::TurnRight => write!(f, "turn_right"),
            Action::StepForward => write!(f, "step_forward"),
            Action::Attack => write!(f, "attack"),
        }
    }
}
