//! State and Reward types for the learning agent

use serde::{Deserialize, Serialize};

use crate::error::{QbotError, Result};

/// Reward value from the environment
pub type Reward = f64;

/// Number of players a state can describe
pub const MAX_PLAYERS: usize = 5;

/// Encoded features per player
pub const FEATURES_PER_PLAYER: usize = 2;

/// Length of every state vector
pub const STATE_DIM: usize = MAX_PLAYERS * FEATURES_PER_PLAYER;

/// Position of another player relative to the controlled character,
/// in the character's facing frame and normalized by the caller
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerFeatures {
    /// Offset along the facing direction; positive is ahead
    pub forward: f64,
    /// Offset across the facing direction; positive is to the right
    pub lateral: f64,
}

/// Fixed-length state snapshot fed to the Q-network
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct State {
    features: Vec<f64>,
}

impl State {
    /// Build a state from exactly `STATE_DIM` values
    pub fn new(features: Vec<f64>) -> Result<Self> {
        if features.len() != STATE_DIM {
            return Err(QbotError::dimension(STATE_DIM, features.len()));
        }
        Ok(Self { features })
    }

    /// All-zero state
    pub fn zeros() -> Self {
        Self {
            features: vec![0.0; STATE_DIM],
        }
    }

    /// Encode up to `MAX_PLAYERS` observations, zero-padding the rest
    pub fn from_players(players: &[PlayerFeatures]) -> Result<Self> {
        if players.len() > MAX_PLAYERS {
            return Err(QbotError::dimension(MAX_PLAYERS, players.len()));
        }

        let mut features = Vec::with_capacity(STATE_DIM);
        for player in players {
            features.push(player.forward);
            features.push(player.lateral);
        }
        features.resize(STATE_DIM, 0.0);

        Ok(Self { features })
    }

    /// Feature vector for the neural network
    pub fn as_slice(&self) -> &[f64] {
        &self.features
    }

    /// State dimension
    pub fn dimension(&self) -> usize {
        self.features.len()
    }
}

impl TryFrom<&[f64]> for State {
    type Error = QbotError;

    fn try_from(values: &[f64]) -> Result<Self> {
        State::new(values.to_vec())
    }
}

impl TryFrom<Vec<f64>> for State {
    type Error = QbotError;

    fn try_from(values: Vec<f64>) -> Result<Self> {
        State::new(values)
    }
}

impl From<State> for Vec<f64> {
    fn from(state: State) -> Self {
        state.features
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_rejects_wrong_length() {
        assert_eq!(
            State::new(vec![0.0; 9]),
            Err(QbotError::InvalidInput {
                expected: 10,
                actual: 9
            })
        );
        assert!(State::new(vec![0.0; 11]).is_err());
        assert!(State::new(vec![0.0; 10]).is_ok());
    }

    #[test]
    fn test_from_players_pads_with_zeros() {
        let state = State::from_players(&[
            PlayerFeatures {
                forward: 0.5,
                lateral: 1.0,
            },
            PlayerFeatures {
                forward: 0.25,
                lateral: -0.75,
            },
        ])
        .unwrap();

        assert_eq!(state.dimension(), STATE_DIM);
        assert_eq!(&state.as_slice()[..4], &[0.5, 1.0, 0.25, -0.75]);
        assert!(state.as_slice()[4..].iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_from_players_rejects_too_many() {
        let players = vec![
            PlayerFeatures {
                forward: 0.0,
                lateral: 1.0,
            };
            MAX_PLAYERS + 1
        ];
        assert!(State::from_players(&players).is_err());
    }

    #[test]
    fn test_state_serialization() {
        let state = State::new((0..10).map(f64::from).collect()).unwrap();
        let json = serde_json::to_string(&state).unwrap();
        let parsed: State = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, state);
    }

    #[test]
    fn test_deserialize_checks_length() {
        let result: std::result::Result<State, _> = serde_json::from_str("[1.0, 2.0]");
        assert!(result.is_err());
    }
}
