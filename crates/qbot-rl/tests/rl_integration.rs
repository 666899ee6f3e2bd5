//! Integration tests for the Q-learning agent
//!
//! These tests verify selection, TD updates and the control loop together.

#![allow(clippy::cast_precision_loss)]
#![allow(clippy::float_cmp)]

use qbot_core::{Action, PlayerFeatures, QbotError, Result, Reward, State, STATE_DIM};
use qbot_rl::{AgentConfig, Controller, Game, HiddenInit, QLearningAgent};

fn create_agent(seed: u64) -> QLearningAgent {
    QLearningAgent::new(AgentConfig::default().with_seed(seed)).unwrap()
}

fn create_test_state(distance: f64) -> State {
    State::from_players(&[
        PlayerFeatures {
            forward: distance,
            lateral: 0.0,
        },
        PlayerFeatures {
            forward: -distance,
            lateral: distance * 2.0,
        },
    ])
    .unwrap()
}

/// Fresh agent, zero state, action 2, reward 1.0
#[test]
fn test_zero_state_scenario() {
    let mut agent = create_agent(2024);
    let zero = State::zeros();

    let q_before = agent.evaluate(&zero).unwrap();
    let max_q = q_before.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let target = 1.0 + 0.95 * max_q;

    agent.update(&zero, 2, 1.0, &zero).unwrap();

    let q_after = agent.evaluate(&zero).unwrap();
    assert!(
        (q_after[2] - target).abs() < (q_before[2] - target).abs(),
        "Q[2] should move toward {target}: {} -> {}",
        q_before[2],
        q_after[2]
    );
}

#[test]
fn test_full_exploration_is_roughly_uniform() {
    let mut agent = create_agent(7);
    let state = create_test_state(0.4);
    let draws = 5000;

    let mut counts = [0usize; Action::SPACE_SIZE];
    for _ in 0..draws {
        counts[agent.select_action(&state).unwrap().to_index()] += 1;
    }

    let expected = draws / Action::SPACE_SIZE;
    for (i, &count) in counts.iter().enumerate() {
        assert!(
            count.abs_diff(expected) < expected / 5,
            "action {i} drawn {count} times, expected about {expected}"
        );
    }
}

#[test]
fn test_exploration_reaches_zero_after_planned_steps() {
    let mut agent = QLearningAgent::new(AgentConfig {
        learning_rate: 0.05,
        total_planned_steps: 50,
        ..AgentConfig::default().with_seed(3)
    })
    .unwrap();
    let state = create_test_state(0.2);

    for i in 0..120 {
        let action = i % Action::SPACE_SIZE;
        agent.update(&state, action, 0.1, &state).unwrap();
    }

    assert_eq!(agent.exploration_rate(), 0.0);
    assert_eq!(agent.stats().total_updates, 120);
}

#[test]
fn test_invalid_inputs_fail_fast() {
    let mut agent = create_agent(1);
    let state = create_test_state(0.1);

    assert!(matches!(
        agent.update(&state, 9, 1.0, &state),
        Err(QbotError::InvalidIndex { index: 9, size: 5 })
    ));
    assert!(matches!(
        State::new(vec![0.0; STATE_DIM + 1]),
        Err(QbotError::InvalidInput { .. })
    ));
}

#[test]
fn test_xavier_hidden_layers_learn() {
    let mut agent = QLearningAgent::new(AgentConfig {
        learning_rate: 0.1,
        hidden_init: HiddenInit::Xavier,
        ..AgentConfig::default().with_seed(99)
    })
    .unwrap();
    let state = create_test_state(0.3);

    for _ in 0..50 {
        let outcome = agent.update(&state, 4, 1.0, &state).unwrap();
        assert!(outcome.loss.is_finite());
    }
    assert!(agent.evaluate(&state).unwrap().iter().all(|q| q.is_finite()));
}

/// One-dimensional duel: reward for attacking when the enemy is adjacent
struct Corridor {
    distance: usize,
    ticks_left: usize,
}

impl Game for Corridor {
    fn observe(&self) -> State {
        create_test_state(self.distance as f64 / 5.0)
    }

    fn apply(&mut self, action: Action) -> Result<Reward> {
        self.ticks_left -= 1;
        match action {
            Action::StepForward if self.distance > 1 => {
                self.distance -= 1;
                Ok(0.0)
            }
            Action::Attack if self.distance == 1 => Ok(1.0),
            _ => Ok(-0.05),
        }
    }

    fn is_over(&self) -> bool {
        self.ticks_left == 0
    }
}

#[test]
fn test_controller_trains_across_games() {
    let agent = QLearningAgent::new(AgentConfig {
        learning_rate: 0.1,
        total_planned_steps: 300,
        ..AgentConfig::default().with_seed(17)
    })
    .unwrap();
    let mut controller = Controller::new(agent);

    for _ in 0..20 {
        let mut game = Corridor {
            distance: 4,
            ticks_left: 20,
        };
        let summary = controller.run_game(&mut game, 100).unwrap();
        assert_eq!(summary.ticks, 20);
    }

    let agent = controller.into_agent();
    assert_eq!(agent.stats().total_updates, 400);
    assert_eq!(agent.exploration_rate(), 0.0);
}
