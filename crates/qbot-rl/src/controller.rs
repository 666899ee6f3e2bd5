//! Game-control loop driving a `QLearningAgent`
//!
//! The controller owns its agent. The agent keeps learning across every game
//! the controller plays; only per-game counters are reset between games.

use serde::Serialize;
use tracing::{debug, info};

use qbot_core::{Action, Result, Reward, State};

use crate::agent::QLearningAgent;

/// A game the controller can act in
pub trait Game {
    /// Encode the current game state for the agent
    fn observe(&self) -> State;

    /// Execute an action and return the reward it earned
    fn apply(&mut self, action: Action) -> Result<Reward>;

    /// Whether the game has finished
    fn is_over(&self) -> bool;
}

/// What happened during one tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TickOutcome {
    pub action: Action,
    pub reward: Reward,
}

/// Summary of a finished game
#[derive(Debug, Clone, Serialize)]
pub struct GameSummary {
    pub ticks: usize,
    pub total_reward: Reward,
    pub exploration_rate: f64,
}

/// Owns an agent and runs the select -> act -> update loop
#[derive(Debug)]
pub struct Controller {
    agent: QLearningAgent,
    games_played: u64,
}

impl Controller {
    pub fn new(agent: QLearningAgent) -> Self {
        Self {
            agent,
            games_played: 0,
        }
    }

    pub fn agent(&self) -> &QLearningAgent {
        &self.agent
    }

    pub fn agent_mut(&mut self) -> &mut QLearningAgent {
        &mut self.agent
    }

    pub fn into_agent(self) -> QLearningAgent {
        self.agent
    }

    pub fn games_played(&self) -> u64 {
        self.games_played
    }

    /// One learning tick: observe, select, act, observe, update
    pub fn tick<G: Game>(&mut self, game: &mut G) -> Result<TickOutcome> {
        let old_state = game.observe();
        let action = self.agent.select_action(&old_state)?;
        let reward = game.apply(action)?;
        let new_state = game.observe();

        self.agent
            .update_action(&old_state, action, reward, &new_state)?;

        Ok(TickOutcome { action, reward })
    }

    /// Learn from a full game, stopping early after `max_ticks`
    pub fn run_game<G: Game>(&mut self, game: &mut G, max_ticks: usize) -> Result<GameSummary> {
        let mut ticks = 0;
        let mut total_reward = 0.0;

        while ticks < max_ticks && !game.is_over() {
            let outcome = self.tick(game)?;
            total_reward += outcome.reward;
            ticks += 1;
        }

        self.games_played += 1;
        let summary = GameSummary {
            ticks,
            total_reward,
            exploration_rate: self.agent.exploration_rate(),
        };
        info!(
            game = self.games_played,
            ticks,
            total_reward,
            exploration_rate = summary.exploration_rate,
            "Game finished"
        );

        Ok(summary)
    }

    /// Play a game with greedy actions and no learning
    pub fn play_greedy<G: Game>(&self, game: &mut G, max_ticks: usize) -> Result<GameSummary> {
        let mut ticks = 0;
        let mut total_reward = 0.0;

        while ticks < max_ticks && !game.is_over() {
            let action = self.agent.greedy_action(&game.observe())?;
            total_reward += game.apply(action)?;
            ticks += 1;
        }

        debug!(ticks, total_reward, "Greedy game finished");

        Ok(GameSummary {
            ticks,
            total_reward,
            exploration_rate: self.agent.exploration_rate(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AgentConfig;
    use qbot_core::{QbotError, STATE_DIM};

    /// Rewards `Attack`, ends after a fixed number of moves
    struct Countdown {
        remaining: usize,
        attacks: usize,
    }

    impl Game for Countdown {
        fn observe(&self) -> State {
            let mut features = vec![0.0; STATE_DIM];
            features[0] = self.remaining as f64 / 10.0;
            State::new(features).unwrap()
        }

        fn apply(&mut self, action: Action) -> Result<Reward> {
            self.remaining = self.remaining.saturating_sub(1);
            if action == Action::Attack {
                self.attacks += 1;
                Ok(1.0)
            } else {
                Ok(0.0)
            }
        }

        fn is_over(&self) -> bool {
            self.remaining == 0
        }
    }

    struct Broken;

    impl Game for Broken {
        fn observe(&self) -> State {
            State::zeros()
        }

        fn apply(&mut self, _: Action) -> Result<Reward> {
            Err(QbotError::Config("engine unavailable".to_string()))
        }

        fn is_over(&self) -> bool {
            false
        }
    }

    fn controller() -> Controller {
        Controller::new(QLearningAgent::new(AgentConfig::default().with_seed(11)).unwrap())
    }

    #[test]
    fn test_tick_updates_agent() {
        let mut controller = controller();
        let mut game = Countdown {
            remaining: 5,
            attacks: 0,
        };

        let outcome = controller.tick(&mut game).unwrap();
        assert_eq!(controller.agent().stats().total_updates, 1);
        assert_eq!(
            outcome.reward,
            if outcome.action == Action::Attack { 1.0 } else { 0.0 }
        );
    }

    #[test]
    fn test_run_game_stops_when_over() {
        let mut controller = controller();
        let mut game = Countdown {
            remaining: 6,
            attacks: 0,
        };

        let summary = controller.run_game(&mut game, 100).unwrap();
        assert_eq!(summary.ticks, 6);
        assert_eq!(summary.total_reward, game.attacks as f64);
        assert_eq!(controller.games_played(), 1);
    }

    #[test]
    fn test_run_game_respects_tick_limit() {
        let mut controller = controller();
        let mut game = Countdown {
            remaining: 50,
            attacks: 0,
        };

        let summary = controller.run_game(&mut game, 10).unwrap();
        assert_eq!(summary.ticks, 10);
        assert_eq!(controller.agent().stats().total_updates, 10);
    }

    #[test]
    fn test_game_errors_abort_the_tick() {
        let mut controller = controller();
        assert!(controller.tick(&mut Broken).is_err());
        assert_eq!(controller.agent().stats().total_updates, 0);
        assert_eq!(controller.agent().exploration_rate(), 1.0);
    }

    #[test]
    fn test_play_greedy_does_not_learn() {
        let controller = controller();
        let mut game = Countdown {
            remaining: 4,
            attacks: 0,
        };

        let summary = controller.play_greedy(&mut game, 100).unwrap();
        assert_eq!(summary.ticks, 4);
        assert_eq!(controller.agent().stats().total_updates, 0);
    }
}
