//! CLI commands

pub mod config;
pub mod evaluate;
pub mod train;

use anyhow::{Context, Result};
use clap::Args;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

use qbot_rl::{Controller, QLearningAgent};

use crate::arena::Arena;
use crate::config::Settings;

/// Options shared by every command that trains
#[derive(Args, Debug, Clone, Default)]
pub struct RunOptions {
    /// Number of games to train on
    #[arg(long)]
    pub games: Option<usize>,

    /// Tick limit per game
    #[arg(long)]
    pub ticks: Option<usize>,

    /// Seed for the agent and the arena layout
    #[arg(long)]
    pub seed: Option<u64>,
}

impl RunOptions {
    /// Apply command-line overrides. Changing the run length also re-derives
    /// the exploration schedule so it ends with the run.
    pub fn apply(&self, settings: &mut Settings) {
        if let Some(games) = self.games {
            settings.training.games = games;
        }
        if let Some(ticks) = self.ticks {
            settings.training.ticks_per_game = ticks;
        }
        if self.games.is_some() || self.ticks.is_some() {
            settings.agent.total_planned_steps = settings.training.planned_steps().max(1);
        }
        if let Some(seed) = self.seed {
            settings.agent.seed = Some(seed);
        }
    }
}

fn arena_rng(settings: &Settings) -> StdRng {
    match settings.agent.seed {
        Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(1)),
        None => StdRng::from_entropy(),
    }
}

/// Build an agent and train it on `settings.training.games` arena games
pub fn train_controller(settings: &Settings) -> Result<(Controller, StdRng)> {
    let agent =
        QLearningAgent::new(settings.agent.clone()).context("Invalid agent configuration")?;
    let mut controller = Controller::new(agent);
    let mut rng = arena_rng(settings);

    let training = &settings.training;
    info!(
        games = training.games,
        ticks_per_game = training.ticks_per_game,
        arena_size = training.arena_size,
        enemies = training.enemies,
        "Starting training"
    );

    for _ in 0..training.games {
        let mut arena = Arena::random(training.arena_size, training.enemies, &mut rng);
        controller
            .run_game(&mut arena, training.ticks_per_game)
            .context("Training game aborted")?;
    }

    Ok((controller, rng))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_settings() -> Settings {
        let mut settings = Settings::default();
        RunOptions {
            games: Some(3),
            ticks: Some(15),
            seed: Some(8),
        }
        .apply(&mut settings);
        settings.agent.learning_rate = 0.05;
        settings
    }

    #[test]
    fn test_overrides_rederive_schedule() {
        let settings = small_settings();
        assert_eq!(settings.training.games, 3);
        assert_eq!(settings.training.ticks_per_game, 15);
        assert_eq!(settings.agent.total_planned_steps, 45);
        assert_eq!(settings.agent.seed, Some(8));
    }

    #[test]
    fn test_seed_only_keeps_schedule() {
        let mut settings = Settings::default();
        let planned = settings.agent.total_planned_steps;
        RunOptions {
            seed: Some(1),
            ..RunOptions::default()
        }
        .apply(&mut settings);
        assert_eq!(settings.agent.total_planned_steps, planned);
    }

    #[test]
    fn test_train_controller_plays_every_game() {
        let settings = small_settings();
        let (controller, _) = train_controller(&settings).unwrap();
        assert_eq!(controller.games_played(), 3);
        assert!(controller.agent().stats().total_updates <= 45);
    }

    #[test]
    fn test_invalid_agent_config_is_reported() {
        let mut settings = small_settings();
        settings.agent.discount = 3.0;
        let err = train_controller(&settings).unwrap_err();
        assert!(err.to_string().contains("Invalid agent configuration"));
    }
}
