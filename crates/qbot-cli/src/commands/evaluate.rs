//! Evaluate command

use anyhow::{Context, Result};
use clap::Args;
use tracing::info;

use super::{train_controller, RunOptions};
use crate::arena::Arena;
use crate::config::Settings;

#[derive(Args, Debug)]
pub struct EvaluateArgs {
    #[command(flatten)]
    pub run: RunOptions,

    /// Greedy games to play after training
    #[arg(long, default_value_t = 10)]
    pub eval_games: usize,
}

pub fn run(mut settings: Settings, args: &EvaluateArgs) -> Result<()> {
    args.run.apply(&mut settings);

    let (mut controller, mut rng) = train_controller(&settings)?;
    controller.agent_mut().set_exploration_rate(0.0);

    let training = &settings.training;
    let mut total_reward = 0.0;
    let mut cleared = 0;

    for game in 0..args.eval_games {
        let mut arena = Arena::random(training.arena_size, training.enemies, &mut rng);
        let summary = controller
            .play_greedy(&mut arena, training.ticks_per_game)
            .context("Evaluation game aborted")?;

        if arena.enemies_left() == 0 {
            cleared += 1;
        }
        total_reward += summary.total_reward;
        info!(game, reward = summary.total_reward, "Evaluation game finished");
    }

    let games = args.eval_games.max(1) as f64;
    println!("Evaluation");
    println!("==========\n");
    println!("  games:          {}", args.eval_games);
    println!("  arenas cleared: {cleared}");
    println!("  average reward: {:.4}", total_reward / games);

    Ok(())
}
