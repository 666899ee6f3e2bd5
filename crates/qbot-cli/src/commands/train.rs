//! Train command

use anyhow::Result;
use clap::Args;

use super::{train_controller, RunOptions};
use crate::config::Settings;

#[derive(Args, Debug)]
pub struct TrainArgs {
    #[command(flatten)]
    pub run: RunOptions,

    /// Print final statistics as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(mut settings: Settings, args: &TrainArgs) -> Result<()> {
    args.run.apply(&mut settings);

    let (controller, _) = train_controller(&settings)?;
    let stats = controller.agent().stats();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    println!("Training complete");
    println!("=================\n");
    println!("  games played:     {}", controller.games_played());
    println!("  updates:          {}", stats.total_updates);
    println!("  total reward:     {:.3}", stats.total_reward);
    println!("  average reward:   {:.4}", stats.average_reward);
    println!("  exploration rate: {:.4}", stats.exploration_rate);
    if let Some(loss) = stats.last_loss {
        println!("  last loss:        {loss:.6}");
    }

    Ok(())
}
