//! qbot CLI - Train and evaluate the Q-learning agent
//!
//! Runs the agent against the built-in arena. Library users embed
//! `qbot_rl::Controller` in their own game loop instead.

// Clippy pedantic allows - these are intentional design choices
#![allow(clippy::doc_markdown)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_possible_wrap)]

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod arena;
mod commands;
mod config;

use commands::{evaluate, train};
use crate::config::Settings;

#[derive(Parser)]
#[command(name = "qbot")]
#[command(author, version, about = "qbot - online Q-learning game agent", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to a TOML configuration file
    #[arg(short, long, global = true, env = "QBOT_CONFIG")]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Train the agent in the arena
    Train(train::TrainArgs),

    /// Train, then play greedily and report the average reward
    Evaluate(evaluate::EvaluateArgs),

    /// Print the effective configuration
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let settings = Settings::load(cli.config.as_deref())?;

    let level = if cli.verbose {
        "debug"
    } else {
        settings.log_level.as_str()
    };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("qbot={level},qbot_rl={level}").into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    match cli.command {
        Commands::Train(args) => train::run(settings, &args),
        Commands::Evaluate(args) => evaluate::run(settings, &args),
        Commands::Config => commands::config::show(&settings),
    }
}
