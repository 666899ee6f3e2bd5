//! Configuration loading for the qbot CLI

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use config::{ConfigBuilder, Environment, File};
use serde::{Deserialize, Serialize};

use qbot_rl::AgentConfig;

/// Configuration for a training run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub log_level: String,
    pub agent: AgentConfig,
    pub training: TrainingConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            agent: AgentConfig::default(),
            training: TrainingConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingConfig {
    pub games: usize,
    pub ticks_per_game: usize,
    pub arena_size: i32,
    pub enemies: usize,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            games: 20,
            ticks_per_game: 200,
            arena_size: 7,
            enemies: 2,
        }
    }
}

impl TrainingConfig {
    /// Upper bound on learning steps for the whole run
    pub fn planned_steps(&self) -> u64 {
        (self.games * self.ticks_per_game) as u64
    }
}

impl Settings {
    /// Load configuration from file and environment
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let mut builder = ConfigBuilder::<config::builder::DefaultState>::default();

        if let Some(path) = explicit {
            tracing::info!("Loading config from: {:?}", path);
            builder = builder.add_source(File::from(path.to_path_buf()).required(true));
        } else if let Some(path) = Self::find_config_file() {
            tracing::info!("Loading config from: {:?}", path);
            builder = builder.add_source(File::from(path).required(false));
        } else {
            tracing::info!("No config file found, using defaults");
        }

        // Add environment variables, e.g. QBOT__AGENT__LEARNING_RATE
        builder = builder.add_source(
            Environment::with_prefix("QBOT")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }

    /// Find the configuration file
    fn find_config_file() -> Option<PathBuf> {
        // Check in order: QBOT_CONFIG env, ./qbot.toml, ~/.config/qbot/qbot.toml
        if let Ok(path) = std::env::var("QBOT_CONFIG") {
            let path = PathBuf::from(path);
            if path.exists() {
                return Some(path);
            }
        }

        let local = PathBuf::from("qbot.toml");
        if local.exists() {
            return Some(local);
        }

        if let Some(home) = dirs::home_dir() {
            let user_config = home.join(".config").join("qbot").join("qbot.toml");
            if user_config.exists() {
                return Some(user_config);
            }
        }

        None
    }
}
