//! Configuration command

use anyhow::{Context, Result};

use crate::config::Settings;

pub fn show(settings: &Settings) -> Result<()> {
    println!("Current Configuration");
    println!("=====================\n");

    let rendered = toml::to_string_pretty(settings).context("Failed to render configuration")?;
    println!("{rendered}");
    println!(
        "# exploration_delta = {}",
        settings.agent.exploration_delta()
    );

    Ok(())
}
