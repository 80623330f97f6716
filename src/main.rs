//! dropship-bot — keyword-driven dropshipping automation.
//!
//! Research trending products, score suppliers, derive sale prices, and
//! assemble listing drafts, all driven through the job scheduler.

mod bot;
mod journal;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use common::config::BotConfig;

use crate::bot::Bot;

#[derive(Parser, Debug)]
#[command(name = "dropship-bot", about = "Dropshipping automation pipeline")]
struct Args {
    /// Path to the TOML config. Missing file falls back to defaults.
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,

    /// Keywords to research.
    #[arg(long, num_args = 1..)]
    keywords: Vec<String>,

    /// Log level when RUST_LOG is not set.
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(args.log_level.clone())),
        )
        .init();

    let config = load_config(&args.config)?;

    if args.keywords.is_empty() {
        info!("no keywords given; try --keywords \"smart watch\" \"laptop stand\"");
        return Ok(());
    }

    let mut bot = Bot::new(config)?;
    let executed = bot.full_automation(&args.keywords);
    info!("done: {} jobs executed", executed);
    Ok(())
}

fn load_config(path: &PathBuf) -> Result<BotConfig> {
    if !path.exists() {
        info!("config {} not found, using defaults", path.display());
        return Ok(BotConfig::default());
    }

    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    toml::from_str(&raw).with_context(|| format!("parsing config {}", path.display()))
}
