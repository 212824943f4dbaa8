// main.rs
use std::io::Write;

use anyhow::Result;
use clap::Parser;
use colored::*;

use tamagotchi::cli::Args;
use tamagotchi::config::Config;
use tamagotchi::core::{FileStore, PetEngine, SystemClock};
use tamagotchi::display;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let args = Args::parse();

    // the pet is a toy: problems are reported, never turned into exit codes
    if let Err(e) = run(&args) {
        tracing::error!("{:#}", e);
    }
}

fn run(args: &Args) -> Result<()> {
    let config = Config::new(None);
    let action = args.action();
    tracing::debug!("state file {}, action {}", config.state_file().display(), action);

    let mut out = std::io::stdout().lock();
    writeln!(out, "{}\n", display::BANNER.cyan().bold())?;

    let store = FileStore::new(config.state_file()).with_fallback(config.legacy_state_file());
    let mut engine = PetEngine::new(store, SystemClock, config.policy);
    let report = engine.run(action);

    write!(out, "{}", display::render(&report))?;
    Ok(())
}
