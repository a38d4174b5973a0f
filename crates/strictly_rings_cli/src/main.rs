//! Strictly Rings - terminal front end
//!
//! Hot-seat play over stdin/stdout and board inspection.

#![warn(missing_docs)]

mod cli;
mod input;
mod play;
mod render;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use play::Output;
use std::path::{Path, PathBuf};
use strictly_rings::{BoardGraph, GameConfig, GameSetup};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Logs go to stderr so they never mix with game output
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Play { config, json } => run_play(config, json),
        Command::Graph { config } => run_graph(config),
    }
}

/// Play a game on stdin/stdout
#[instrument(skip(config))]
fn run_play(config: Option<PathBuf>, json: bool) -> Result<()> {
    let config = load_config(config.as_deref())?;
    let mut game = GameSetup::standard(config)
        .start()
        .context("Failed to start game")?;

    info!(player = %game.active_player(), "Starting game");

    let output = if json { Output::Json } else { Output::Text };
    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    play::run(&mut game, stdin.lock(), &mut stdout, output)
}

/// Print the board adjacency list
fn run_graph(config: Option<PathBuf>) -> Result<()> {
    let config = load_config(config.as_deref())?;
    let graph = BoardGraph::new(*config.layout());
    print!("{}", render::graph_text(&graph));
    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<GameConfig> {
    match path {
        Some(path) => GameConfig::from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display())),
        None => Ok(GameConfig::default()),
    }
}
