//! Command-line interface for strictly_rings.

use clap::{Parser, Subcommand};

/// Strictly Rings - play the ring board game in a terminal
#[derive(Parser, Debug)]
#[command(name = "strictly_rings")]
#[command(about = "Hot-seat ring board game driven from stdin", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play a game, reading one command per line from stdin
    Play {
        /// Path to a TOML game config (defaults to the standard board)
        #[arg(short, long)]
        config: Option<std::path::PathBuf>,

        /// Print events and snapshots as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the board adjacency list
    Graph {
        /// Path to a TOML game config (defaults to the standard board)
        #[arg(short, long)]
        config: Option<std::path::PathBuf>,
    },
}
