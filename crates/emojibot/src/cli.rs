//! CLI command definitions.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// emojibot - serve an unbounded emoji catalog through a few native slots
#[derive(Parser, Debug)]
#[command(name = "emojibot")]
#[command(about = "Serve an unbounded emoji catalog through a few native Discord slots", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Path to the TOML configuration file
    #[arg(short, long, global = true, env = "EMOJIBOT_CONFIG", default_value = "emojibot.toml")]
    pub config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commands {
    /// Connect to Discord and serve messages until shut down
    Run,

    /// Validate configuration, catalog and blocklist without connecting
    Check,
}
