//! CLI command definitions and subcommands

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// RentAgent - conversational rental search and viewing scheduler
#[derive(Parser)]
#[command(
    name = "ra",
    about = "Conversational rental search, market stats, and viewing scheduling",
    after_help = "Logs are written to: ~/.local/share/rentagent/logs/rentagent.log"
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, help = "Path to config file")]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// CLI subcommands
#[derive(Subcommand)]
pub enum Command {
    /// Start an interactive chat session (default)
    Chat {
        /// Optional first request to process immediately
        task: Option<String>,
    },

    /// Check the resolved configuration and required credentials
    ConfigCheck,
}
