//! CLI argument parsing for prefstore

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "ps")]
#[command(author, version, about = "Flat key/value preferences store", long_about = None)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Get a preference value
    Get {
        /// Preference key
        #[arg(required = true)]
        key: String,
    },

    /// Set a preference value
    Set {
        /// Preference key
        #[arg(required = true)]
        key: String,

        /// Value to store
        #[arg(required = true)]
        value: String,
    },

    /// List all stored preferences
    List,

    /// Delete a preference
    Delete {
        /// Preference key
        #[arg(required = true)]
        key: String,
    },

    /// Remove every stored preference
    Clear,
}
