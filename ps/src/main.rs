use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use prefstore::PrefStore;
use prefstore::cli::Cli;
use prefstore::config::Config;

fn setup_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();
}

fn main() -> Result<()> {
    setup_logging();

    let cli = Cli::parse();
    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    info!("prefstore starting");

    let store = PrefStore::open(&config.store_path)?;

    match cli.command {
        prefstore::cli::Command::Get { key } => {
            let value = store.get(&key)?;
            println!("{}", value);
        }
        prefstore::cli::Command::Set { key, value } => {
            store.set(&key, &value)?;
            println!("{} {} = {}", "✓".green(), key.cyan(), value);
        }
        prefstore::cli::Command::List => {
            let entries = store.entries()?;
            if entries.is_empty() {
                println!("No preferences stored");
            } else {
                for (key, value) in entries {
                    println!("{} = {}", key.cyan(), value);
                }
            }
        }
        prefstore::cli::Command::Delete { key } => {
            store.delete(&key)?;
            println!("{} Deleted: {}", "✓".green(), key);
        }
        prefstore::cli::Command::Clear => {
            let count = store.clear()?;
            println!("{} Cleared {} preference(s)", "✓".green(), count);
        }
    }

    Ok(())
}
