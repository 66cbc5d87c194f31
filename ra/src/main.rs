//! RentAgent - conversational rental search and viewing scheduler
//!
//! CLI entry point for the interactive chat session.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use eyre::{Context, Result};
use tokio::sync::Mutex;
use tracing::{info, warn};

use rentagent::agent::{AgentEngine, SessionContext, system_prompt_with_preferences};
use rentagent::calendar::GoogleCalendarProvider;
use rentagent::cli::{Cli, Command};
use rentagent::config::Config;
use rentagent::llm::{LlmClient, OpenAIClient};
use rentagent::repl::ReplSession;
use rentagent::search::HttpSearchBackend;
use rentagent::tools::{ToolContext, ToolExecutor};

fn setup_logging(verbose: bool) -> Result<()> {
    // Log to a file so the chat stays clean on stdout
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("rentagent")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    let level = if verbose { tracing::Level::DEBUG } else { tracing::Level::INFO };
    let log_file = fs::File::create(log_dir.join("rentagent.log")).context("Failed to create log file")?;

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_ansi(false)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    info!("Logging initialized (verbose: {})", verbose);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose).context("Failed to setup logging")?;

    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    info!(
        "RentAgent loaded config: provider={}, model={}",
        config.llm.provider, config.llm.model
    );

    match cli.command {
        Some(Command::ConfigCheck) => cmd_config_check(&config),
        Some(Command::Chat { task }) => cmd_chat(&config, task).await,
        None => cmd_chat(&config, None).await,
    }
}

/// Print the resolved configuration and verify credentials
fn cmd_config_check(config: &Config) -> Result<()> {
    println!("LLM:      {} ({})", config.llm.model, config.llm.base_url);
    println!("Search:   {}", config.search.endpoint);
    println!(
        "Calendar: {} ({}, {} min slots)",
        config.calendar.calendar_id, config.calendar.timezone, config.calendar.slot_duration_minutes
    );
    println!("Prefs:    {}", config.storage.resolve_prefs_dir().display());

    config.validate()?;
    if std::env::var(&config.calendar.token_env).is_err() {
        warn!("Calendar token env var {} is not set", config.calendar.token_env);
        println!(
            "Warning: {} is not set; calendar operations will fail.",
            config.calendar.token_env
        );
    }
    println!("Configuration OK");
    Ok(())
}

/// Run the interactive chat session
async fn cmd_chat(config: &Config, initial_task: Option<String>) -> Result<()> {
    config.validate()?;

    let llm: Arc<dyn LlmClient> =
        Arc::new(OpenAIClient::from_config(&config.llm).context("Failed to create LLM client")?);
    let search = Arc::new(
        HttpSearchBackend::new(&config.search.endpoint, config.search.timeout_ms)
            .map_err(|e| eyre::eyre!("Failed to create search backend: {}", e))?,
    );
    let calendar = Arc::new(
        GoogleCalendarProvider::from_config(&config.calendar)
            .map_err(|e| eyre::eyre!("Failed to create calendar provider: {}", e))?,
    );

    let conversation_id = uuid::Uuid::new_v4().to_string();
    let session = Arc::new(Mutex::new(SessionContext::new()));
    let ctx = ToolContext::new(search, calendar, session, conversation_id);

    let executor = ToolExecutor::with_slot_duration(config.calendar.slot_duration_minutes);
    let mut engine = AgentEngine::new(llm, executor, ctx);

    // Saved preferences (managed with the ps CLI) ride along in the prompt
    match prefstore::PrefStore::open(config.storage.resolve_prefs_dir()) {
        Ok(store) => match store.entries() {
            Ok(prefs) if !prefs.is_empty() => {
                info!(count = prefs.len(), "Loaded saved preferences");
                engine.set_system_prompt(system_prompt_with_preferences(&prefs));
            }
            Ok(_) => {}
            Err(e) => warn!("Could not read saved preferences: {}", e),
        },
        Err(e) => warn!("Could not open preference store: {}", e),
    }

    let mut repl = ReplSession::new(engine);
    repl.run(initial_task).await
}
