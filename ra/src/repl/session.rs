//! REPL session management

use colored::Colorize;
use eyre::Result;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use crate::agent::{AgentEngine, TurnOutcome};
use crate::tools::AskUserRequest;

/// Interactive REPL session
pub struct ReplSession {
    engine: AgentEngine,
}

impl ReplSession {
    /// Create a new REPL session around an agent engine
    pub fn new(engine: AgentEngine) -> Self {
        Self { engine }
    }

    /// Run the REPL main loop
    pub async fn run(&mut self, initial_task: Option<String>) -> Result<()> {
        self.print_welcome();

        // If an initial task was given, process it first
        if let Some(task) = initial_task {
            println!("{} {}", ">".bright_green(), task);
            self.process_user_input(&task).await?;
        }

        let mut rl = DefaultEditor::new().map_err(|e| eyre::eyre!("Failed to initialize readline: {}", e))?;

        loop {
            let readline = rl.readline(&format!("{} ", ">".bright_green()));

            match readline {
                Ok(line) => {
                    let input = line.trim();
                    if input.is_empty() {
                        continue;
                    }

                    let _ = rl.add_history_entry(input);

                    if input.starts_with('/') {
                        match self.handle_slash_command(input).await {
                            SlashResult::Continue => continue,
                            SlashResult::Quit => break,
                        }
                    } else {
                        self.process_user_input(input).await?;
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    // Ctrl+C - just show new prompt
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    // Ctrl+D - exit
                    println!();
                    break;
                }
                Err(err) => {
                    return Err(eyre::eyre!("Readline error: {}", err));
                }
            }
        }

        println!("Goodbye!");
        Ok(())
    }

    /// Print welcome message
    fn print_welcome(&self) {
        println!();
        println!("{}", "Rental Agent".bright_cyan().bold());
        println!("Search rentals, compare listings, and schedule viewings.");
        println!("Type {} for help, {} to quit", "/help".yellow(), "/quit".yellow());
        println!();
    }

    /// Handle slash commands
    async fn handle_slash_command(&mut self, input: &str) -> SlashResult {
        let parts: Vec<&str> = input.split_whitespace().collect();
        let cmd = parts.first().copied().unwrap_or("");

        match cmd {
            "/help" | "/h" => {
                self.print_help();
                SlashResult::Continue
            }
            "/quit" | "/q" | "/exit" => SlashResult::Quit,
            "/clear" | "/c" => {
                self.engine.reset().await;
                println!("{}", "Conversation and session state cleared.".dimmed());
                SlashResult::Continue
            }
            "/context" => {
                self.print_context().await;
                SlashResult::Continue
            }
            _ => {
                println!("{} Unknown command: {}", "?".yellow(), cmd);
                println!("Type {} for available commands", "/help".yellow());
                SlashResult::Continue
            }
        }
    }

    /// Print help message
    fn print_help(&self) {
        println!();
        println!("{}", "Available Commands:".bright_cyan());
        println!("  {:10} Show this help", "/help".yellow());
        println!("  {:10} Exit the REPL", "/quit".yellow());
        println!("  {:10} Clear the conversation and session state", "/clear".yellow());
        println!("  {:10} Show the current session state", "/context".yellow());
        println!();
        println!("{}", "Try:".bright_cyan());
        println!("  find 2-bedroom rentals in Vancouver under $2,800");
        println!("  what's the price spread?");
        println!("  set up viewings for the two cheapest");
        println!();
    }

    /// Print the current session state
    async fn print_context(&self) {
        let session = self.engine.context().session.lock().await;
        println!();
        println!("{}", "Session State:".bright_cyan());
        println!("  Listings loaded:  {}", session.listings.len());
        println!("  Slots fetched:    {}", session.slots.len());
        println!(
            "  Viewing plan:     {}",
            match &session.plan {
                Some(plan) => format!("{} viewings", plan.len()),
                None => "none".to_string(),
            }
        );
        if !session.selected_listing_ids.is_empty() {
            println!("  Selected:         {}", session.selected_listing_ids.join(", "));
        }
        if session.pending_ask.is_some() {
            println!("  {}", "A question is waiting for your answer.".yellow());
        }
        println!();
    }

    /// Process one line of user input through the agent
    async fn process_user_input(&mut self, input: &str) -> Result<()> {
        match self.engine.turn(input).await {
            Ok(TurnOutcome::Reply(text)) => {
                if !text.is_empty() {
                    println!("{text}");
                }
            }
            Ok(TurnOutcome::AskUser(request)) => {
                print_ask(&request);
            }
            Err(e) => {
                println!("{} {}", "Error:".red(), e);
            }
        }
        println!();
        Ok(())
    }
}

/// Show a pending question with its numbered choices
fn print_ask(request: &AskUserRequest) {
    println!();
    println!("{}", request.prompt.bright_white());
    for choice in &request.choices {
        println!("  {choice}");
    }
    if !request.choices.is_empty() {
        let hint = if request.allow_multiple {
            "Answer with numbers separated by commas (e.g. 1, 3), 'none' for none, or type your own answer."
        } else {
            "Answer with a number, or type your own answer."
        };
        println!("{}", hint.dimmed());
    }
}

/// Result of handling a slash command
enum SlashResult {
    Continue,
    Quit,
}
