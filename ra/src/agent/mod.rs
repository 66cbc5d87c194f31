//! Agent engine - the planner loop driving the conversation
//!
//! The engine owns the transcript, calls the LLM, dispatches tool calls,
//! and folds typed tool payloads into the session. User-facing questions
//! from the `ask_user` tool suspend the loop until the REPL delivers an
//! answer.

mod engine;
mod labels;
mod prompts;
mod session;

pub use engine::{AgentEngine, AgentError, TurnOutcome};
pub use labels::{approval_label, listing_id_from_label};
pub use prompts::{system_prompt, system_prompt_with_preferences};
pub use session::{PendingAsk, SessionContext};
