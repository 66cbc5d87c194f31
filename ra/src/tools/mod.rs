//! Tool system for the rental agent
//!
//! Tools give the LLM access to search, filtering, statistics, the
//! calendar, and the viewing-plan engine. Each conversation gets a
//! `ToolContext` holding the shared backends and session state; tools
//! read the session but never write it - typed payloads on `ToolResult`
//! carry state changes back to the agent loop.

mod context;
mod error;
mod executor;
mod traits;

pub mod builtin;

pub use context::ToolContext;
pub use error::ToolError;
pub use executor::ToolExecutor;
pub use traits::{AskUserRequest, Tool, ToolPayload, ToolResult};
