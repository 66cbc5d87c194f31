//! Tool trait definition

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::domain::{Listing, Slot};
use crate::plan::DraftOutcome;

use super::context::ToolContext;

/// A tool that can be called by the LLM
#[async_trait]
pub trait Tool: Send + Sync {
    /// Tool name (matches LLM tool_use name)
    fn name(&self) -> &'static str;

    /// Human-readable description
    fn description(&self) -> &'static str;

    /// JSON Schema for input parameters
    fn input_schema(&self) -> Value;

    /// Execute the tool
    async fn execute(&self, input: Value, ctx: &ToolContext) -> ToolResult;
}

/// A question the agent must put to the user before continuing
///
/// Wire shape: `{prompt, choices, allow_multiple}`; empty `choices` means
/// a free-text answer. The answer comes back as `{"answer": "..."}` or
/// `{"selected": [...]}` (empty `selected` = nothing chosen).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AskUserRequest {
    pub prompt: String,
    #[serde(default)]
    pub choices: Vec<String>,
    #[serde(default)]
    pub allow_multiple: bool,
}

/// Typed state carried back from a tool to the agent loop
///
/// The agent folds each payload into the session after the tool runs,
/// so later tools in the same conversation see the freshest listings,
/// slots, and plan.
#[derive(Debug, Clone)]
pub enum ToolPayload {
    Listings(Vec<Listing>),
    Slots(Vec<Slot>),
    Plan(DraftOutcome),
    Ask(AskUserRequest),
}

/// Result of a tool execution
#[derive(Debug, Clone)]
pub struct ToolResult {
    pub content: String,
    pub is_error: bool,
    pub payload: Option<ToolPayload>,
}

impl ToolResult {
    /// Create a successful result
    pub fn success(content: impl Into<String>) -> Self {
        debug!("ToolResult::success: called");
        Self {
            content: content.into(),
            is_error: false,
            payload: None,
        }
    }

    /// Create an error result
    pub fn error(content: impl Into<String>) -> Self {
        debug!("ToolResult::error: called");
        Self {
            content: content.into(),
            is_error: true,
            payload: None,
        }
    }

    /// Attach a typed payload for the agent loop
    pub fn with_payload(mut self, payload: ToolPayload) -> Self {
        self.payload = Some(payload);
        self
    }
}
