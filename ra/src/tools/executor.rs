//! ToolExecutor - manages tool execution for a conversation

use std::collections::HashMap;
use tracing::debug;

use crate::llm::{ToolCall, ToolDefinition};

use super::builtin::{
    AskUserTool, CreateEventTool, DeleteEventTool, DraftViewingPlanTool, FilterListingsTool, GetAvailableSlotsTool,
    ListEventsTool, ModifyViewingPlanTool, RentalSearchTool, SimulateViewingRequestTool, SummarizeListingsTool,
    UpdateEventTool,
};
use super::{Tool, ToolContext, ToolResult};

/// Manages tool execution for a conversation
pub struct ToolExecutor {
    tools: HashMap<String, Box<dyn Tool>>,
}

impl ToolExecutor {
    /// Create executor with the standard rental toolset
    pub fn standard() -> Self {
        Self::with_slot_duration(60)
    }

    /// Create the standard toolset with a configured viewing duration
    pub fn with_slot_duration(slot_duration_minutes: i64) -> Self {
        debug!(slot_duration_minutes, "ToolExecutor::with_slot_duration: called");
        let mut tools: HashMap<String, Box<dyn Tool>> = HashMap::new();

        // Search and analysis
        tools.insert("rental_search".into(), Box::new(RentalSearchTool));
        tools.insert("filter_listings".into(), Box::new(FilterListingsTool));
        tools.insert("summarize_listings".into(), Box::new(SummarizeListingsTool));

        // Viewing logistics
        tools.insert("simulate_viewing_request".into(), Box::new(SimulateViewingRequestTool));
        tools.insert(
            "calendar_get_available_slots".into(),
            Box::new(GetAvailableSlotsTool::new(slot_duration_minutes)),
        );
        tools.insert("draft_viewing_plan".into(), Box::new(DraftViewingPlanTool));
        tools.insert("modify_viewing_plan".into(), Box::new(ModifyViewingPlanTool));

        // Calendar CRUD
        tools.insert("calendar_create_event".into(), Box::new(CreateEventTool));
        tools.insert("calendar_update_event".into(), Box::new(UpdateEventTool));
        tools.insert("calendar_delete_event".into(), Box::new(DeleteEventTool));
        tools.insert("calendar_list_events".into(), Box::new(ListEventsTool));

        // User interaction
        tools.insert("ask_user".into(), Box::new(AskUserTool));

        Self { tools }
    }

    /// Create an empty executor (for testing)
    pub fn empty() -> Self {
        debug!("ToolExecutor::empty: called");
        Self { tools: HashMap::new() }
    }

    /// Add a tool to the executor
    pub fn add_tool(&mut self, tool: Box<dyn Tool>) {
        debug!(tool_name = %tool.name(), "ToolExecutor::add_tool: called");
        self.tools.insert(tool.name().to_string(), tool);
    }

    /// Get tool definitions for LLM
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        debug!("ToolExecutor::definitions: called");
        self.tools
            .values()
            .map(|t| ToolDefinition {
                name: t.name().to_string(),
                description: t.description().to_string(),
                input_schema: t.input_schema(),
            })
            .collect()
    }

    /// Execute a tool call
    pub async fn execute(&self, tool_call: &ToolCall, ctx: &ToolContext) -> ToolResult {
        debug!(tool_name = %tool_call.name, tool_id = %tool_call.id, "ToolExecutor::execute: called");
        match self.tools.get(&tool_call.name) {
            Some(tool) => {
                debug!("ToolExecutor::execute: tool found, executing");
                tool.execute(tool_call.input.clone(), ctx).await
            }
            None => {
                debug!("ToolExecutor::execute: unknown tool");
                ToolResult::error(format!("Unknown tool: {}", tool_call.name))
            }
        }
    }

    /// Execute multiple tool calls in order
    pub async fn execute_all(&self, tool_calls: &[ToolCall], ctx: &ToolContext) -> Vec<(String, ToolResult)> {
        debug!(count = %tool_calls.len(), "ToolExecutor::execute_all: called");
        let mut results = Vec::with_capacity(tool_calls.len());

        for call in tool_calls {
            debug!(tool_name = %call.name, tool_id = %call.id, "ToolExecutor::execute_all: executing tool");
            let result = self.execute(call, ctx).await;
            results.push((call.id.clone(), result));
        }

        debug!("ToolExecutor::execute_all: completed all tools");
        results
    }

    /// Check if a tool exists
    pub fn has_tool(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// Get tool names
    pub fn tool_names(&self) -> Vec<String> {
        self.tools.keys().cloned().collect()
    }
}

impl Default for ToolExecutor {
    fn default() -> Self {
        Self::standard()
    }
}
