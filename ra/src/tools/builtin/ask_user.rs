//! ask_user tool - put a question to the user

use async_trait::async_trait;
use serde_json::{Value, json};
use tracing::debug;

use crate::tools::{AskUserRequest, Tool, ToolContext, ToolPayload, ToolResult};

/// Pause the conversation and ask the user something
///
/// The agent loop intercepts the Ask payload, stores it as the pending
/// question, and returns control to the REPL. The answer comes back as
/// this call's tool result on the next turn.
pub struct AskUserTool;

#[async_trait]
impl Tool for AskUserTool {
    fn name(&self) -> &'static str {
        "ask_user"
    }

    fn description(&self) -> &'static str {
        "Ask the user a question and wait for their answer. Provide choices for a selection, \
         or omit them for a free-form answer. Set allow_multiple for pick-several questions."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "prompt": {
                    "type": "string",
                    "description": "The question to show the user"
                },
                "choices": {
                    "type": "array",
                    "items": { "type": "string" },
                    "description": "Optional numbered choices"
                },
                "allow_multiple": {
                    "type": "boolean",
                    "description": "Allow selecting more than one choice"
                }
            },
            "required": ["prompt"]
        })
    }

    async fn execute(&self, input: Value, _ctx: &ToolContext) -> ToolResult {
        debug!("AskUserTool::execute: called");
        let request: AskUserRequest = match serde_json::from_value(input) {
            Ok(r) => r,
            Err(e) => return ToolResult::error(format!("Invalid ask_user input: {e}")),
        };
        if request.prompt.trim().is_empty() {
            return ToolResult::error("Invalid ask_user input: prompt is empty");
        }
        ToolResult::success("Waiting for the user's answer").with_payload(ToolPayload::Ask(request))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::SessionContext;
    use crate::tools::builtin::test_support::context_with;

    #[tokio::test]
    async fn test_ask_with_choices() {
        let ctx = context_with(SessionContext::new());
        let input = json!({
            "prompt": "Which listings should I book?",
            "choices": ["[1] 123 Main St", "[2] 456 Oak Ave"],
            "allow_multiple": true
        });
        let result = AskUserTool.execute(input, &ctx).await;
        assert!(!result.is_error);
        match result.payload {
            Some(ToolPayload::Ask(request)) => {
                assert_eq!(request.choices.len(), 2);
                assert!(request.allow_multiple);
            }
            other => panic!("expected Ask payload, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_empty_prompt_rejected() {
        let ctx = context_with(SessionContext::new());
        let result = AskUserTool.execute(json!({"prompt": "  "}), &ctx).await;
        assert!(result.is_error);
    }
}
