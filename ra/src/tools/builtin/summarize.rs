//! summarize_listings tool

use async_trait::async_trait;
use serde_json::{Value, json};
use tracing::debug;

use crate::summary::summarize;
use crate::tools::{Tool, ToolContext, ToolResult};

/// Aggregate statistics over the currently loaded listings
pub struct SummarizeListingsTool;

#[async_trait]
impl Tool for SummarizeListingsTool {
    fn name(&self) -> &'static str {
        "summarize_listings"
    }

    fn description(&self) -> &'static str {
        "Summarize the currently loaded listings: price statistics, bedroom and bathroom \
         distributions, size statistics, and house category counts."
    }

    fn input_schema(&self) -> Value {
        json!({ "type": "object", "properties": {} })
    }

    async fn execute(&self, _input: Value, ctx: &ToolContext) -> ToolResult {
        debug!("SummarizeListingsTool::execute: called");
        let session = ctx.session.lock().await;
        let stats = summarize(&session.listings);
        drop(session);

        match serde_json::to_string_pretty(&stats) {
            Ok(rendered) => ToolResult::success(rendered),
            Err(e) => ToolResult::error(format!("Failed to render statistics: {e}")),
        }
    }
}
