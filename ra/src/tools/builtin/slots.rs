//! calendar_get_available_slots tool

use async_trait::async_trait;
use chrono::{Duration, Local};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::debug;

use crate::calendar::get_available_slots;
use crate::tools::{Tool, ToolContext, ToolPayload, ToolResult};

#[derive(Debug, Deserialize)]
struct SlotsInput {
    #[serde(default)]
    preferred_times: Option<String>,
    #[serde(default = "default_days_ahead")]
    days_ahead: i64,
}

fn default_days_ahead() -> i64 {
    7
}

/// Compute free viewing slots from the agent's calendar
pub struct GetAvailableSlotsTool {
    slot_duration_minutes: i64,
}

impl GetAvailableSlotsTool {
    pub fn new(slot_duration_minutes: i64) -> Self {
        Self { slot_duration_minutes }
    }
}

#[async_trait]
impl Tool for GetAvailableSlotsTool {
    fn name(&self) -> &'static str {
        "calendar_get_available_slots"
    }

    fn description(&self) -> &'static str {
        "Compute free viewing slots for the coming days, honoring the listing agents' \
         preferred times (e.g. 'weekday evenings 6-8pm'). Results replace any previously \
         fetched slots."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "preferred_times": {
                    "type": "string",
                    "description": "Free-form preferred-times text from the listing agent"
                },
                "days_ahead": {
                    "type": "integer",
                    "description": "How many days ahead to look (default 7)",
                    "default": 7
                }
            }
        })
    }

    async fn execute(&self, input: Value, ctx: &ToolContext) -> ToolResult {
        debug!("GetAvailableSlotsTool::execute: called");
        let input: SlotsInput = match serde_json::from_value(input) {
            Ok(i) => i,
            Err(e) => return ToolResult::error(format!("Invalid slots input: {e}")),
        };
        if input.days_ahead < 1 {
            return ToolResult::error("days_ahead must be at least 1");
        }

        let time_min = Local::now().naive_local();
        let time_max = time_min + Duration::days(input.days_ahead);

        match get_available_slots(
            ctx.calendar.as_ref(),
            input.preferred_times.as_deref(),
            time_min,
            time_max,
            self.slot_duration_minutes,
        )
        .await
        {
            Ok(slots) => {
                let content = if slots.is_empty() {
                    "No free slots in the requested window".to_string()
                } else {
                    let lines: Vec<String> = slots.iter().map(|s| format!("- {}", s.display)).collect();
                    format!("{} free slots:\n{}", slots.len(), lines.join("\n"))
                };
                ToolResult::success(content).with_payload(ToolPayload::Slots(slots))
            }
            Err(e) => ToolResult::error(format!("Calendar lookup failed: {e}")),
        }
    }
}
