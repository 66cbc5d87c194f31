//! Calendar event CRUD tools

use async_trait::async_trait;
use chrono::NaiveDateTime;
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::debug;

use crate::calendar::{CalendarEvent, EventRequest};
use crate::tools::{Tool, ToolContext, ToolResult};

fn event_schema_properties() -> Value {
    json!({
        "summary": { "type": "string", "description": "Event title, e.g. 'Viewing: 123 Main St'" },
        "description": { "type": "string" },
        "location": { "type": "string" },
        "start": { "type": "string", "description": "Start datetime, e.g. 2026-03-02T18:00:00" },
        "end": { "type": "string", "description": "End datetime" }
    })
}

fn render_event(event: &CalendarEvent) -> String {
    let mut line = format!("{} | {} to {} | id: {}", event.summary, event.start, event.end, event.id);
    if let Some(link) = &event.html_link {
        line.push_str(&format!(" | {link}"));
    }
    line
}

/// Create a calendar event
pub struct CreateEventTool;

#[async_trait]
impl Tool for CreateEventTool {
    fn name(&self) -> &'static str {
        "calendar_create_event"
    }

    fn description(&self) -> &'static str {
        "Create a calendar event, e.g. to book an approved viewing."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": event_schema_properties(),
            "required": ["summary", "start", "end"]
        })
    }

    async fn execute(&self, input: Value, ctx: &ToolContext) -> ToolResult {
        debug!("CreateEventTool::execute: called");
        let request: EventRequest = match serde_json::from_value(input) {
            Ok(r) => r,
            Err(e) => return ToolResult::error(format!("Invalid event input: {e}")),
        };
        if request.end <= request.start {
            return ToolResult::error("Event end must be after start");
        }
        match ctx.calendar.create_event(&request).await {
            Ok(event) => ToolResult::success(format!("Created event: {}", render_event(&event))),
            Err(e) => ToolResult::error(format!("Could not create event: {e}")),
        }
    }
}

#[derive(Debug, Deserialize)]
struct UpdateEventInput {
    event_id: String,
    #[serde(flatten)]
    request: EventRequest,
}

/// Update an existing calendar event
pub struct UpdateEventTool;

#[async_trait]
impl Tool for UpdateEventTool {
    fn name(&self) -> &'static str {
        "calendar_update_event"
    }

    fn description(&self) -> &'static str {
        "Update an existing calendar event by id, e.g. to move a booked viewing."
    }

    fn input_schema(&self) -> Value {
        let mut properties = event_schema_properties();
        properties["event_id"] = json!({ "type": "string", "description": "Id of the event to update" });
        json!({
            "type": "object",
            "properties": properties,
            "required": ["event_id", "summary", "start", "end"]
        })
    }

    async fn execute(&self, input: Value, ctx: &ToolContext) -> ToolResult {
        debug!("UpdateEventTool::execute: called");
        let input: UpdateEventInput = match serde_json::from_value(input) {
            Ok(i) => i,
            Err(e) => return ToolResult::error(format!("Invalid event input: {e}")),
        };
        if input.request.end <= input.request.start {
            return ToolResult::error("Event end must be after start");
        }
        match ctx.calendar.update_event(&input.event_id, &input.request).await {
            Ok(event) => ToolResult::success(format!("Updated event: {}", render_event(&event))),
            Err(e) => ToolResult::error(format!("Could not update event: {e}")),
        }
    }
}

#[derive(Debug, Deserialize)]
struct DeleteEventInput {
    event_id: String,
}

/// Delete a calendar event
pub struct DeleteEventTool;

#[async_trait]
impl Tool for DeleteEventTool {
    fn name(&self) -> &'static str {
        "calendar_delete_event"
    }

    fn description(&self) -> &'static str {
        "Delete a calendar event by id, e.g. to cancel a booked viewing."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "event_id": { "type": "string", "description": "Id of the event to delete" }
            },
            "required": ["event_id"]
        })
    }

    async fn execute(&self, input: Value, ctx: &ToolContext) -> ToolResult {
        debug!("DeleteEventTool::execute: called");
        let input: DeleteEventInput = match serde_json::from_value(input) {
            Ok(i) => i,
            Err(e) => return ToolResult::error(format!("Invalid event input: {e}")),
        };
        match ctx.calendar.delete_event(&input.event_id).await {
            Ok(()) => ToolResult::success(format!("Deleted event {}", input.event_id)),
            Err(e) => ToolResult::error(format!("Could not delete event: {e}")),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ListEventsInput {
    time_min: NaiveDateTime,
    time_max: NaiveDateTime,
}

/// List calendar events in a window
pub struct ListEventsTool;

#[async_trait]
impl Tool for ListEventsTool {
    fn name(&self) -> &'static str {
        "calendar_list_events"
    }

    fn description(&self) -> &'static str {
        "List calendar events between two datetimes, e.g. to review booked viewings."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "time_min": { "type": "string", "description": "Window start, e.g. 2026-03-02T00:00:00" },
                "time_max": { "type": "string", "description": "Window end" }
            },
            "required": ["time_min", "time_max"]
        })
    }

    async fn execute(&self, input: Value, ctx: &ToolContext) -> ToolResult {
        debug!("ListEventsTool::execute: called");
        let input: ListEventsInput = match serde_json::from_value(input) {
            Ok(i) => i,
            Err(e) => return ToolResult::error(format!("Invalid event input: {e}")),
        };
        match ctx.calendar.list_events(input.time_min, input.time_max).await {
            Ok(events) if events.is_empty() => ToolResult::success("No events in that window"),
            Ok(events) => {
                let lines: Vec<String> = events.iter().map(|e| format!("- {}", render_event(e))).collect();
                ToolResult::success(format!("{} events:\n{}", events.len(), lines.join("\n")))
            }
            Err(e) => ToolResult::error(format!("Could not list events: {e}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::SessionContext;
    use crate::tools::builtin::test_support::context_with;

    #[tokio::test]
    async fn test_create_then_list_and_delete() {
        let ctx = context_with(SessionContext::new());
        let input = json!({
            "summary": "Viewing: 123 Main St",
            "location": "123 Main St, Vancouver",
            "start": "2026-03-02T18:00:00",
            "end": "2026-03-02T19:00:00"
        });
        let created = CreateEventTool.execute(input, &ctx).await;
        assert!(!created.is_error, "{}", created.content);
        assert!(created.content.contains("Viewing: 123 Main St"));

        let listed = ListEventsTool
            .execute(
                json!({"time_min": "2026-03-01T00:00:00", "time_max": "2026-03-08T00:00:00"}),
                &ctx,
            )
            .await;
        assert!(listed.content.contains("1 events"));

        let deleted = DeleteEventTool.execute(json!({"event_id": "evt1"}), &ctx).await;
        assert!(!deleted.is_error);
    }

    #[tokio::test]
    async fn test_create_rejects_inverted_interval() {
        let ctx = context_with(SessionContext::new());
        let input = json!({
            "summary": "Viewing",
            "start": "2026-03-02T19:00:00",
            "end": "2026-03-02T18:00:00"
        });
        let result = CreateEventTool.execute(input, &ctx).await;
        assert!(result.is_error);
    }

    #[tokio::test]
    async fn test_update_missing_event_surfaces_api_error() {
        let ctx = context_with(SessionContext::new());
        let input = json!({
            "event_id": "nope",
            "summary": "Viewing",
            "start": "2026-03-02T18:00:00",
            "end": "2026-03-02T19:00:00"
        });
        let result = UpdateEventTool.execute(input, &ctx).await;
        assert!(result.is_error);
        assert!(result.content.contains("404"));
    }
}
