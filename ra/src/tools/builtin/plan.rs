//! draft_viewing_plan and modify_viewing_plan tools

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::debug;

use crate::domain::{Slot, ViewingPlan};
use crate::plan::{DEFAULT_CLUSTER_THRESHOLD_KM, DraftOutcome, ModifyRequest, draft, modify};
use crate::tools::{Tool, ToolContext, ToolError, ToolPayload, ToolResult};

fn render_plan(plan: &ViewingPlan, unused: &[Slot]) -> String {
    if plan.is_empty() {
        return "The viewing plan is empty".to_string();
    }
    let mut lines: Vec<String> = plan
        .entries
        .iter()
        .map(|e| format!("- {} at {} (id: {})", e.listing_address, e.slot_display, e.listing_id))
        .collect();
    if !unused.is_empty() {
        lines.push(format!("{} slots remain free", unused.len()));
    }
    format!("Viewing plan ({} viewings):\n{}", plan.len(), lines.join("\n"))
}

#[derive(Debug, Deserialize)]
struct DraftInput {
    #[serde(default)]
    listing_ids: Vec<String>,
    #[serde(default)]
    threshold_km: Option<f64>,
}

/// Draft a viewing plan from the selected listings and fetched slots
pub struct DraftViewingPlanTool;

#[async_trait]
impl Tool for DraftViewingPlanTool {
    fn name(&self) -> &'static str {
        "draft_viewing_plan"
    }

    fn description(&self) -> &'static str {
        "Draft a viewing plan assigning each selected listing to a free slot, grouping \
         nearby listings into consecutive slots. Requires slots from \
         calendar_get_available_slots. Omit listing_ids to use the user's selection."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "listing_ids": {
                    "type": "array",
                    "items": { "type": "string" },
                    "description": "Listings to schedule; defaults to the user's selection"
                },
                "threshold_km": {
                    "type": "number",
                    "description": "Cluster radius in km (default 2.0)"
                }
            }
        })
    }

    async fn execute(&self, input: Value, ctx: &ToolContext) -> ToolResult {
        debug!("DraftViewingPlanTool::execute: called");
        let input: DraftInput = match serde_json::from_value(input) {
            Ok(i) => i,
            Err(e) => return ToolResult::error(format!("Invalid draft input: {e}")),
        };

        let session = ctx.session.lock().await;
        let listings = if input.listing_ids.is_empty() {
            session.selected_listings()
        } else {
            session
                .listings
                .iter()
                .filter(|l| input.listing_ids.contains(&l.id))
                .cloned()
                .collect()
        };
        let slots = session.slots.clone();
        drop(session);

        let threshold = input.threshold_km.unwrap_or(DEFAULT_CLUSTER_THRESHOLD_KM);
        match draft(&listings, &slots, threshold) {
            Ok(outcome) => {
                let content = render_plan(&outcome.plan, &outcome.unused_slots);
                ToolResult::success(content).with_payload(ToolPayload::Plan(outcome))
            }
            Err(e) => ToolResult::error(format!("Could not draft a plan: {e}")),
        }
    }
}

/// Apply a batch of removals, rebookings, and additions to the plan
pub struct ModifyViewingPlanTool;

#[async_trait]
impl Tool for ModifyViewingPlanTool {
    fn name(&self) -> &'static str {
        "modify_viewing_plan"
    }

    fn description(&self) -> &'static str {
        "Modify the current viewing plan: remove listings, move listings to different \
         slots, or add listings. The whole batch applies atomically; any failure leaves \
         the plan unchanged."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "remove": {
                    "type": "array",
                    "items": { "type": "string" },
                    "description": "Listing ids to drop from the plan"
                },
                "update": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "properties": {
                            "listing_id": { "type": "string" },
                            "slot": { "type": "object" }
                        },
                        "required": ["listing_id", "slot"]
                    },
                    "description": "Move existing entries to different slots"
                },
                "add": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "properties": {
                            "listing_id": { "type": "string" },
                            "listing_address": { "type": "string" },
                            "listing_url": { "type": "string" },
                            "slot": { "type": "object" }
                        },
                        "required": ["listing_id", "listing_address", "listing_url", "slot"]
                    },
                    "description": "New entries to book into free slots"
                }
            }
        })
    }

    async fn execute(&self, input: Value, ctx: &ToolContext) -> ToolResult {
        debug!("ModifyViewingPlanTool::execute: called");
        let request: ModifyRequest = match serde_json::from_value(input) {
            Ok(r) => r,
            Err(e) => return ToolResult::error(format!("Invalid modify input: {e}")),
        };
        if request.is_empty() {
            return ToolResult::error(ToolError::EmptyRequest.to_string());
        }

        let session = ctx.session.lock().await;
        let plan = match &session.plan {
            Some(p) => p.clone(),
            None => {
                return ToolResult::error(
                    ToolError::MissingContext("no viewing plan; run draft_viewing_plan first".to_string())
                        .to_string(),
                );
            }
        };
        let slots = session.slots.clone();
        drop(session);

        match modify(&plan, &slots, &request) {
            Ok(updated) => {
                let unused_slots: Vec<Slot> = slots
                    .iter()
                    .filter(|s| updated.entry_at(s).is_none())
                    .cloned()
                    .collect();
                let content = render_plan(&updated, &unused_slots);
                ToolResult::success(content).with_payload(ToolPayload::Plan(DraftOutcome {
                    plan: updated,
                    unused_slots,
                }))
            }
            Err(e) => ToolResult::error(format!("Could not modify the plan: {e}")),
        }
    }
}
