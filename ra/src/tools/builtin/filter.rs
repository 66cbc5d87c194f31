//! filter_listings tool

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::debug;

use crate::domain::FilterCriteria;
use crate::filter::filter_and_sort;
use crate::tools::{Tool, ToolContext, ToolError, ToolPayload, ToolResult};

use super::listings_digest;

#[derive(Debug, Deserialize)]
struct FilterInput {
    #[serde(flatten)]
    criteria: FilterCriteria,
    #[serde(default)]
    sort_by: Option<String>,
    #[serde(default = "default_ascending")]
    ascending: bool,
}

fn default_ascending() -> bool {
    true
}

/// Narrow and order the currently loaded listings
pub struct FilterListingsTool;

#[async_trait]
impl Tool for FilterListingsTool {
    fn name(&self) -> &'static str {
        "filter_listings"
    }

    fn description(&self) -> &'static str {
        "Filter the currently loaded listings by bounds and/or sort them by one attribute. \
         Requires at least one bound or a sort field. The result replaces the loaded listings."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "min_bedrooms": { "type": "integer" },
                "max_bedrooms": { "type": "integer" },
                "min_bathrooms": { "type": "number" },
                "max_bathrooms": { "type": "number" },
                "min_sqft": { "type": "number" },
                "max_sqft": { "type": "number" },
                "rent_min": { "type": "number" },
                "rent_max": { "type": "number" },
                "sort_by": {
                    "type": "string",
                    "description": "Attribute to sort by: price, bedrooms, bathrooms, sqft, address, id, or title"
                },
                "ascending": { "type": "boolean", "default": true }
            }
        })
    }

    async fn execute(&self, input: Value, ctx: &ToolContext) -> ToolResult {
        debug!("FilterListingsTool::execute: called");
        let input: FilterInput = match serde_json::from_value(input) {
            Ok(i) => i,
            Err(e) => return ToolResult::error(format!("Invalid filter input: {e}")),
        };

        if input.criteria.is_empty() && input.sort_by.is_none() {
            return ToolResult::error(ToolError::EmptyRequest.to_string());
        }

        let session = ctx.session.lock().await;
        if session.listings.is_empty() {
            return ToolResult::error(
                ToolError::MissingContext("no listings loaded; run rental_search first".to_string()).to_string(),
            );
        }

        let (filtered, count) = filter_and_sort(
            &session.listings,
            &input.criteria,
            input.sort_by.as_deref(),
            input.ascending,
        );
        drop(session);

        let content = if filtered.is_empty() {
            "No listings match the filter".to_string()
        } else {
            format!("{count} listings match:\n{}", listings_digest(&filtered))
        };
        ToolResult::success(content).with_payload(ToolPayload::Listings(filtered))
    }
}
