//! rental_search tool

use async_trait::async_trait;
use serde_json::{Value, json};
use tracing::debug;

use crate::search::{SearchQuery, run_search};
use crate::tools::{Tool, ToolContext, ToolPayload, ToolResult};

use super::listings_digest;

/// Search the rental backend for listings matching a query
pub struct RentalSearchTool;

#[async_trait]
impl Tool for RentalSearchTool {
    fn name(&self) -> &'static str {
        "rental_search"
    }

    fn description(&self) -> &'static str {
        "Search for rental listings in a location. Bounds are optional; min_bedrooms and \
         location are required. Results replace any previously loaded listings."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "location": { "type": "string", "description": "City or neighbourhood to search" },
                "min_bedrooms": { "type": "integer", "minimum": 0 },
                "max_bedrooms": { "type": "integer" },
                "min_bathrooms": { "type": "number" },
                "max_bathrooms": { "type": "number" },
                "min_sqft": { "type": "number" },
                "max_sqft": { "type": "number" },
                "rent_min": { "type": "number" },
                "rent_max": { "type": "number" },
                "listing_type": {
                    "type": "string",
                    "enum": ["for_rent", "for_sale", "for_sale_or_rent"]
                }
            },
            "required": ["location", "min_bedrooms"]
        })
    }

    async fn execute(&self, input: Value, ctx: &ToolContext) -> ToolResult {
        debug!("RentalSearchTool::execute: called");
        let query: SearchQuery = match serde_json::from_value(input) {
            Ok(q) => q,
            Err(e) => return ToolResult::error(format!("Invalid search input: {e}")),
        };

        match run_search(ctx.search.as_ref(), &query).await {
            Ok(listings) => {
                let content = if listings.is_empty() {
                    format!("No listings found in {}", query.location)
                } else {
                    format!(
                        "Found {} listings in {}:\n{}",
                        listings.len(),
                        query.location,
                        listings_digest(&listings)
                    )
                };
                ToolResult::success(content).with_payload(ToolPayload::Listings(listings))
            }
            Err(e) => ToolResult::error(format!("Search failed: {e}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    use crate::agent::SessionContext;
    use crate::tools::builtin::test_support::{FixedCalendarProvider, FixedSearchBackend};

    fn search_ctx(rows: Vec<Value>) -> ToolContext {
        ToolContext::new(
            Arc::new(FixedSearchBackend { rows }),
            Arc::new(FixedCalendarProvider::default()),
            Arc::new(Mutex::new(SessionContext::new())),
            "test-conversation",
        )
    }

    fn row(mls: &str, rent: &str, bedrooms: u32) -> Value {
        json!({
            "MLS": mls,
            "Address": format!("{mls} Main St"),
            "Bedrooms": bedrooms,
            "Rent": rent,
        })
    }

    #[tokio::test]
    async fn test_search_returns_listings_payload() {
        let ctx = search_ctx(vec![row("R1", "$2,500", 2), row("R2", "$1,800", 1)]);
        let input = json!({"location": "Vancouver", "min_bedrooms": 1});
        let result = RentalSearchTool.execute(input, &ctx).await;

        assert!(!result.is_error);
        assert!(result.content.contains("Found 2 listings"));
        match result.payload {
            Some(ToolPayload::Listings(listings)) => assert_eq!(listings.len(), 2),
            other => panic!("expected Listings payload, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_search_applies_query_bounds_locally() {
        let ctx = search_ctx(vec![row("R1", "$2,500", 2), row("R2", "$1,800", 1)]);
        let input = json!({"location": "Vancouver", "min_bedrooms": 2});
        let result = RentalSearchTool.execute(input, &ctx).await;

        match result.payload {
            Some(ToolPayload::Listings(listings)) => {
                assert_eq!(listings.len(), 1);
                assert_eq!(listings[0].id, "R1");
            }
            other => panic!("expected Listings payload, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_search_empty_results() {
        let ctx = search_ctx(vec![]);
        let input = json!({"location": "Nowhere", "min_bedrooms": 1});
        let result = RentalSearchTool.execute(input, &ctx).await;
        assert!(!result.is_error);
        assert!(result.content.contains("No listings found"));
    }

    #[tokio::test]
    async fn test_missing_required_field_rejected() {
        let ctx = search_ctx(vec![]);
        let result = RentalSearchTool.execute(json!({"location": "Vancouver"}), &ctx).await;
        assert!(result.is_error);
    }
}
