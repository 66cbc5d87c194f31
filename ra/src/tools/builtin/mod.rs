//! Built-in tools for the rental agent

mod ask_user;
mod calendar;
mod filter;
mod plan;
mod search;
mod slots;
mod summarize;
mod viewing_request;

pub use ask_user::AskUserTool;
pub use calendar::{CreateEventTool, DeleteEventTool, ListEventsTool, UpdateEventTool};
pub use filter::FilterListingsTool;
pub use plan::{DraftViewingPlanTool, ModifyViewingPlanTool};
pub use search::RentalSearchTool;
pub use slots::GetAvailableSlotsTool;
pub use summarize::SummarizeListingsTool;
pub use viewing_request::SimulateViewingRequestTool;

use crate::domain::Listing;

/// One-line-per-listing digest for LLM tool results
pub(crate) fn listings_digest(listings: &[Listing]) -> String {
    listings
        .iter()
        .map(|l| {
            let mut line = format!(
                "- {} | {} | {} | {} bed",
                l.id,
                l.address,
                l.display_price(),
                l.bedrooms
            );
            if let Some(b) = l.bathrooms {
                line.push_str(&format!(" | {b} bath"));
            }
            if let Some(s) = l.sqft {
                line.push_str(&format!(" | {s} sqft"));
            }
            line
        })
        .collect::<Vec<_>>()
        .join("\n")
}
