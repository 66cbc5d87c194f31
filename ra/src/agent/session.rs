//! SessionContext - typed conversation state

use tracing::debug;

use crate::domain::{Listing, Slot, ViewingPlan};
use crate::tools::{AskUserRequest, ToolPayload};

/// A question waiting for the user's answer
///
/// The tool_use_id ties the eventual answer back to the `ask_user` call
/// in the transcript.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingAsk {
    pub tool_use_id: String,
    pub request: AskUserRequest,
}

/// Typed state accumulated across a conversation
///
/// Each category holds only the latest value: a new search replaces the
/// listing set, a new slot fetch replaces the slots, a new draft or
/// modification replaces the plan. Tools read this; only the agent loop
/// writes it, by folding tool payloads in result order.
#[derive(Debug, Default)]
pub struct SessionContext {
    pub listings: Vec<Listing>,
    pub slots: Vec<Slot>,
    pub plan: Option<ViewingPlan>,
    pub unused_slots: Vec<Slot>,
    /// Listing ids the user approved for viewings
    pub selected_listing_ids: Vec<String>,
    pub pending_ask: Option<PendingAsk>,
}

impl SessionContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one tool payload into the session, latest value winning
    ///
    /// Applied even when the tool reported an error: a tool that failed
    /// after producing fresh state still supersedes stale state.
    pub fn apply_payload(&mut self, payload: &ToolPayload) {
        match payload {
            ToolPayload::Listings(listings) => {
                debug!(count = listings.len(), "SessionContext::apply_payload: listings");
                self.listings = listings.clone();
            }
            ToolPayload::Slots(slots) => {
                debug!(count = slots.len(), "SessionContext::apply_payload: slots");
                self.slots = slots.clone();
            }
            ToolPayload::Plan(outcome) => {
                debug!(entries = outcome.plan.len(), "SessionContext::apply_payload: plan");
                self.plan = Some(outcome.plan.clone());
                self.unused_slots = outcome.unused_slots.clone();
            }
            // Asks carry a tool_use_id known only to the agent loop,
            // which records them itself
            ToolPayload::Ask(_) => {}
        }
    }

    /// Listings the user selected, or every listing when nothing is selected
    pub fn selected_listings(&self) -> Vec<Listing> {
        if self.selected_listing_ids.is_empty() {
            return self.listings.clone();
        }
        self.listings
            .iter()
            .filter(|l| self.selected_listing_ids.contains(&l.id))
            .cloned()
            .collect()
    }

    /// Drop all accumulated state
    pub fn clear(&mut self) {
        debug!("SessionContext::clear: called");
        *self = Self::default();
    }
}
