//! Viewing plan - ordered assignment of slots to listings

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::Slot;

/// One scheduled viewing
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlanEntry {
    pub listing_id: String,
    pub listing_address: String,
    pub listing_url: String,
    pub slot_display: String,
    pub start_datetime: NaiveDateTime,
    pub end_datetime: NaiveDateTime,
}

impl PlanEntry {
    /// Slot identity occupied by this entry
    pub fn slot_key(&self) -> (NaiveDateTime, NaiveDateTime) {
        (self.start_datetime, self.end_datetime)
    }
}

/// An ordered collection of viewing entries
///
/// Invariants (enforced by the plan engine, checkable here):
/// at most one entry per listing id; every `(start, end)` pair unique.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ViewingPlan {
    pub entries: Vec<PlanEntry>,
}

impl ViewingPlan {
    pub fn new(entries: Vec<PlanEntry>) -> Self {
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Find an entry by listing id
    pub fn entry(&self, listing_id: &str) -> Option<&PlanEntry> {
        self.entries.iter().find(|e| e.listing_id == listing_id)
    }

    pub fn contains_listing(&self, listing_id: &str) -> bool {
        self.entry(listing_id).is_some()
    }

    /// The entry occupying a slot, if any
    pub fn entry_at(&self, slot: &Slot) -> Option<&PlanEntry> {
        self.entries.iter().find(|e| e.slot_key() == slot.key())
    }

    /// Check both plan invariants hold
    pub fn invariants_hold(&self) -> bool {
        let mut ids = std::collections::HashSet::new();
        let mut slots = std::collections::HashSet::new();
        for e in &self.entries {
            if !ids.insert(e.listing_id.clone()) {
                return false;
            }
            if !slots.insert(e.slot_key()) {
                return false;
            }
        }
        true
    }
}
