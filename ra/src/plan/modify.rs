//! Transactional plan modification

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::error::PlanError;
use crate::domain::{PlanEntry, Slot, ViewingPlan};

/// Reschedule an existing entry to a new slot
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UpdateItem {
    pub listing_id: String,
    pub slot: Slot,
}

/// Append a new entry for a listing not yet in the plan
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AddItem {
    pub listing_id: String,
    pub listing_address: String,
    pub listing_url: String,
    pub slot: Slot,
}

/// A batch of plan edits, applied remove -> update -> add
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ModifyRequest {
    pub remove: Vec<String>,
    pub update: Vec<UpdateItem>,
    pub add: Vec<AddItem>,
}

impl ModifyRequest {
    pub fn is_empty(&self) -> bool {
        self.remove.is_empty() && self.update.is_empty() && self.add.is_empty()
    }
}

fn slot_available(available_slots: &[Slot], slot: &Slot) -> bool {
    available_slots.iter().any(|s| s.key() == slot.key())
}

/// Apply a batch of edits to a plan
///
/// Edits run against a working copy in the fixed order remove, update, add
/// (updates see post-removal state; adds see post-update slot occupancy).
/// The whole batch is transactional: the first failure aborts the call and
/// the caller's plan is returned unchanged by virtue of never being touched.
pub fn modify(current: &ViewingPlan, available_slots: &[Slot], request: &ModifyRequest) -> Result<ViewingPlan, PlanError> {
    debug!(
        remove = request.remove.len(),
        update = request.update.len(),
        add = request.add.len(),
        "modify: called"
    );

    let mut plan = current.clone();

    for listing_id in &request.remove {
        let idx = plan
            .entries
            .iter()
            .position(|e| &e.listing_id == listing_id)
            .ok_or_else(|| PlanError::NotFound(listing_id.clone()))?;
        plan.entries.remove(idx);
    }

    for item in &request.update {
        if !slot_available(available_slots, &item.slot) {
            return Err(PlanError::SlotNotAvailable(item.slot.display.clone()));
        }
        if let Some(occupant) = plan.entry_at(&item.slot)
            && occupant.listing_id != item.listing_id
        {
            return Err(PlanError::SlotConflict {
                display: item.slot.display.clone(),
                occupied_by: occupant.listing_id.clone(),
            });
        }
        let entry = plan
            .entries
            .iter_mut()
            .find(|e| e.listing_id == item.listing_id)
            .ok_or_else(|| PlanError::NotFound(item.listing_id.clone()))?;
        entry.slot_display = item.slot.display.clone();
        entry.start_datetime = item.slot.start;
        entry.end_datetime = item.slot.end;
    }

    for item in &request.add {
        if plan.contains_listing(&item.listing_id) {
            return Err(PlanError::DuplicateListing(item.listing_id.clone()));
        }
        if !slot_available(available_slots, &item.slot) {
            return Err(PlanError::SlotNotAvailable(item.slot.display.clone()));
        }
        if let Some(occupant) = plan.entry_at(&item.slot) {
            return Err(PlanError::SlotConflict {
                display: item.slot.display.clone(),
                occupied_by: occupant.listing_id.clone(),
            });
        }
        plan.entries.push(PlanEntry {
            listing_id: item.listing_id.clone(),
            listing_address: item.listing_address.clone(),
            listing_url: item.listing_url.clone(),
            slot_display: item.slot.display.clone(),
            start_datetime: item.slot.start,
            end_datetime: item.slot.end,
        });
    }

    debug!(entry_count = plan.len(), "modify: done");
    Ok(plan)
}
