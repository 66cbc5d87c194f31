//! Plan drafting - assign slots to clustered listings

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::cluster::cluster;
use super::error::PlanError;
use crate::domain::{Listing, PlanEntry, Slot, ViewingPlan};

/// A drafted plan plus the slots it did not consume
///
/// Unused slots are reported so callers can offer them for later additions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DraftOutcome {
    pub plan: ViewingPlan,
    pub unused_slots: Vec<Slot>,
}

/// Draft a viewing plan from approved listings and free slots
///
/// Listings are flattened in clustered order (north-to-south clusters,
/// coordinate-less tail) and slots assigned in the order given: slot 0 to
/// the first listing in cluster order, slot 1 to the second, and so on.
/// Geography couples to chronology only through this ordering.
pub fn draft(listings: &[Listing], available_slots: &[Slot], threshold_km: f64) -> Result<DraftOutcome, PlanError> {
    debug!(
        listing_count = listings.len(),
        slot_count = available_slots.len(),
        "draft: called"
    );

    if listings.is_empty() {
        return Ok(DraftOutcome {
            plan: ViewingPlan::default(),
            unused_slots: available_slots.to_vec(),
        });
    }
    if available_slots.is_empty() {
        return Err(PlanError::NoSlots);
    }
    if listings.len() > available_slots.len() {
        return Err(PlanError::NotEnoughSlots {
            listings: listings.len(),
            slots: available_slots.len(),
        });
    }

    let ordered: Vec<Listing> = cluster(listings, threshold_km).into_iter().flatten().collect();

    let entries: Vec<PlanEntry> = ordered
        .iter()
        .zip(available_slots)
        .map(|(listing, slot)| PlanEntry {
            listing_id: listing.id.clone(),
            listing_address: listing.address.clone(),
            listing_url: listing.url.clone(),
            slot_display: slot.display.clone(),
            start_datetime: slot.start,
            end_datetime: slot.end,
        })
        .collect();

    let unused_slots = available_slots[entries.len()..].to_vec();
    debug!(
        entry_count = entries.len(),
        unused_count = unused_slots.len(),
        "draft: done"
    );

    Ok(DraftOutcome {
        plan: ViewingPlan::new(entries),
        unused_slots,
    })
}
