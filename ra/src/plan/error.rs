//! Plan engine error types

use thiserror::Error;

/// Errors from viewing-plan drafting and modification
///
/// Every failure leaves the caller's plan untouched; these surface to the
/// user as structured messages, never as panics.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PlanError {
    #[error("Not enough slots: {listings} listing(s) but only {slots} available slot(s)")]
    NotEnoughSlots { listings: usize, slots: usize },

    #[error("No available slots to schedule viewings")]
    NoSlots,

    #[error("Listing not in plan: {0}")]
    NotFound(String),

    #[error("Listing already in plan: {0}")]
    DuplicateListing(String),

    #[error("Slot not among available slots: {0}")]
    SlotNotAvailable(String),

    #[error("Slot {display} already occupied by listing {occupied_by}")]
    SlotConflict { display: String, occupied_by: String },
}
