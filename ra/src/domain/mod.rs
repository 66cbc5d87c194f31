//! Domain model - listings, filter criteria, calendar slots, viewing plans
//!
//! Pure data plus construction-time validation. Everything downstream
//! (filtering, summarizing, clustering, plan drafting) consumes these types.

mod criteria;
mod listing;
mod plan;
mod slot;

pub use criteria::FilterCriteria;
pub use listing::{Listing, ValidationError};
pub use plan::{PlanEntry, ViewingPlan};
pub use slot::Slot;
