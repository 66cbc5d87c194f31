//! Geospatial clustering and viewing-plan engine
//!
//! Pure functions from listings + slots to plans. Clustering groups
//! listings by proximity to a seed listing; drafting assigns calendar
//! slots in clustered order so geographically-grouped viewings end up
//! temporally adjacent; modification applies transactional batch edits.

mod cluster;
mod draft;
mod error;
mod geo;
mod modify;

pub use cluster::{DEFAULT_CLUSTER_THRESHOLD_KM, cluster};
pub use draft::{DraftOutcome, draft};
pub use error::PlanError;
pub use geo::haversine_km;
pub use modify::{AddItem, ModifyRequest, UpdateItem, modify};
