//! Search backend - raw listing rows from an upstream source
//!
//! The backend returns loosely-typed scraped rows; the adapter maps them
//! into validated [`Listing`](crate::domain::Listing) values and re-applies
//! the query bounds locally. Backend failure is always an error, never an
//! empty success.

mod adapter;
mod error;
mod http;
mod query;

use tracing::debug;

pub use adapter::map_rows;
pub use error::SearchError;
pub use http::HttpSearchBackend;
pub use query::{ListingType, SearchQuery};

use async_trait::async_trait;

use crate::domain::Listing;
use crate::filter::filter_and_sort;

/// Upstream source of raw listing rows
#[async_trait]
pub trait SearchBackend: Send + Sync {
    /// Fetch raw rows for a query
    ///
    /// Implementations must fail with [`SearchError`] on upstream failure;
    /// an empty Vec means genuinely zero matches.
    async fn search(&self, query: &SearchQuery) -> Result<Vec<serde_json::Value>, SearchError>;
}

/// Run a search: fetch rows, map to typed listings, re-apply bounds locally
pub async fn run_search(backend: &dyn SearchBackend, query: &SearchQuery) -> Result<Vec<Listing>, SearchError> {
    debug!(location = %query.location, "run_search: called");
    let rows = backend.search(query).await?;
    let listings = map_rows(&rows);

    // The upstream filter is advisory; the local bounds are authoritative
    let criteria = query.criteria();
    let (filtered, count) = filter_and_sort(&listings, &criteria, None, true);
    debug!(raw = rows.len(), mapped = listings.len(), kept = count, "run_search: done");
    Ok(filtered)
}
