//! PrefStore - flat key/value preferences store
//!
//! Persists user preferences (default search location, preferred viewing
//! times, and the like) as a single JSON object on disk. Read on load,
//! written on explicit save; single user, single process.
//!
//! # Layout
//!
//! ```text
//! ~/.local/share/prefstore/prefs.json
//! ```
//!
//! # Example
//!
//! ```ignore
//! use prefstore::PrefStore;
//!
//! let store = PrefStore::open("~/.local/share/prefstore")?;
//! store.set("default-location", "Vancouver, BC")?;
//! let loc = store.get("default-location")?;
//! ```

pub mod cli;
pub mod config;
mod store;

pub use store::{PrefStore, StoreError};

/// File name of the on-disk preferences document
pub const PREFS_FILE: &str = "prefs.json";
