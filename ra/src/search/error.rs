//! Search backend error types

use thiserror::Error;

/// Errors from the upstream search source
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Search backend error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid search response: {0}")]
    InvalidResponse(String),
}
