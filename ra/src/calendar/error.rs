//! Calendar error types

use thiserror::Error;

/// Errors from calendar access
///
/// Credential and API failures surface as distinct kinds; nothing is
/// silently swallowed.
#[derive(Debug, Error)]
pub enum CalendarError {
    #[error("Calendar credentials unavailable: {0}")]
    MissingCredentials(String),

    #[error("Calendar API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid calendar response: {0}")]
    InvalidResponse(String),
}
