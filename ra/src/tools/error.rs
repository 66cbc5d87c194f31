//! Tool error types

use thiserror::Error;

/// Errors raised inside tool implementations
///
/// Tools surface these to the LLM as error results rather than
/// propagating them out of the agent loop.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ToolError {
    /// Filter call with no criteria and no sort - nothing to do
    #[error("Request is empty: provide at least one filter bound or a sort field")]
    EmptyRequest,

    #[error("Invalid tool input: {0}")]
    InvalidInput(String),

    /// A tool needs session state an earlier tool has not produced yet
    #[error("Missing context: {0}")]
    MissingContext(String),
}
