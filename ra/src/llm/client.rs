//! LlmClient trait definition

use async_trait::async_trait;

use super::{CompletionRequest, CompletionResponse, LlmError};

/// Stateless planner client
///
/// The conversation lives in the request's message list; the client holds
/// no state between calls, so one client instance serves any number of
/// conversations.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Send one completion request, blocking until the full response
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError>;
}
