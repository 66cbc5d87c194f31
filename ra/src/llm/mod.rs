//! LLM planner client
//!
//! Provider-agnostic message/tool types, the [`LlmClient`] trait, and an
//! OpenAI-compatible chat-completions implementation.

mod client;
mod error;
mod openai;
mod types;

pub use client::LlmClient;
#[cfg(test)]
pub use client::mock::MockLlmClient;
pub use error::LlmError;
pub use openai::OpenAIClient;
pub use types::{
    CompletionRequest, CompletionResponse, ContentBlock, Message, MessageContent, Role, StopReason, TokenUsage,
    ToolCall, ToolDefinition,
};
