//! RentAgent - conversational rental search and viewing scheduler
//!
//! A chat agent over a rental-listings backend: search and filter
//! listings, summarize the market, then cluster chosen listings by
//! proximity and book viewings into free calendar slots.
//!
//! # Core Concepts
//!
//! - **Typed session state**: tools return typed payloads (listings,
//!   slots, plans) that the agent loop folds into the session, so the
//!   latest search, filter, or draft always wins
//! - **Tools never write**: only the agent loop mutates the session;
//!   tools read it and produce payloads
//! - **Plans are transactional**: drafting and modification build a new
//!   plan or fail, never leaving a half-applied one
//!
//! # Modules
//!
//! - [`domain`] - listings, filter criteria, slots, viewing plans
//! - [`plan`] - geodesic clustering and the viewing-plan engine
//! - [`llm`] - LLM client trait and OpenAI-compatible implementation
//! - [`search`] - listings backend and raw-row adaptation
//! - [`calendar`] - free/busy, slot computation, event CRUD
//! - [`tools`] - the toolset exposed to the planner
//! - [`agent`] - the planner loop
//! - [`repl`] - interactive chat session

pub mod agent;
pub mod calendar;
pub mod cli;
pub mod config;
pub mod domain;
pub mod filter;
pub mod llm;
pub mod plan;
pub mod repl;
pub mod search;
pub mod summary;
pub mod tools;

// Re-export commonly used types
pub use agent::{AgentEngine, SessionContext, TurnOutcome};
pub use config::{CalendarConfig, Config, LlmConfig, SearchConfig, StorageConfig};
pub use domain::{FilterCriteria, Listing, Slot, ViewingPlan};
pub use llm::{CompletionRequest, CompletionResponse, LlmClient, LlmError, OpenAIClient};
pub use plan::{DraftOutcome, PlanError};
pub use search::{HttpSearchBackend, SearchBackend, SearchError, SearchQuery};
pub use summary::{ListingStats, summarize};
pub use tools::{Tool, ToolContext, ToolError, ToolExecutor, ToolResult};
