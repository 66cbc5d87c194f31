//! ToolContext - execution context for tools

use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

use crate::agent::SessionContext;
use crate::calendar::CalendarProvider;
use crate::search::SearchBackend;

/// Execution context for tools - scoped to a single conversation
///
/// Tools read the session to see listings, slots, and the plan from
/// earlier turns. They never mutate it; the agent loop folds tool
/// payloads back into the session after each result.
#[derive(Clone)]
pub struct ToolContext {
    pub search: Arc<dyn SearchBackend>,
    pub calendar: Arc<dyn CalendarProvider>,
    pub session: Arc<Mutex<SessionContext>>,
    pub conversation_id: String,
}

impl ToolContext {
    pub fn new(
        search: Arc<dyn SearchBackend>,
        calendar: Arc<dyn CalendarProvider>,
        session: Arc<Mutex<SessionContext>>,
        conversation_id: impl Into<String>,
    ) -> Self {
        let conversation_id = conversation_id.into();
        debug!(%conversation_id, "ToolContext::new: called");
        Self {
            search,
            calendar,
            session,
            conversation_id,
        }
    }
}

impl std::fmt::Debug for ToolContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolContext")
            .field("conversation_id", &self.conversation_id)
            .finish()
    }
}
