//! AgentEngine - transcript, planner loop, and tool dispatch

use serde_json::json;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

use crate::llm::{CompletionRequest, ContentBlock, LlmClient, LlmError, Message, StopReason};
use crate::plan::{DEFAULT_CLUSTER_THRESHOLD_KM, draft};
use crate::tools::{AskUserRequest, ToolContext, ToolExecutor, ToolPayload};

use super::prompts;
use super::session::PendingAsk;

/// Cap on planner round-trips within one user turn
pub const MAX_ITERATIONS: usize = 10;

const DEFAULT_MAX_TOKENS: u32 = 4096;

/// Errors from the agent loop
#[derive(Debug, Error)]
pub enum AgentError {
    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    #[error("No question is pending")]
    NoPendingAsk,
}

/// How a user turn ended
#[derive(Debug)]
pub enum TurnOutcome {
    /// Final assistant text for this turn
    Reply(String),

    /// The agent needs an answer before it can continue
    AskUser(AskUserRequest),
}

/// Drives one conversation: planner calls, tool dispatch, session folding
pub struct AgentEngine {
    llm: Arc<dyn LlmClient>,
    executor: ToolExecutor,
    ctx: ToolContext,
    transcript: Vec<Message>,
    system_prompt: String,
    max_tokens: u32,
}

impl AgentEngine {
    pub fn new(llm: Arc<dyn LlmClient>, executor: ToolExecutor, ctx: ToolContext) -> Self {
        debug!(conversation_id = %ctx.conversation_id, "AgentEngine::new: called");
        Self {
            llm,
            executor,
            ctx,
            transcript: Vec::new(),
            system_prompt: prompts::system_prompt(),
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }

    /// Replace the system prompt, e.g. to append saved user preferences
    pub fn set_system_prompt(&mut self, prompt: String) {
        self.system_prompt = prompt;
    }

    /// The tool context this engine dispatches with
    pub fn context(&self) -> &ToolContext {
        &self.ctx
    }

    /// Drop the transcript and all session state
    pub async fn reset(&mut self) {
        debug!("AgentEngine::reset: called");
        self.transcript.clear();
        self.ctx.session.lock().await.clear();
    }

    /// Process one user input
    ///
    /// When a question is pending, the input is its answer; otherwise it
    /// starts a fresh planner turn.
    pub async fn turn(&mut self, user_input: &str) -> Result<TurnOutcome, AgentError> {
        debug!("AgentEngine::turn: called");
        let pending = self.ctx.session.lock().await.pending_ask.take();
        match pending {
            Some(pending) => self.resume(pending, user_input).await,
            None => {
                self.transcript.push(Message::user(user_input));
                self.run().await
            }
        }
    }

    /// Feed the user's answer back as the pending ask's tool result
    ///
    /// The wire shape is `{"selected": [...]}` for resolved choices (empty
    /// means the user chose none) and `{"answer": "..."}` for free text.
    async fn resume(&mut self, pending: PendingAsk, answer: &str) -> Result<TurnOutcome, AgentError> {
        debug!(tool_use_id = %pending.tool_use_id, "AgentEngine::resume: called");
        let resolved = resolve_answer(&pending.request, answer);

        if let UserAnswer::Selected(choices) = &resolved {
            let selected_ids: Vec<String> = choices
                .iter()
                .filter_map(|s| super::listing_id_from_label(s).map(str::to_string))
                .collect();
            if !selected_ids.is_empty() {
                debug!(count = selected_ids.len(), "AgentEngine::resume: user selected listings");
                self.ctx.session.lock().await.selected_listing_ids = selected_ids;
            }
        }

        let content = match &resolved {
            UserAnswer::Text(text) => json!({ "answer": text }).to_string(),
            UserAnswer::Selected(choices) => json!({ "selected": choices }).to_string(),
        };
        self.transcript.push(Message::user_blocks(vec![ContentBlock::tool_result(
            pending.tool_use_id,
            content,
            false,
        )]));
        self.run().await
    }

    /// The planner loop: complete, dispatch tools, fold payloads, repeat
    async fn run(&mut self) -> Result<TurnOutcome, AgentError> {
        let mut drafted_this_turn = false;
        let mut slots_fetched_this_turn = false;
        let mut last_text = String::new();

        for iteration in 0..MAX_ITERATIONS {
            debug!(iteration, "AgentEngine::run: planner call");
            let request = CompletionRequest {
                system_prompt: self.system_prompt.clone(),
                messages: self.transcript.clone(),
                tools: self.executor.definitions(),
                max_tokens: self.max_tokens,
            };
            let response = self.llm.complete(request).await?;
            debug!(
                input_tokens = response.usage.input_tokens,
                output_tokens = response.usage.output_tokens,
                tool_calls = response.tool_calls.len(),
                "AgentEngine::run: planner responded"
            );

            let mut blocks = Vec::new();
            if let Some(text) = &response.content
                && !text.is_empty()
            {
                last_text = text.clone();
                blocks.push(ContentBlock::text(text));
            }
            for call in &response.tool_calls {
                blocks.push(ContentBlock::ToolUse {
                    id: call.id.clone(),
                    name: call.name.clone(),
                    input: call.input.clone(),
                });
            }
            if !blocks.is_empty() {
                self.transcript.push(Message::assistant_blocks(blocks));
            }

            if response.tool_calls.is_empty() || response.stop_reason != StopReason::ToolUse {
                let reply = self.finish_turn(last_text, drafted_this_turn, slots_fetched_this_turn).await;
                return Ok(TurnOutcome::Reply(reply));
            }

            let results = self.executor.execute_all(&response.tool_calls, &self.ctx).await;

            let mut result_blocks = Vec::new();
            let mut ask: Option<PendingAsk> = None;
            {
                let mut session = self.ctx.session.lock().await;
                for (tool_use_id, result) in &results {
                    if let Some(payload) = &result.payload {
                        match payload {
                            ToolPayload::Ask(request) => {
                                if ask.is_none() {
                                    // The answer will arrive as this call's
                                    // tool result on the next turn
                                    ask = Some(PendingAsk {
                                        tool_use_id: tool_use_id.clone(),
                                        request: request.clone(),
                                    });
                                } else {
                                    result_blocks.push(ContentBlock::tool_result(
                                        tool_use_id.clone(),
                                        "A question is already pending; ask this one after it is answered",
                                        true,
                                    ));
                                }
                                continue;
                            }
                            ToolPayload::Plan(_) => {
                                drafted_this_turn = true;
                                session.apply_payload(payload);
                            }
                            ToolPayload::Slots(_) => {
                                slots_fetched_this_turn = true;
                                session.apply_payload(payload);
                            }
                            _ => session.apply_payload(payload),
                        }
                    }
                    result_blocks.push(ContentBlock::tool_result(
                        tool_use_id.clone(),
                        result.content.clone(),
                        result.is_error,
                    ));
                }
                if let Some(pending) = &ask {
                    session.pending_ask = Some(pending.clone());
                }
            }

            if !result_blocks.is_empty() {
                self.transcript.push(Message::user_blocks(result_blocks));
            }
            if let Some(pending) = ask {
                return Ok(TurnOutcome::AskUser(pending.request));
            }
        }

        warn!("AgentEngine::run: iteration cap reached");
        let reply = self.finish_turn(last_text, drafted_this_turn, slots_fetched_this_turn).await;
        Ok(TurnOutcome::Reply(reply))
    }

    /// Close out a turn, drafting a plan if the planner forgot to
    ///
    /// When the user has selected listings and slots were fetched this
    /// turn but no draft happened and no plan exists, draft one directly
    /// so the turn never ends with the logistics half-done.
    async fn finish_turn(
        &self,
        mut reply: String,
        drafted_this_turn: bool,
        slots_fetched_this_turn: bool,
    ) -> String {
        let mut session = self.ctx.session.lock().await;
        let should_draft = !drafted_this_turn
            && slots_fetched_this_turn
            && session.plan.is_none()
            && !session.slots.is_empty()
            && !session.selected_listing_ids.is_empty();
        if should_draft {
            debug!("AgentEngine::finish_turn: drafting fallback plan");
            let listings = session.selected_listings();
            match draft(&listings, &session.slots, DEFAULT_CLUSTER_THRESHOLD_KM) {
                Ok(outcome) => {
                    let lines: Vec<String> = outcome
                        .plan
                        .entries
                        .iter()
                        .map(|e| format!("- {} at {}", e.listing_address, e.slot_display))
                        .collect();
                    if !reply.is_empty() {
                        reply.push_str("\n\n");
                    }
                    reply.push_str(&format!("Draft viewing plan:\n{}", lines.join("\n")));
                    session.unused_slots = outcome.unused_slots;
                    session.plan = Some(outcome.plan);
                }
                Err(e) => {
                    debug!(error = %e, "AgentEngine::finish_turn: fallback draft failed");
                }
            }
        }
        reply
    }
}

/// A user answer in its wire form
#[derive(Debug, Clone, PartialEq)]
enum UserAnswer {
    /// Free text, serialized as `{"answer": "..."}`
    Text(String),
    /// Resolved choices, serialized as `{"selected": [...]}`; empty means
    /// the user chose none
    Selected(Vec<String>),
}

/// Map the user's raw answer onto the ask's choices
///
/// Numbers pick the corresponding choice (1-based), exact text matches a
/// choice, comma-separated tokens select several when allow_multiple is
/// on, and "none" (or a blank answer) selects nothing. Anything else
/// passes through as free text.
fn resolve_answer(request: &AskUserRequest, answer: &str) -> UserAnswer {
    let answer = answer.trim();
    if request.choices.is_empty() {
        return UserAnswer::Text(answer.to_string());
    }

    if request.allow_multiple && (answer.is_empty() || answer.eq_ignore_ascii_case("none")) {
        return UserAnswer::Selected(vec![]);
    }

    let tokens: Vec<&str> = if request.allow_multiple {
        answer.split(',').map(str::trim).filter(|t| !t.is_empty()).collect()
    } else {
        vec![answer]
    };

    let mut picked = Vec::new();
    for token in tokens {
        if let Ok(n) = token.trim_start_matches('[').trim_end_matches(']').parse::<usize>()
            && (1..=request.choices.len()).contains(&n)
        {
            picked.push(request.choices[n - 1].clone());
            continue;
        }
        if let Some(choice) = request.choices.iter().find(|c| c.eq_ignore_ascii_case(token)) {
            picked.push(choice.clone());
            continue;
        }
        // Unrecognized token: the whole answer is free text
        return UserAnswer::Text(answer.to_string());
    }
    UserAnswer::Selected(picked)
}
