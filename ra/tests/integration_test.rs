//! End-to-end agent flows with scripted planner, search, and calendar

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::NaiveDateTime;
use serde_json::{Value, json};
use tokio::sync::Mutex;

use rentagent::agent::{AgentEngine, SessionContext, TurnOutcome};
use rentagent::calendar::{CalendarError, CalendarEvent, CalendarProvider, EventRequest};
use rentagent::llm::{CompletionRequest, CompletionResponse, LlmClient, LlmError, StopReason, TokenUsage, ToolCall};
use rentagent::search::{SearchBackend, SearchError, SearchQuery};
use rentagent::tools::{ToolContext, ToolExecutor};

/// Planner that replays a fixed script of responses
struct ScriptedLlm {
    responses: Vec<CompletionResponse>,
    calls: AtomicUsize,
}

impl ScriptedLlm {
    fn new(responses: Vec<CompletionResponse>) -> Self {
        Self {
            responses,
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl LlmClient for ScriptedLlm {
    async fn complete(&self, _request: CompletionRequest) -> Result<CompletionResponse, LlmError> {
        let idx = self.calls.fetch_add(1, Ordering::SeqCst);
        self.responses
            .get(idx)
            .cloned()
            .ok_or_else(|| LlmError::InvalidResponse("script exhausted".to_string()))
    }
}

/// Search backend that replays row batches, one per call
struct ScriptedSearch {
    batches: Mutex<Vec<Vec<Value>>>,
}

impl ScriptedSearch {
    fn new(batches: Vec<Vec<Value>>) -> Self {
        Self {
            batches: Mutex::new(batches),
        }
    }
}

#[async_trait]
impl SearchBackend for ScriptedSearch {
    async fn search(&self, _query: &SearchQuery) -> Result<Vec<Value>, SearchError> {
        let mut batches = self.batches.lock().await;
        if batches.is_empty() {
            return Ok(vec![]);
        }
        Ok(batches.remove(0))
    }
}

/// Calendar with no busy intervals and an in-memory event list
#[derive(Default)]
struct OpenCalendar {
    events: Mutex<Vec<CalendarEvent>>,
}

#[async_trait]
impl CalendarProvider for OpenCalendar {
    async fn free_busy(
        &self,
        _time_min: NaiveDateTime,
        _time_max: NaiveDateTime,
    ) -> Result<Vec<(NaiveDateTime, NaiveDateTime)>, CalendarError> {
        Ok(vec![])
    }

    async fn create_event(&self, request: &EventRequest) -> Result<CalendarEvent, CalendarError> {
        let mut events = self.events.lock().await;
        let event = CalendarEvent {
            id: format!("evt{}", events.len() + 1),
            summary: request.summary.clone(),
            description: request.description.clone(),
            location: request.location.clone(),
            start: request.start,
            end: request.end,
            html_link: None,
        };
        events.push(event.clone());
        Ok(event)
    }

    async fn update_event(&self, event_id: &str, _request: &EventRequest) -> Result<CalendarEvent, CalendarError> {
        Err(CalendarError::Api {
            status: 404,
            message: format!("event {event_id} not found"),
        })
    }

    async fn delete_event(&self, _event_id: &str) -> Result<(), CalendarError> {
        Ok(())
    }

    async fn list_events(
        &self,
        _time_min: NaiveDateTime,
        _time_max: NaiveDateTime,
    ) -> Result<Vec<CalendarEvent>, CalendarError> {
        Ok(self.events.lock().await.clone())
    }
}

fn reply(text: &str) -> CompletionResponse {
    CompletionResponse {
        content: Some(text.to_string()),
        tool_calls: vec![],
        stop_reason: StopReason::EndTurn,
        usage: TokenUsage::default(),
    }
}

fn calls(tool_calls: Vec<(&str, &str, Value)>) -> CompletionResponse {
    CompletionResponse {
        content: None,
        tool_calls: tool_calls
            .into_iter()
            .map(|(id, name, input)| ToolCall {
                id: id.to_string(),
                name: name.to_string(),
                input,
            })
            .collect(),
        stop_reason: StopReason::ToolUse,
        usage: TokenUsage::default(),
    }
}

fn row(mls: &str, address: &str, rent: &str, bedrooms: u32, lat: f64, lon: f64) -> Value {
    json!({
        "MLS": mls,
        "Address": address,
        "Bedrooms": bedrooms,
        "Rent": rent,
        "Latitude": lat,
        "Longitude": lon,
    })
}

fn engine(llm: ScriptedLlm, search: ScriptedSearch) -> AgentEngine {
    let ctx = ToolContext::new(
        Arc::new(search),
        Arc::new(OpenCalendar::default()),
        Arc::new(Mutex::new(SessionContext::new())),
        "it-conversation",
    );
    AgentEngine::new(Arc::new(llm), ToolExecutor::with_slot_duration(60), ctx)
}

#[tokio::test]
async fn search_then_filter_narrows_the_session() {
    let llm = ScriptedLlm::new(vec![
        calls(vec![(
            "t1",
            "rental_search",
            json!({"location": "Vancouver", "min_bedrooms": 1}),
        )]),
        reply("Loaded three listings."),
        calls(vec![("t2", "filter_listings", json!({"rent_max": 2200.0}))]),
        reply("Two fit the budget."),
    ]);
    let search = ScriptedSearch::new(vec![vec![
        row("R1", "101 Water St", "$2,500", 2, 49.284, -123.106),
        row("R2", "202 Main St", "$2,100", 2, 49.282, -123.100),
        row("R3", "303 Oak St", "$1,900", 1, 49.263, -123.114),
    ]]);
    let mut agent = engine(llm, search);

    agent.turn("find rentals in Vancouver").await.unwrap();
    {
        let session = agent.context().session.lock().await;
        assert_eq!(session.listings.len(), 3);
    }

    agent.turn("keep the ones under 2200").await.unwrap();
    let session = agent.context().session.lock().await;
    let ids: Vec<&str> = session.listings.iter().map(|l| l.id.as_str()).collect();
    assert_eq!(ids, vec!["R2", "R3"]);
}

#[tokio::test]
async fn repeated_searches_latest_wins() {
    let llm = ScriptedLlm::new(vec![
        calls(vec![(
            "t1",
            "rental_search",
            json!({"location": "Vancouver", "min_bedrooms": 1}),
        )]),
        calls(vec![(
            "t2",
            "rental_search",
            json!({"location": "Burnaby", "min_bedrooms": 1}),
        )]),
        reply("Switched to Burnaby."),
    ]);
    let search = ScriptedSearch::new(vec![
        vec![row("V1", "1 Vancouver St", "$2,000", 1, 49.28, -123.11)],
        vec![
            row("B1", "1 Burnaby Ave", "$1,800", 1, 49.25, -122.98),
            row("B2", "2 Burnaby Ave", "$1,900", 1, 49.25, -122.97),
        ],
    ]);
    let mut agent = engine(llm, search);

    agent.turn("actually search Burnaby instead").await.unwrap();
    let session = agent.context().session.lock().await;
    assert_eq!(session.listings.len(), 2);
    assert!(session.listings.iter().all(|l| l.id.starts_with('B')));
}

#[tokio::test]
async fn full_viewing_flow_with_user_approval() {
    let llm = ScriptedLlm::new(vec![
        // Turn 1: load listings, then ask which to view
        calls(vec![(
            "t1",
            "rental_search",
            json!({"location": "Vancouver", "min_bedrooms": 1}),
        )]),
        calls(vec![(
            "t2",
            "ask_user",
            json!({
                "prompt": "Which listings should I schedule?",
                "choices": [
                    "[1] 101 Water St — $2,500 (id: R1)",
                    "[2] 202 Main St — $2,100 (id: R2)",
                    "[3] 303 Oak St — $1,900 (id: R3)"
                ],
                "allow_multiple": true
            }),
        )]),
        // Turn 2 (after the answer): fetch slots, draft, report
        calls(vec![(
            "t3",
            "calendar_get_available_slots",
            json!({"preferred_times": "weekday evenings 6-8pm", "days_ahead": 7}),
        )]),
        calls(vec![("t4", "draft_viewing_plan", json!({}))]),
        reply("Here is the plan."),
    ]);
    let search = ScriptedSearch::new(vec![vec![
        row("R1", "101 Water St", "$2,500", 2, 49.284, -123.106),
        row("R2", "202 Main St", "$2,100", 2, 49.282, -123.100),
        row("R3", "303 Oak St", "$1,900", 1, 49.263, -123.114),
    ]]);
    let mut agent = engine(llm, search);

    let outcome = agent.turn("set up viewings for some rentals").await.unwrap();
    let request = match outcome {
        TurnOutcome::AskUser(request) => request,
        other => panic!("expected AskUser, got {other:?}"),
    };
    assert_eq!(request.choices.len(), 3);

    let outcome = agent.turn("1, 2").await.unwrap();
    assert!(matches!(outcome, TurnOutcome::Reply(_)));

    let session = agent.context().session.lock().await;
    assert_eq!(session.selected_listing_ids, vec!["R1".to_string(), "R2".to_string()]);

    let plan = session.plan.as_ref().expect("a plan should have been drafted");
    assert_eq!(plan.len(), 2);
    assert!(plan.contains_listing("R1"));
    assert!(plan.contains_listing("R2"));
    assert!(!plan.contains_listing("R3"));
    assert!(plan.invariants_hold());

    // R1 and R2 are ~500m apart: one cluster, consecutive slots
    let starts: Vec<_> = plan.entries.iter().map(|e| e.start_datetime).collect();
    assert!(starts[0] < starts[1]);
}

#[tokio::test]
async fn failed_modification_leaves_plan_intact() {
    let llm = ScriptedLlm::new(vec![
        calls(vec![(
            "t1",
            "rental_search",
            json!({"location": "Vancouver", "min_bedrooms": 1}),
        )]),
        calls(vec![("t2", "calendar_get_available_slots", json!({"days_ahead": 7}))]),
        calls(vec![("t3", "draft_viewing_plan", json!({}))]),
        // Removing a listing that is not in the plan fails the whole batch
        calls(vec![(
            "t4",
            "modify_viewing_plan",
            json!({"remove": ["NOPE"], "add": []}),
        )]),
        reply("That change did not apply."),
    ]);
    let search = ScriptedSearch::new(vec![vec![
        row("R1", "101 Water St", "$2,500", 2, 49.284, -123.106),
        row("R2", "202 Main St", "$2,100", 2, 49.282, -123.100),
    ]]);
    let mut agent = engine(llm, search);

    let outcome = agent.turn("plan viewings then drop NOPE").await.unwrap();
    assert!(matches!(outcome, TurnOutcome::Reply(_)));

    let session = agent.context().session.lock().await;
    let plan = session.plan.as_ref().expect("the draft should survive");
    assert_eq!(plan.len(), 2);
    assert!(plan.contains_listing("R1"));
    assert!(plan.contains_listing("R2"));
}

#[tokio::test]
async fn invalid_rows_are_skipped_not_fatal() {
    let llm = ScriptedLlm::new(vec![
        calls(vec![(
            "t1",
            "rental_search",
            json!({"location": "Vancouver", "min_bedrooms": 1}),
        )]),
        reply("One listing survived."),
    ]);
    let search = ScriptedSearch::new(vec![vec![
        row("R1", "101 Water St", "$2,500", 2, 49.284, -123.106),
        json!({"MLS": "R2", "Bedrooms": 2}),
        json!({"Address": "no id here", "Bedrooms": 1, "Rent": "$1,500"}),
    ]]);
    let mut agent = engine(llm, search);

    agent.turn("search Vancouver").await.unwrap();
    let session = agent.context().session.lock().await;
    assert_eq!(session.listings.len(), 1);
    assert_eq!(session.listings[0].id, "R1");
}
