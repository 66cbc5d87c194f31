//! Calendar provider trait and event types

use async_trait::async_trait;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::CalendarError;

/// Fields for creating or updating a calendar event
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EventRequest {
    pub summary: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

/// A calendar event as stored by the provider
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CalendarEvent {
    pub id: String,
    pub summary: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html_link: Option<String>,
}

/// Calendar access behind a trait so the agent can run against a real
/// provider or a scripted one in tests
#[async_trait]
pub trait CalendarProvider: Send + Sync {
    /// Busy intervals between `time_min` and `time_max`
    async fn free_busy(
        &self,
        time_min: NaiveDateTime,
        time_max: NaiveDateTime,
    ) -> Result<Vec<(NaiveDateTime, NaiveDateTime)>, CalendarError>;

    async fn create_event(&self, request: &EventRequest) -> Result<CalendarEvent, CalendarError>;

    async fn update_event(
        &self,
        event_id: &str,
        request: &EventRequest,
    ) -> Result<CalendarEvent, CalendarError>;

    async fn delete_event(&self, event_id: &str) -> Result<(), CalendarError>;

    async fn list_events(
        &self,
        time_min: NaiveDateTime,
        time_max: NaiveDateTime,
    ) -> Result<Vec<CalendarEvent>, CalendarError>;
}
