//! Google Calendar provider

use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime};
use reqwest::Client;
use serde_json::{Value, json};
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::debug;

use super::{CalendarError, CalendarEvent, CalendarProvider, EventRequest};

const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/calendar/v3";

/// Google Calendar API v3 client
///
/// The bearer token is read from an environment variable on first use and
/// cached for the life of the provider. Datetimes cross the wire in the
/// configured calendar timezone.
pub struct GoogleCalendarProvider {
    http: Client,
    token: Mutex<Option<String>>,
    token_env: String,
    calendar_id: String,
    timezone: String,
    base_url: String,
}

impl GoogleCalendarProvider {
    pub fn from_config(config: &crate::config::CalendarConfig) -> Result<Self, CalendarError> {
        let http = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(CalendarError::Network)?;
        Ok(Self {
            http,
            token: Mutex::new(None),
            token_env: config.token_env.clone(),
            calendar_id: config.calendar_id.clone(),
            timezone: config.timezone.clone(),
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    async fn bearer_token(&self) -> Result<String, CalendarError> {
        let mut cached = self.token.lock().await;
        if let Some(token) = cached.as_ref() {
            return Ok(token.clone());
        }
        let token = std::env::var(&self.token_env).map_err(|_| {
            CalendarError::MissingCredentials(format!(
                "environment variable {} is not set",
                self.token_env
            ))
        })?;
        *cached = Some(token.clone());
        Ok(token)
    }

    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, CalendarError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = response.text().await.unwrap_or_default();
        Err(CalendarError::Api {
            status: status.as_u16(),
            message,
        })
    }

    fn event_body(&self, request: &EventRequest) -> Value {
        let mut body = json!({
            "summary": request.summary,
            "start": { "dateTime": wire_datetime(request.start), "timeZone": self.timezone },
            "end": { "dateTime": wire_datetime(request.end), "timeZone": self.timezone },
        });
        let obj = body.as_object_mut().unwrap();
        if let Some(d) = &request.description {
            obj.insert("description".to_string(), json!(d));
        }
        if let Some(l) = &request.location {
            obj.insert("location".to_string(), json!(l));
        }
        body
    }

    fn events_url(&self) -> String {
        format!("{}/calendars/{}/events", self.base_url, self.calendar_id)
    }
}

fn wire_datetime(dt: NaiveDateTime) -> String {
    dt.format("%Y-%m-%dT%H:%M:%S").to_string()
}

/// Parse a wire datetime: RFC3339 with offset, or bare local datetime
fn parse_datetime(raw: &str) -> Result<NaiveDateTime, CalendarError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.naive_local());
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S")
        .map_err(|_| CalendarError::InvalidResponse(format!("unparseable datetime: {raw}")))
}

fn event_datetime(event: &Value, field: &str) -> Result<NaiveDateTime, CalendarError> {
    let raw = event
        .get(field)
        .and_then(|v| v.get("dateTime"))
        .and_then(Value::as_str)
        .ok_or_else(|| CalendarError::InvalidResponse(format!("event missing {field}.dateTime")))?;
    parse_datetime(raw)
}

fn parse_event(event: &Value) -> Result<CalendarEvent, CalendarError> {
    let id = event
        .get("id")
        .and_then(Value::as_str)
        .ok_or_else(|| CalendarError::InvalidResponse("event missing id".to_string()))?;
    Ok(CalendarEvent {
        id: id.to_string(),
        summary: event
            .get("summary")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        description: event
            .get("description")
            .and_then(Value::as_str)
            .map(str::to_string),
        location: event
            .get("location")
            .and_then(Value::as_str)
            .map(str::to_string),
        start: event_datetime(event, "start")?,
        end: event_datetime(event, "end")?,
        html_link: event
            .get("htmlLink")
            .and_then(Value::as_str)
            .map(str::to_string),
    })
}

#[async_trait]
impl CalendarProvider for GoogleCalendarProvider {
    async fn free_busy(
        &self,
        time_min: NaiveDateTime,
        time_max: NaiveDateTime,
    ) -> Result<Vec<(NaiveDateTime, NaiveDateTime)>, CalendarError> {
        debug!(%time_min, %time_max, "GoogleCalendarProvider::free_busy: called");
        let token = self.bearer_token().await?;
        let body = json!({
            "timeMin": wire_datetime(time_min),
            "timeMax": wire_datetime(time_max),
            "timeZone": self.timezone,
            "items": [{ "id": self.calendar_id }],
        });
        let response = self
            .http
            .post(format!("{}/freeBusy", self.base_url))
            .bearer_auth(&token)
            .json(&body)
            .send()
            .await
            .map_err(CalendarError::Network)?;
        let response = Self::check_status(response).await?;
        let body: Value = response.json().await.map_err(CalendarError::Network)?;

        let busy = body
            .get("calendars")
            .and_then(|c| c.get(&self.calendar_id))
            .and_then(|c| c.get("busy"))
            .and_then(Value::as_array)
            .ok_or_else(|| {
                CalendarError::InvalidResponse("missing calendars.<id>.busy".to_string())
            })?;

        let mut intervals = Vec::with_capacity(busy.len());
        for entry in busy {
            let start = entry
                .get("start")
                .and_then(Value::as_str)
                .ok_or_else(|| CalendarError::InvalidResponse("busy entry missing start".to_string()))?;
            let end = entry
                .get("end")
                .and_then(Value::as_str)
                .ok_or_else(|| CalendarError::InvalidResponse("busy entry missing end".to_string()))?;
            intervals.push((parse_datetime(start)?, parse_datetime(end)?));
        }
        debug!(busy_count = intervals.len(), "GoogleCalendarProvider::free_busy: done");
        Ok(intervals)
    }

    async fn create_event(&self, request: &EventRequest) -> Result<CalendarEvent, CalendarError> {
        debug!(summary = %request.summary, "GoogleCalendarProvider::create_event: called");
        let token = self.bearer_token().await?;
        let response = self
            .http
            .post(self.events_url())
            .bearer_auth(&token)
            .json(&self.event_body(request))
            .send()
            .await
            .map_err(CalendarError::Network)?;
        let response = Self::check_status(response).await?;
        let body: Value = response.json().await.map_err(CalendarError::Network)?;
        parse_event(&body)
    }

    async fn update_event(
        &self,
        event_id: &str,
        request: &EventRequest,
    ) -> Result<CalendarEvent, CalendarError> {
        debug!(%event_id, "GoogleCalendarProvider::update_event: called");
        let token = self.bearer_token().await?;
        let response = self
            .http
            .patch(format!("{}/{}", self.events_url(), event_id))
            .bearer_auth(&token)
            .json(&self.event_body(request))
            .send()
            .await
            .map_err(CalendarError::Network)?;
        let response = Self::check_status(response).await?;
        let body: Value = response.json().await.map_err(CalendarError::Network)?;
        parse_event(&body)
    }

    async fn delete_event(&self, event_id: &str) -> Result<(), CalendarError> {
        debug!(%event_id, "GoogleCalendarProvider::delete_event: called");
        let token = self.bearer_token().await?;
        let response = self
            .http
            .delete(format!("{}/{}", self.events_url(), event_id))
            .bearer_auth(&token)
            .send()
            .await
            .map_err(CalendarError::Network)?;
        Self::check_status(response).await?;
        Ok(())
    }

    async fn list_events(
        &self,
        time_min: NaiveDateTime,
        time_max: NaiveDateTime,
    ) -> Result<Vec<CalendarEvent>, CalendarError> {
        debug!(%time_min, %time_max, "GoogleCalendarProvider::list_events: called");
        let token = self.bearer_token().await?;
        let response = self
            .http
            .get(self.events_url())
            .bearer_auth(&token)
            .query(&[
                ("timeMin", wire_datetime(time_min)),
                ("timeMax", wire_datetime(time_max)),
                ("singleEvents", "true".to_string()),
                ("orderBy", "startTime".to_string()),
            ])
            .send()
            .await
            .map_err(CalendarError::Network)?;
        let response = Self::check_status(response).await?;
        let body: Value = response.json().await.map_err(CalendarError::Network)?;
        let items = body
            .get("items")
            .and_then(Value::as_array)
            .ok_or_else(|| CalendarError::InvalidResponse("missing items".to_string()))?;
        items.iter().map(parse_event).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn dt(hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, 2).unwrap().and_hms_opt(hour, 0, 0).unwrap()
    }

    #[test]
    fn test_wire_datetime_format() {
        assert_eq!(wire_datetime(dt(18)), "2026-03-02T18:00:00");
    }

    #[test]
    fn test_parse_datetime_with_and_without_offset() {
        assert_eq!(parse_datetime("2026-03-02T18:00:00-08:00").unwrap(), dt(18));
        assert_eq!(parse_datetime("2026-03-02T18:00:00").unwrap(), dt(18));
        assert!(parse_datetime("not a datetime").is_err());
    }

    #[test]
    fn test_parse_event() {
        let raw = json!({
            "id": "evt1",
            "summary": "Viewing: 123 Main St",
            "location": "123 Main St, Vancouver",
            "htmlLink": "https://calendar.google.com/event?eid=abc",
            "start": { "dateTime": "2026-03-02T18:00:00-08:00" },
            "end": { "dateTime": "2026-03-02T19:00:00-08:00" },
        });
        let event = parse_event(&raw).unwrap();
        assert_eq!(event.id, "evt1");
        assert_eq!(event.summary, "Viewing: 123 Main St");
        assert_eq!(event.start, dt(18));
        assert_eq!(event.end, dt(19));
        assert!(event.description.is_none());
    }

    #[test]
    fn test_parse_event_missing_id_rejected() {
        let raw = json!({
            "summary": "x",
            "start": { "dateTime": "2026-03-02T18:00:00" },
            "end": { "dateTime": "2026-03-02T19:00:00" },
        });
        assert!(parse_event(&raw).is_err());
    }
}
