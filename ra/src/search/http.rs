//! HTTP search backend

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

use super::{SearchBackend, SearchError, SearchQuery};

/// Search backend over a JSON HTTP endpoint
///
/// Posts the query and expects either a bare array of rows or an object
/// with a `rows` field.
pub struct HttpSearchBackend {
    endpoint: String,
    http: Client,
}

impl HttpSearchBackend {
    pub fn new(endpoint: impl Into<String>, timeout_ms: u64) -> Result<Self, SearchError> {
        let http = Client::builder()
            .timeout(Duration::from_millis(timeout_ms))
            .build()
            .map_err(SearchError::Network)?;
        Ok(Self {
            endpoint: endpoint.into(),
            http,
        })
    }
}

#[async_trait]
impl SearchBackend for HttpSearchBackend {
    async fn search(&self, query: &SearchQuery) -> Result<Vec<Value>, SearchError> {
        debug!(endpoint = %self.endpoint, location = %query.location, "HttpSearchBackend::search: called");

        let response = self
            .http
            .post(&self.endpoint)
            .json(query)
            .send()
            .await
            .map_err(SearchError::Network)?;

        let status = response.status().as_u16();
        if !response.status().is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(SearchError::Api { status, message });
        }

        let body: Value = response.json().await.map_err(SearchError::Network)?;
        let rows = match body {
            Value::Array(rows) => rows,
            Value::Object(mut map) => match map.remove("rows") {
                Some(Value::Array(rows)) => rows,
                _ => {
                    return Err(SearchError::InvalidResponse(
                        "expected an array of rows or an object with a rows field".to_string(),
                    ));
                }
            },
            _ => {
                return Err(SearchError::InvalidResponse(
                    "expected an array of rows or an object with a rows field".to_string(),
                ));
            }
        };

        debug!(row_count = rows.len(), "HttpSearchBackend::search: done");
        Ok(rows)
    }
}
