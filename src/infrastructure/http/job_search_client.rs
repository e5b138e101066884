//! `reqwest`-backed [`JobSearchApi`] implementation.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::{Value, json};
use tracing::{debug, warn};

use crate::domain::entities::RawJobRecord;
use crate::domain::repositories::JobSearchApi;
use crate::error::{AppError, map_reqwest_error};

/// Longest error body kept in error details.
const MAX_ERROR_BODY: usize = 512;

/// JSON-over-HTTP client for the job-search endpoint.
///
/// Every call is a `POST` of the request payload; the response body is
/// expected to be a JSON array of postings.
pub struct HttpJobSearchApi {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpJobSearchApi {
    /// Creates a client with a per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the HTTP client cannot be built.
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| {
                AppError::internal(
                    "Failed to build HTTP client",
                    json!({ "reason": e.to_string() }),
                )
            })?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }
}

#[async_trait]
impl JobSearchApi for HttpJobSearchApi {
    async fn search(&self, payload: &Value) -> Result<Vec<RawJobRecord>, AppError> {
        let resp = self
            .client
            .post(&self.endpoint)
            .json(payload)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(AppError::fetch(
                format!("Search API responded with HTTP {}", status.as_u16()),
                json!({ "status": status.as_u16(), "body": truncate(&body, MAX_ERROR_BODY) }),
            ));
        }

        let body = resp.text().await.map_err(map_reqwest_error)?;
        Ok(parse_records(&body))
    }
}

/// Decodes a response body into postings.
///
/// Empty bodies and `null` yield no records. A JSON array yields its object
/// elements; other elements are skipped. Anything else is logged as a
/// malformed response and yields no records.
pub fn parse_records(body: &str) -> Vec<RawJobRecord> {
    if body.trim().is_empty() {
        return Vec::new();
    }

    match serde_json::from_str::<Value>(body) {
        Ok(Value::Null) => Vec::new(),
        Ok(Value::Array(items)) => {
            let total = items.len();
            let records: Vec<RawJobRecord> =
                items.into_iter().filter_map(RawJobRecord::from_value).collect();

            if records.len() < total {
                debug!(skipped = total - records.len(), "Skipped non-object items in response");
            }
            records
        }
        Ok(other) => {
            warn!(body = %truncate(&other.to_string(), 120), "Search API returned a non-array body");
            Vec::new()
        }
        Err(e) => {
            warn!(error = %e, "Search API returned an undecodable body");
            Vec::new()
        }
    }
}

fn truncate(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((idx, _)) => format!("{}…", &text[..idx]),
        None => text.to_string(),
    }
}
