//! One unit of work sent to the remote search API.

use serde_json::{Value, json};

use super::search_config::{DatePosted, SearchConfig};
use crate::error::AppError;

/// A single `(source, location, page)` search request.
///
/// Produced by [`crate::application::services::SearchPlanner`] and consumed
/// exactly once by the fetch stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AtomicRequest {
    pub source: String,
    /// Trimmed location; empty means no location filter.
    pub location: String,
    /// 1-based page number.
    pub page: u32,
    /// Normalized keyword shared by every request of the run.
    pub keyword: String,
    pub date_posted: DatePosted,
}

impl AtomicRequest {
    /// Builds the JSON body the remote API expects for this request.
    ///
    /// All fields of the run input are forwarded; `includeKeyword`,
    /// `locationName`, `page`, `source` and `datePosted` are overridden with
    /// this request's values.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the run input cannot be serialized.
    pub fn payload(&self, config: &SearchConfig) -> Result<Value, AppError> {
        let mut body = match serde_json::to_value(config) {
            Ok(Value::Object(map)) => map,
            Ok(other) => {
                return Err(AppError::internal(
                    "Search configuration did not serialize to an object",
                    json!({ "type": json_type(&other) }),
                ));
            }
            Err(e) => {
                return Err(AppError::internal(
                    "Failed to serialize search configuration",
                    json!({ "reason": e.to_string() }),
                ));
            }
        };

        body.insert("includeKeyword".into(), json!(self.keyword));
        body.insert("locationName".into(), json!(self.location));
        body.insert("page".into(), json!(self.page));
        body.insert("source".into(), json!(self.source));
        body.insert("datePosted".into(), json!(self.date_posted.as_str()));

        Ok(Value::Object(body))
    }

    /// Log-friendly label, e.g. `linkedin/Berlin#2`.
    pub fn label(&self) -> String {
        let location: &str = if self.location.is_empty() {
            "<any>"
        } else {
            &self.location
        };
        format!("{}/{}#{}", self.source, location, self.page)
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
