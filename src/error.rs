//! Application error taxonomy.
//!
//! Every fallible operation in the library returns [`AppError`]. Each variant
//! carries a human-readable message and structured JSON details that end up
//! in the log line reporting the failure.

use serde_json::{Value, json};
use validator::ValidationErrors;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Run input or configuration rejected before any network call.
    #[error("Invalid input: {message}")]
    Validation { message: String, details: Value },

    /// A search request failed on every attempt.
    #[error("Search request failed: {message}")]
    Fetch { message: String, details: Value },

    /// Reading or writing the dataset / key-value store failed.
    #[error("Storage error: {message}")]
    Storage { message: String, details: Value },

    /// The notification collaborator rejected the message.
    #[error("Notification failed: {message}")]
    Notification { message: String, details: Value },

    #[error("Internal error: {message}")]
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }
    pub fn fetch(message: impl Into<String>, details: Value) -> Self {
        Self::Fetch {
            message: message.into(),
            details,
        }
    }
    pub fn storage(message: impl Into<String>, details: Value) -> Self {
        Self::Storage {
            message: message.into(),
            details,
        }
    }
    pub fn notification(message: impl Into<String>, details: Value) -> Self {
        Self::Notification {
            message: message.into(),
            details,
        }
    }
    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    /// Short machine-readable code for the variant.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation { .. } => "validation_error",
            AppError::Fetch { .. } => "fetch_error",
            AppError::Storage { .. } => "storage_error",
            AppError::Notification { .. } => "notification_error",
            AppError::Internal { .. } => "internal_error",
        }
    }

    pub fn details(&self) -> &Value {
        match self {
            AppError::Validation { details, .. }
            | AppError::Fetch { details, .. }
            | AppError::Storage { details, .. }
            | AppError::Notification { details, .. }
            | AppError::Internal { details, .. } => details,
        }
    }

    /// Returns the same error with `extra` merged into its details object.
    pub fn with_context(mut self, extra: Value) -> Self {
        let details = match &mut self {
            AppError::Validation { details, .. }
            | AppError::Fetch { details, .. }
            | AppError::Storage { details, .. }
            | AppError::Notification { details, .. }
            | AppError::Internal { details, .. } => details,
        };

        match (details, extra) {
            (Value::Object(target), Value::Object(source)) => target.extend(source),
            (details, extra) => {
                if details.is_null() {
                    *details = extra;
                }
            }
        }

        self
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let fields: serde_json::Map<String, Value> = errors
            .field_errors()
            .into_iter()
            .map(|(field, errs)| {
                let messages: Vec<String> = errs
                    .iter()
                    .map(|e| {
                        e.message
                            .as_ref()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| e.code.to_string())
                    })
                    .collect();
                (field.to_string(), json!(messages))
            })
            .collect();

        AppError::bad_request("Input validation failed", Value::Object(fields))
    }
}

/// Maps a transport-level HTTP client error to a fetch failure.
pub fn map_reqwest_error(e: reqwest::Error) -> AppError {
    let kind = if e.is_timeout() {
        "timeout"
    } else if e.is_connect() {
        "connect"
    } else if e.is_decode() {
        "decode"
    } else {
        "request"
    };

    AppError::fetch(
        e.to_string(),
        json!({ "kind": kind, "status": e.status().map(|s| s.as_u16()) }),
    )
}

/// Maps a filesystem error to a storage failure for the given path.
pub fn map_io_error(e: std::io::Error, path: &std::path::Path) -> AppError {
    AppError::storage(
        e.to_string(),
        json!({ "path": path.display().to_string(), "kind": format!("{:?}", e.kind()) }),
    )
}
