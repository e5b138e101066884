//! Repository trait for the remote job-search endpoint.

use crate::domain::entities::RawJobRecord;
use crate::error::AppError;
use async_trait::async_trait;
use serde_json::Value;

/// Black-box job-search API.
///
/// One call is one network round trip; retrying is the caller's concern.
///
/// # Implementations
///
/// - [`crate::infrastructure::http::HttpJobSearchApi`] - JSON over HTTP via `reqwest`
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait JobSearchApi: Send + Sync {
    /// Submits one search payload and returns the postings it yielded.
    ///
    /// An absent, `null` or malformed body yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Fetch`] on network errors, timeouts and non-2xx
    /// responses.
    async fn search(&self, payload: &Value) -> Result<Vec<RawJobRecord>, AppError>;
}
