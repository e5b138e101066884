//! Single-request fetching with bounded retry.

use std::sync::Arc;
use std::time::Duration;

use serde_json::{Value, json};
use tokio_retry::Retry;
use tokio_retry::strategy::FixedInterval;

use crate::domain::entities::{AtomicRequest, RawJobRecord};
use crate::domain::repositories::JobSearchApi;
use crate::error::AppError;

/// How a failed search request is retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchPolicy {
    /// Fixed pause before each retry.
    pub retry_delay: Duration,
    /// Retries after the first attempt.
    pub max_retries: usize,
}

impl Default for FetchPolicy {
    fn default() -> Self {
        Self {
            retry_delay: Duration::from_secs(2),
            max_retries: 1,
        }
    }
}

/// Postings returned by one request and the attempts it took.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchOutcome {
    pub records: Vec<RawJobRecord>,
    pub attempts: usize,
}

/// Executes one [`AtomicRequest`] against the search API.
///
/// A failed attempt is retried after a fixed delay, up to
/// [`FetchPolicy::max_retries`] times. When every attempt fails the last
/// error is returned; callers treat it as fatal for the run.
pub struct FetchService<A: JobSearchApi> {
    api: Arc<A>,
    policy: FetchPolicy,
}

impl<A: JobSearchApi> FetchService<A> {
    pub fn new(api: Arc<A>, policy: FetchPolicy) -> Self {
        Self { api, policy }
    }

    /// Sends `payload` for `request`, retrying on failure.
    ///
    /// # Errors
    ///
    /// Returns the last attempt's [`AppError`] with the request coordinates
    /// and attempt count merged into its details.
    pub async fn fetch(
        &self,
        request: &AtomicRequest,
        payload: &Value,
    ) -> Result<FetchOutcome, AppError> {
        let strategy = FixedInterval::new(self.policy.retry_delay).take(self.policy.max_retries);
        let max_attempts = self.policy.max_retries + 1;
        let api = &self.api;
        let mut attempt = 0usize;

        let result = Retry::start(strategy, || {
            attempt += 1;
            let current = attempt;
            async move {
                tracing::info!(
                    source = %request.source,
                    location = %request.location,
                    page = request.page,
                    attempt = current,
                    max_attempts,
                    "Searching jobs"
                );

                api.search(payload).await.inspect_err(|e| {
                    tracing::warn!(
                        source = %request.source,
                        location = %request.location,
                        page = request.page,
                        attempt = current,
                        max_attempts,
                        error = %e,
                        "Search attempt failed"
                    );
                })
            }
        })
        .await;

        match result {
            Ok(records) => {
                tracing::info!(
                    source = %request.source,
                    location = %request.location,
                    page = request.page,
                    count = records.len(),
                    "Received jobs"
                );
                Ok(FetchOutcome {
                    records,
                    attempts: attempt,
                })
            }
            Err(e) => Err(e.with_context(json!({
                "source": request.source,
                "location": request.location,
                "page": request.page,
                "attempts": attempt,
            }))),
        }
    }
}
