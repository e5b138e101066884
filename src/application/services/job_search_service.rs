//! Fan-out search: plan, fetch, filter and deduplicate.

use futures::StreamExt;
use futures::stream;
use indexmap::IndexMap;
use serde::Serialize;

use super::deduplicator::Deduplicator;
use super::fetch_service::FetchService;
use super::job_filter::JobFilter;
use super::search_planner::SearchPlanner;
use crate::domain::entities::{AtomicRequest, FilteredJobRecord, SearchConfig};
use crate::domain::repositories::JobSearchApi;
use crate::error::AppError;
use crate::utils::keyword_normalizer::normalize_keyword;

/// Per-source counters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SourceStats {
    pub requests: usize,
    pub fetched: usize,
    pub kept: usize,
}

/// Counts reported at the end of a search.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SearchStats {
    pub requests: usize,
    /// Requests that needed more than one attempt.
    pub retried_requests: usize,
    pub fetched: usize,
    pub filtered: usize,
    pub unique: usize,
    pub per_source: IndexMap<String, SourceStats>,
}

/// Deduplicated results of one search plus its counters.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub keyword: String,
    pub records: Vec<FilteredJobRecord>,
    pub stats: SearchStats,
}

/// Result of running one [`AtomicRequest`] through fetch and filter.
struct Batch {
    source: String,
    fetched: usize,
    attempts: usize,
    kept: Vec<FilteredJobRecord>,
}

/// Drives the search half of a run.
///
/// The keyword is normalized and the search space expanded once; each
/// request is then fetched and filtered. With a concurrency of 1 requests run
/// strictly one after another. Higher values overlap the network waits, but
/// batches are still folded into the result set in plan order, so
/// deduplication is identical to the sequential run.
///
/// The first request that fails after its retries aborts the whole search.
pub struct JobSearchService<A: JobSearchApi> {
    fetcher: FetchService<A>,
    planner: SearchPlanner,
    max_concurrency: usize,
}

impl<A: JobSearchApi> JobSearchService<A> {
    pub fn new(fetcher: FetchService<A>, planner: SearchPlanner, max_concurrency: usize) -> Self {
        Self {
            fetcher,
            planner,
            max_concurrency: max_concurrency.max(1),
        }
    }

    /// Normalized keyword and the ordered request list, without any I/O.
    pub fn plan(&self, config: &SearchConfig) -> (String, Vec<AtomicRequest>) {
        let keyword = normalize_keyword(&config.include_keyword);
        let requests = self.planner.expand(config, &keyword);
        (keyword, requests)
    }

    /// Runs every planned request and returns the deduplicated postings.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Fetch`] from the first request whose retries are
    /// exhausted. No partial result is returned.
    pub async fn search(&self, config: &SearchConfig) -> Result<SearchOutcome, AppError> {
        let (keyword, requests) = self.plan(config);
        let filter = JobFilter::from_config(config);

        tracing::info!(
            keyword = %keyword,
            requests = requests.len(),
            concurrency = self.max_concurrency,
            "Starting job search"
        );

        let mut stats = SearchStats {
            requests: requests.len(),
            ..SearchStats::default()
        };
        let mut dedup = Deduplicator::new();

        let mut batches = std::pin::pin!(
            stream::iter(requests.iter())
                .map(|request| self.process(config, &filter, request))
                .buffered(self.max_concurrency)
        );

        while let Some(batch) = batches.next().await {
            let batch = batch?;

            let source_stats = stats.per_source.entry(batch.source).or_default();
            source_stats.requests += 1;
            source_stats.fetched += batch.fetched;
            source_stats.kept += batch.kept.len();

            stats.fetched += batch.fetched;
            stats.filtered += batch.kept.len();
            if batch.attempts > 1 {
                stats.retried_requests += 1;
            }

            dedup.extend(batch.kept);
        }

        stats.unique = dedup.len();

        tracing::info!(
            fetched = stats.fetched,
            filtered = stats.filtered,
            unique = stats.unique,
            retried = stats.retried_requests,
            "Job search finished"
        );

        Ok(SearchOutcome {
            keyword,
            records: dedup.into_records(),
            stats,
        })
    }

    async fn process(
        &self,
        config: &SearchConfig,
        filter: &JobFilter,
        request: &AtomicRequest,
    ) -> Result<Batch, AppError> {
        let payload = request.payload(config)?;
        let outcome = self.fetcher.fetch(request, &payload).await?;
        let kept = filter.apply(&outcome.records, &request.source);

        tracing::debug!(
            request = %request.label(),
            fetched = outcome.records.len(),
            kept = kept.len(),
            "Filtered batch"
        );

        Ok(Batch {
            source: request.source.clone(),
            fetched: outcome.records.len(),
            attempts: outcome.attempts,
            kept,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::FetchPolicy;
    use crate::domain::entities::{LocationInput, RawJobRecord};
    use crate::domain::repositories::MockJobSearchApi;
    use serde_json::{Value, json};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    fn job(value: Value) -> RawJobRecord {
        RawJobRecord::from_value(value).unwrap()
    }

    fn service<A: JobSearchApi>(api: A, concurrency: usize) -> JobSearchService<A> {
        let policy = FetchPolicy {
            retry_delay: Duration::ZERO,
            max_retries: 1,
        };
        JobSearchService::new(
            FetchService::new(Arc::new(api), policy),
            SearchPlanner::new(vec!["default".to_string()]),
            concurrency,
        )
    }

    /// Answers later pages sooner, so overlapping requests complete out of plan order.
    #[derive(Default)]
    struct SlowFirstPagesApi {
        completed: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl JobSearchApi for SlowFirstPagesApi {
        async fn search(&self, payload: &Value) -> Result<Vec<RawJobRecord>, AppError> {
            let source = payload["source"].as_str().unwrap_or_default().to_string();
            let page = payload["page"].as_u64().unwrap_or(1);

            tokio::time::sleep(Duration::from_millis(100 * (4 - page))).await;
            self.completed.lock().unwrap().push(format!("{source}#{page}"));

            Ok(vec![
                job(json!({ "url": "shared", "title": format!("{source} page {page}") })),
                job(json!({ "url": format!("{source}-{page}"), "title": "Dev" })),
            ])
        }
    }

    fn paged_config() -> SearchConfig {
        SearchConfig {
            sources: Some(vec!["a".into(), "b".into()]),
            pages_to_fetch: 3,
            ..SearchConfig::default()
        }
    }

    fn config() -> SearchConfig {
        SearchConfig {
            include_keyword: "rust,  tokio".to_string(),
            location_name: Some(LocationInput::Many(vec!["NY".into(), "LA".into()])),
            sources: Some(vec!["a".into(), "b".into()]),
            ..SearchConfig::default()
        }
    }

    /// Every request returns one shared posting plus one unique to its location.
    fn responses(payload: &Value) -> Result<Vec<RawJobRecord>, AppError> {
        let location = payload["locationName"].as_str().unwrap_or_default();
        Ok(vec![
            job(json!({ "url": "shared", "title": format!("Shared {location}") })),
            job(json!({ "url": format!("only-{location}"), "title": "Dev" })),
            job(json!({ "url": format!("intern-{location}"), "title": "Intern" })),
        ])
    }

    #[tokio::test]
    async fn test_plan_normalizes_keyword_once() {
        let svc = service(MockJobSearchApi::new(), 1);
        let (keyword, requests) = svc.plan(&config());

        assert_eq!(keyword, "rust AND tokio");
        assert_eq!(requests.len(), 4);
        assert!(requests.iter().all(|r| r.keyword == keyword));
    }

    #[tokio::test]
    async fn test_search_filters_and_deduplicates() {
        let mut api = MockJobSearchApi::new();
        api.expect_search()
            .withf(|payload| payload["includeKeyword"] == "rust AND tokio")
            .times(4)
            .returning(|payload| responses(payload));

        let outcome = service(api, 1).search(&config()).await.unwrap();

        assert_eq!(outcome.stats.requests, 4);
        assert_eq!(outcome.stats.fetched, 12);
        assert_eq!(outcome.stats.filtered, 8);
        // "shared" collapses per source; the per-location postings stay.
        assert_eq!(outcome.stats.unique, 6);
        assert_eq!(outcome.records.len(), 6);
        assert_eq!(outcome.stats.per_source["a"].kept, 4);
        assert_eq!(outcome.stats.per_source["b"].requests, 2);

        let shared_a = outcome
            .records
            .iter()
            .find(|r| r.source == "a" && r.record.url() == Some("shared"))
            .unwrap();
        assert_eq!(shared_a.record.title(), Some("Shared LA"));
    }

    #[tokio::test]
    async fn test_concurrent_search_matches_sequential() {
        let mut sequential_api = MockJobSearchApi::new();
        sequential_api
            .expect_search()
            .returning(|payload| responses(payload));
        let mut concurrent_api = MockJobSearchApi::new();
        concurrent_api
            .expect_search()
            .returning(|payload| responses(payload));

        let sequential = service(sequential_api, 1).search(&config()).await.unwrap();
        let concurrent = service(concurrent_api, 4).search(&config()).await.unwrap();

        assert_eq!(sequential.records, concurrent.records);
        assert_eq!(sequential.stats, concurrent.stats);
    }

    #[tokio::test(start_paused = true)]
    async fn test_out_of_order_completion_keeps_plan_order() {
        let sequential_api = Arc::new(SlowFirstPagesApi::default());
        let concurrent_api = Arc::new(SlowFirstPagesApi::default());

        let sequential = JobSearchService::new(
            FetchService::new(sequential_api.clone(), FetchPolicy::default()),
            SearchPlanner::new(vec!["default".to_string()]),
            1,
        )
        .search(&paged_config())
        .await
        .unwrap();
        let concurrent = JobSearchService::new(
            FetchService::new(concurrent_api.clone(), FetchPolicy::default()),
            SearchPlanner::new(vec!["default".to_string()]),
            6,
        )
        .search(&paged_config())
        .await
        .unwrap();

        assert_eq!(
            *sequential_api.completed.lock().unwrap(),
            vec!["a#1", "a#2", "a#3", "b#1", "b#2", "b#3"]
        );
        let mut completed = concurrent_api.completed.lock().unwrap().clone();
        completed[..2].sort();
        completed[4..].sort();
        assert_eq!(&completed[..2], ["a#3", "b#3"]);
        assert_eq!(&completed[4..], ["a#1", "b#1"]);

        assert_eq!(sequential.records, concurrent.records);
        assert_eq!(sequential.stats, concurrent.stats);

        // Last write in plan order wins, not last to complete.
        let shared_a = concurrent
            .records
            .iter()
            .find(|r| r.source == "a" && r.record.url() == Some("shared"))
            .unwrap();
        assert_eq!(shared_a.record.title(), Some("a page 3"));
        let urls: Vec<&str> = concurrent.records.iter().filter_map(|r| r.record.url()).collect();
        assert_eq!(urls, vec!["shared", "a-1", "a-2", "a-3", "shared", "b-1", "b-2", "b-3"]);
    }

    #[tokio::test]
    async fn test_retry_success_gives_same_result() {
        let mut clean_api = MockJobSearchApi::new();
        clean_api.expect_search().returning(|payload| responses(payload));

        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let mut flaky_api = MockJobSearchApi::new();
        flaky_api.expect_search().returning(move |payload| {
            if counter.fetch_add(1, Ordering::SeqCst) == 1 {
                Err(AppError::fetch("HTTP 502", json!({ "status": 502 })))
            } else {
                responses(payload)
            }
        });

        let clean = service(clean_api, 1).search(&config()).await.unwrap();
        let flaky = service(flaky_api, 1).search(&config()).await.unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 5);
        assert_eq!(clean.records, flaky.records);
        assert_eq!(flaky.stats.retried_requests, 1);
    }

    #[tokio::test]
    async fn test_fatal_failure_aborts_search() {
        let mut api = MockJobSearchApi::new();
        api.expect_search().returning(|payload| {
            if payload["source"] == "b" {
                Err(AppError::fetch("HTTP 500", json!({ "status": 500 })))
            } else {
                responses(payload)
            }
        });

        let err = service(api, 1).search(&config()).await.unwrap_err();

        assert!(matches!(err, AppError::Fetch { .. }));
        assert_eq!(err.details()["source"], "b");
        assert_eq!(err.details()["location"], "NY");
        assert_eq!(err.details()["page"], 1);
    }

    #[tokio::test]
    async fn test_empty_responses() {
        let mut api = MockJobSearchApi::new();
        api.expect_search().times(4).returning(|_| Ok(Vec::new()));

        let outcome = service(api, 2).search(&config()).await.unwrap();

        assert!(outcome.records.is_empty());
        assert_eq!(outcome.stats.fetched, 0);
        assert_eq!(outcome.stats.unique, 0);
    }
}
