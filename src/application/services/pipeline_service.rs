//! End-to-end run orchestration.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::export_service::{ExportService, ExportSummary};
use super::job_search_service::{JobSearchService, SearchStats};
use crate::domain::entities::SearchConfig;
use crate::domain::repositories::{DatasetRepository, JobSearchApi, KeyValueRepository, Notifier};
use crate::error::AppError;

/// Summary of a completed run.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub keyword: String,
    pub search: SearchStats,
    pub export: ExportSummary,
}

impl RunReport {
    /// Jobs persisted by the run.
    pub fn saved(&self) -> usize {
        self.search.unique
    }
}

/// Runs search then export.
///
/// Export only starts once every request has succeeded, so a fatal fetch
/// failure leaves storage untouched.
pub struct PipelineService<A, D, K, N>
where
    A: JobSearchApi,
    D: DatasetRepository,
    K: KeyValueRepository,
    N: Notifier + ?Sized,
{
    search: JobSearchService<A>,
    export: ExportService<D, K, N>,
}

impl<A, D, K, N> PipelineService<A, D, K, N>
where
    A: JobSearchApi,
    D: DatasetRepository,
    K: KeyValueRepository,
    N: Notifier + ?Sized,
{
    pub fn new(search: JobSearchService<A>, export: ExportService<D, K, N>) -> Self {
        Self { search, export }
    }

    /// # Errors
    ///
    /// Returns the first fatal [`AppError`] from the search or the export.
    pub async fn run(&self, input: &SearchConfig) -> Result<RunReport, AppError> {
        let started_at = Utc::now();

        let outcome = self.search.search(input).await.inspect_err(|e| {
            tracing::error!(code = e.code(), error = %e, details = %e.details(), "Job search failed, nothing persisted");
        })?;

        let export = self
            .export
            .export(&outcome.records, input.send_notification)
            .await?;

        let report = RunReport {
            started_at,
            finished_at: Utc::now(),
            keyword: outcome.keyword,
            search: outcome.stats,
            export,
        };

        tracing::info!(saved = report.saved(), "Finished! Jobs saved");
        Ok(report)
    }
}
