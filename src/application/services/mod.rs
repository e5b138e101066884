//! Pipeline services for the application layer.
//!
//! Leaf-first: [`SearchPlanner`] expands the search space, [`FetchService`]
//! runs one request with retry, [`JobFilter`] applies the predicate chain,
//! [`Deduplicator`] merges batches, [`JobSearchService`] drives those four,
//! [`ExportService`] persists the result and [`PipelineService`] runs a whole job.

pub mod deduplicator;
pub mod export_service;
pub mod fetch_service;
pub mod job_filter;
pub mod job_search_service;
pub mod pipeline_service;
pub mod search_planner;

pub use deduplicator::Deduplicator;
pub use export_service::{CSV_KEY, ExportService, ExportSummary, build_notification};
pub use fetch_service::{FetchOutcome, FetchPolicy, FetchService};
pub use job_filter::JobFilter;
pub use job_search_service::{JobSearchService, SearchOutcome, SearchStats, SourceStats};
pub use pipeline_service::{PipelineService, RunReport};
pub use search_planner::SearchPlanner;
