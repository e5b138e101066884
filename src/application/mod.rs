//! Application layer services implementing the aggregation pipeline.
//!
//! Services consume repository traits from [`crate::domain::repositories`]
//! and never touch the network or filesystem directly, which keeps every
//! stage testable with mocks.
//!
//! # Available Services
//!
//! - [`services::search_planner::SearchPlanner`] - Search space expansion
//! - [`services::fetch_service::FetchService`] - One request with fixed-delay retry
//! - [`services::job_filter::JobFilter`] - Post-fetch predicate chain
//! - [`services::deduplicator::Deduplicator`] - Last-write-wins merge
//! - [`services::job_search_service::JobSearchService`] - Fetch/filter/dedup over the whole plan
//! - [`services::export_service::ExportService`] - Dataset, CSV and notification
//! - [`services::pipeline_service::PipelineService`] - One complete run

pub mod services;
