//! # Job Aggregator
//!
//! Queries a remote job-search API across every `(source, location, page)`
//! combination of a search, filters and deduplicates the postings, and
//! stores the result as a dataset, a CSV export and an optional email.
//!
//! ## Architecture
//!
//! This crate follows Clean Architecture principles with clear layer separation:
//!
//! - **Domain Layer** ([`domain`]) - Search input, postings and collaborator traits
//! - **Application Layer** ([`application`]) - Planning, fetching, filtering, dedup and export
//! - **Infrastructure Layer** ([`infrastructure`]) - HTTP client, local storage, notifications
//! - **Runner** ([`runner`]) - Wires the production collaborators together
//!
//! ## Quick Start
//!
//! ```bash
//! export SEARCH_API_URL="https://api.orgupdate.com/search-jobs-v1"
//!
//! # Show the request plan
//! cargo run -- plan --input input.json
//!
//! # Run the search and store the results under ./storage
//! cargo run -- run --input input.json
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! Per-run search criteria arrive as [`domain::entities::SearchConfig`].

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod runner;
pub mod utils;

pub use error::AppError;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{JobSearchService, PipelineService, RunReport};
    pub use crate::config::Config;
    pub use crate::domain::entities::{AtomicRequest, FilteredJobRecord, RawJobRecord, SearchConfig};
    pub use crate::error::AppError;
}
