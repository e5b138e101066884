//! HTTP client for the remote job-search API.

mod job_search_client;

pub use job_search_client::{HttpJobSearchApi, parse_records};
