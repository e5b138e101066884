//! Core domain entities representing the job-search data model.
//!
//! Entities are plain data structures; the pipeline logic that transforms
//! them lives in [`crate::application::services`].
//!
//! # Entity Types
//!
//! - [`SearchConfig`] - Search criteria for one run
//! - [`AtomicRequest`] - One `(source, location, page)` search request
//! - [`RawJobRecord`] - A posting as returned by the search API
//! - [`FilteredJobRecord`] - A posting that passed filtering, stamped with its source
//! - [`DedupKey`] - Composite identity used for deduplication
//! - [`EmailMessage`] - Result notification

pub mod atomic_request;
pub mod email;
pub mod job_record;
pub mod search_config;

pub use atomic_request::AtomicRequest;
pub use email::EmailMessage;
pub use job_record::{DedupKey, FilteredJobRecord, RawJobRecord};
pub use search_config::{DatePosted, LocationInput, SearchConfig};
