//! Repository trait definitions for the domain layer.
//!
//! Every external collaborator of the pipeline sits behind one of these
//! traits. Implementations live in `crate::infrastructure`; mock
//! implementations are generated via `mockall` for unit tests.
//!
//! # Available Repositories
//!
//! - [`JobSearchApi`] - Remote job-search endpoint
//! - [`DatasetRepository`] - Durable append-only result dataset
//! - [`KeyValueRepository`] - Named blob slots (run input, CSV export)
//! - [`Notifier`] - End-of-run email

pub mod dataset_repository;
pub mod job_search_api;
pub mod key_value_repository;
pub mod notifier;

pub use dataset_repository::DatasetRepository;
pub use job_search_api::JobSearchApi;
pub use key_value_repository::KeyValueRepository;
pub use notifier::Notifier;

#[cfg(test)]
pub use dataset_repository::MockDatasetRepository;
#[cfg(test)]
pub use job_search_api::MockJobSearchApi;
#[cfg(test)]
pub use key_value_repository::MockKeyValueRepository;
#[cfg(test)]
pub use notifier::MockNotifier;
