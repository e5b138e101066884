//! Domain layer containing the job-search data model and collaborator contracts.
//!
//! # Architecture
//!
//! - [`entities`] - Core data structures (search input, requests, postings)
//! - [`repositories`] - Trait definitions for every external collaborator
//!
//! # Design Principles
//!
//! - Domain layer has no dependencies on infrastructure
//! - Repository traits define contracts implemented by infrastructure layer
//! - Pipeline logic is encapsulated in services (see [`crate::application::services`])

pub mod entities;
pub mod repositories;
