//! Infrastructure layer for external integrations.
//!
//! Concrete implementations of the collaborator traits defined in
//! [`crate::domain::repositories`].
//!
//! # Modules
//!
//! - [`http`] - Remote job-search API client
//! - [`storage`] - Local dataset and key-value store
//! - [`notification`] - Email relay and log-only notifier

pub mod http;
pub mod notification;
pub mod storage;
