//! Repository trait for the durable result dataset.

use crate::domain::entities::FilteredJobRecord;
use crate::error::AppError;
use async_trait::async_trait;

/// Append-only dataset of job postings.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DatasetRepository: Send + Sync {
    /// Appends records to the dataset and returns how many were written.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] if the dataset cannot be written.
    async fn push_data(&self, records: &[FilteredJobRecord]) -> Result<usize, AppError>;
}
