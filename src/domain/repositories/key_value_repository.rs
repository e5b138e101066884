//! Repository trait for named blob slots.

use crate::error::AppError;
use async_trait::async_trait;

/// Key-value store holding whole blobs under fixed names (`INPUT.json`, `jobs.csv`).
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait KeyValueRepository: Send + Sync {
    /// Reads a blob.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(bytes))` if the key exists
    /// - `Ok(None)` if it does not
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] on I/O errors.
    async fn get_value(&self, key: &str) -> Result<Option<Vec<u8>>, AppError>;

    /// Stores a blob, replacing any previous value under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] on I/O errors.
    async fn set_value(&self, key: &str, value: Vec<u8>, content_type: &str)
    -> Result<(), AppError>;
}
