//! Notification collaborator.

use crate::domain::entities::EmailMessage;
use crate::error::AppError;
use async_trait::async_trait;

/// Delivers the end-of-run email.
///
/// # Implementations
///
/// - [`crate::infrastructure::notification::WebhookNotifier`] - POSTs to an email relay
/// - [`crate::infrastructure::notification::LogNotifier`] - Logs the message only
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Notifier: Send + Sync {
    /// # Errors
    ///
    /// Returns [`AppError::Notification`] if the relay rejects the message.
    async fn send_email(&self, message: &EmailMessage) -> Result<(), AppError>;
}
