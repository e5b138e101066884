//! Log-only notifier used when no email relay is configured.

use async_trait::async_trait;

use crate::domain::entities::EmailMessage;
use crate::domain::repositories::Notifier;
use crate::error::AppError;

/// No-op notifier that only logs what would have been sent.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl LogNotifier {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Notifier for LogNotifier {
    async fn send_email(&self, message: &EmailMessage) -> Result<(), AppError> {
        tracing::info!(
            to = %message.to,
            subject = %message.subject,
            body_len = message.text.len(),
            "Notification relay not configured, email logged only"
        );
        Ok(())
    }
}
