//! Email relay reached over HTTP.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;

use crate::domain::entities::EmailMessage;
use crate::domain::repositories::Notifier;
use crate::error::AppError;

/// POSTs each [`EmailMessage`] as JSON (`{"to","subject","text"}`) to a relay.
pub struct WebhookNotifier {
    client: reqwest::Client,
    url: String,
    token: Option<String>,
}

impl WebhookNotifier {
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the HTTP client cannot be built.
    pub fn new(
        url: impl Into<String>,
        token: Option<String>,
        timeout: Duration,
    ) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                AppError::internal(
                    "Failed to build HTTP client",
                    json!({ "reason": e.to_string() }),
                )
            })?;

        Ok(Self {
            client,
            url: url.into(),
            token,
        })
    }
}

#[async_trait]
impl Notifier for WebhookNotifier {
    async fn send_email(&self, message: &EmailMessage) -> Result<(), AppError> {
        let mut request = self.client.post(&self.url).json(message);
        if let Some(ref token) = self.token {
            request = request.bearer_auth(token);
        }

        let resp = request.send().await.map_err(|e| {
            AppError::notification(e.to_string(), json!({ "timeout": e.is_timeout() }))
        })?;

        let status = resp.status();
        if !status.is_success() {
            return Err(AppError::notification(
                format!("Email relay responded with HTTP {}", status.as_u16()),
                json!({ "status": status.as_u16() }),
            ));
        }

        tracing::debug!(to = %message.to, status = status.as_u16(), "Email relay accepted message");
        Ok(())
    }
}
