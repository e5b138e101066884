//! Notification delivery.
//!
//! - [`WebhookNotifier`] - JSON POST to an email relay
//! - [`LogNotifier`] - Logs the message when no relay is configured

mod log_notifier;
mod webhook_notifier;

pub use log_notifier::LogNotifier;
pub use webhook_notifier::WebhookNotifier;
