//! Persistence of the final result set and the optional notification.

use std::sync::Arc;

use serde::Serialize;
use serde_json::json;

use crate::domain::entities::{EmailMessage, FilteredJobRecord};
use crate::domain::repositories::{DatasetRepository, KeyValueRepository, Notifier};
use crate::error::AppError;
use crate::utils::csv::records_to_csv;

/// Key-value slot the CSV export is written to.
pub const CSV_KEY: &str = "jobs.csv";
pub const CSV_CONTENT_TYPE: &str = "text/csv";
/// Number of records included in the notification body.
pub const NOTIFICATION_PREVIEW_LEN: usize = 5;

/// What the export step wrote.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExportSummary {
    pub dataset_records: usize,
    pub csv_bytes: usize,
    pub notification_sent: bool,
}

/// Hands a finished result set to the dataset, the CSV slot and the notifier.
pub struct ExportService<D: DatasetRepository, K: KeyValueRepository, N: Notifier + ?Sized> {
    dataset: Arc<D>,
    store: Arc<K>,
    notifier: Arc<N>,
    recipient: String,
}

impl<D: DatasetRepository, K: KeyValueRepository, N: Notifier + ?Sized> ExportService<D, K, N> {
    pub fn new(dataset: Arc<D>, store: Arc<K>, notifier: Arc<N>, recipient: String) -> Self {
        Self {
            dataset,
            store,
            notifier,
            recipient,
        }
    }

    /// Persists `records` and sends the notification if requested.
    ///
    /// The CSV slot is always written, before the dataset; the dataset append
    /// is the last storage write and is skipped for an empty set. A failed
    /// notification is logged and reported as not sent.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] if the CSV slot or the dataset cannot be
    /// written. A failed CSV write leaves the dataset untouched.
    pub async fn export(
        &self,
        records: &[FilteredJobRecord],
        send_notification: bool,
    ) -> Result<ExportSummary, AppError> {
        let csv = records_to_csv(records);
        let csv_bytes = csv.len();
        self.store
            .set_value(CSV_KEY, csv.into_bytes(), CSV_CONTENT_TYPE)
            .await?;
        tracing::info!(key = CSV_KEY, bytes = csv_bytes, "CSV export written");

        let dataset_records = if records.is_empty() {
            tracing::info!("No jobs to store in dataset");
            0
        } else {
            self.dataset.push_data(records).await?
        };

        let notification_sent = if send_notification && !records.is_empty() {
            self.notify(records).await
        } else {
            false
        };

        Ok(ExportSummary {
            dataset_records,
            csv_bytes,
            notification_sent,
        })
    }

    async fn notify(&self, records: &[FilteredJobRecord]) -> bool {
        let result = match build_notification(&self.recipient, records) {
            Ok(message) => self.notifier.send_email(&message).await,
            Err(e) => Err(e),
        };

        match result {
            Ok(()) => {
                tracing::info!(to = %self.recipient, "Notification sent");
                true
            }
            Err(e) => {
                tracing::error!(to = %self.recipient, code = e.code(), error = %e, details = %e.details(), "Notification failed");
                false
            }
        }
    }
}

/// Builds the end-of-run email: count in the subject, first records as pretty JSON in the body.
///
/// # Errors
///
/// Returns [`AppError::Internal`] if the records cannot be serialized.
pub fn build_notification(
    recipient: &str,
    records: &[FilteredJobRecord],
) -> Result<EmailMessage, AppError> {
    let preview = &records[..records.len().min(NOTIFICATION_PREVIEW_LEN)];
    let text = serde_json::to_string_pretty(preview).map_err(|e| {
        AppError::internal(
            "Failed to serialize notification body",
            json!({ "reason": e.to_string() }),
        )
    })?;

    Ok(EmailMessage::new(
        recipient,
        format!("Job search finished: {} jobs found", records.len()),
        text,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::RawJobRecord;
    use crate::domain::repositories::{MockDatasetRepository, MockKeyValueRepository, MockNotifier};
    use serde_json::Value;

    fn job(i: usize) -> FilteredJobRecord {
        FilteredJobRecord::new(
            "indeed",
            RawJobRecord::from_value(json!({ "url": format!("u{i}"), "title": format!("Job {i}") }))
                .unwrap(),
        )
    }

    fn jobs(n: usize) -> Vec<FilteredJobRecord> {
        (0..n).map(job).collect()
    }

    fn service(
        dataset: MockDatasetRepository,
        store: MockKeyValueRepository,
        notifier: MockNotifier,
    ) -> ExportService<MockDatasetRepository, MockKeyValueRepository, MockNotifier> {
        ExportService::new(
            Arc::new(dataset),
            Arc::new(store),
            Arc::new(notifier),
            "team@example.com".to_string(),
        )
    }

    #[test]
    fn test_build_notification_preview() {
        let message = build_notification("team@example.com", &jobs(7)).unwrap();

        assert_eq!(message.to, "team@example.com");
        assert_eq!(message.subject, "Job search finished: 7 jobs found");

        let body: Value = serde_json::from_str(&message.text).unwrap();
        let preview = body.as_array().unwrap();
        assert_eq!(preview.len(), 5);
        assert_eq!(preview[0]["url"], "u0");
        assert_eq!(preview[0]["source"], "indeed");
        assert!(message.text.contains('\n'));
    }

    #[tokio::test]
    async fn test_export_writes_dataset_csv_and_notifies() {
        let mut dataset = MockDatasetRepository::new();
        dataset
            .expect_push_data()
            .withf(|records| records.len() == 2)
            .times(1)
            .returning(|records| Ok(records.len()));

        let mut store = MockKeyValueRepository::new();
        store
            .expect_set_value()
            .withf(|key, value, content_type| {
                key == CSV_KEY
                    && content_type == CSV_CONTENT_TYPE
                    && String::from_utf8_lossy(value).starts_with("url,title,source\n")
            })
            .times(1)
            .returning(|_, _, _| Ok(()));

        let mut notifier = MockNotifier::new();
        notifier
            .expect_send_email()
            .withf(|message| message.subject.contains("2 jobs"))
            .times(1)
            .returning(|_| Ok(()));

        let summary = service(dataset, store, notifier)
            .export(&jobs(2), true)
            .await
            .unwrap();

        assert_eq!(summary.dataset_records, 2);
        assert!(summary.csv_bytes > 0);
        assert!(summary.notification_sent);
    }

    #[tokio::test]
    async fn test_empty_results_skip_dataset_and_notification() {
        let mut dataset = MockDatasetRepository::new();
        dataset.expect_push_data().times(0);

        let mut store = MockKeyValueRepository::new();
        store
            .expect_set_value()
            .withf(|key, value, _| key == CSV_KEY && value.is_empty())
            .times(1)
            .returning(|_, _, _| Ok(()));

        let mut notifier = MockNotifier::new();
        notifier.expect_send_email().times(0);

        let summary = service(dataset, store, notifier)
            .export(&[], true)
            .await
            .unwrap();

        assert_eq!(summary, ExportSummary::default());
    }

    #[tokio::test]
    async fn test_notification_not_requested() {
        let mut dataset = MockDatasetRepository::new();
        dataset.expect_push_data().returning(|records| Ok(records.len()));
        let mut store = MockKeyValueRepository::new();
        store.expect_set_value().returning(|_, _, _| Ok(()));
        let mut notifier = MockNotifier::new();
        notifier.expect_send_email().times(0);

        let summary = service(dataset, store, notifier)
            .export(&jobs(1), false)
            .await
            .unwrap();

        assert!(!summary.notification_sent);
    }

    #[tokio::test]
    async fn test_notification_failure_is_not_fatal() {
        let mut dataset = MockDatasetRepository::new();
        dataset.expect_push_data().returning(|records| Ok(records.len()));
        let mut store = MockKeyValueRepository::new();
        store.expect_set_value().returning(|_, _, _| Ok(()));
        let mut notifier = MockNotifier::new();
        notifier
            .expect_send_email()
            .times(1)
            .returning(|_| Err(AppError::notification("relay down", json!({ "status": 503 }))));

        let summary = service(dataset, store, notifier)
            .export(&jobs(3), true)
            .await
            .unwrap();

        assert_eq!(summary.dataset_records, 3);
        assert!(!summary.notification_sent);
    }

    #[tokio::test]
    async fn test_csv_failure_leaves_dataset_untouched() {
        let mut dataset = MockDatasetRepository::new();
        dataset.expect_push_data().times(0);
        let mut store = MockKeyValueRepository::new();
        store
            .expect_set_value()
            .times(1)
            .returning(|_, _, _| Err(AppError::storage("disk full", json!({}))));
        let mut notifier = MockNotifier::new();
        notifier.expect_send_email().times(0);

        let result = service(dataset, store, notifier).export(&jobs(2), true).await;

        assert!(matches!(result, Err(AppError::Storage { .. })));
    }

    #[tokio::test]
    async fn test_dataset_failure_skips_notification() {
        let mut dataset = MockDatasetRepository::new();
        dataset
            .expect_push_data()
            .times(1)
            .returning(|_| Err(AppError::storage("disk full", json!({}))));
        let mut store = MockKeyValueRepository::new();
        store.expect_set_value().times(1).returning(|_, _, _| Ok(()));
        let mut notifier = MockNotifier::new();
        notifier.expect_send_email().times(0);

        let result = service(dataset, store, notifier).export(&jobs(1), true).await;

        assert!(matches!(result, Err(AppError::Storage { .. })));
    }
}
