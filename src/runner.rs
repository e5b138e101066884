//! Run wiring: builds the concrete collaborators from [`Config`] and drives
//! the pipeline.

use std::path::Path;
use std::sync::Arc;

use serde_json::json;

use crate::application::services::{
    ExportService, FetchPolicy, FetchService, JobSearchService, PipelineService, RunReport,
    SearchPlanner,
};
use crate::config::Config;
use crate::domain::entities::{AtomicRequest, SearchConfig};
use crate::domain::repositories::{KeyValueRepository, Notifier};
use crate::error::{AppError, map_io_error};
use crate::infrastructure::http::HttpJobSearchApi;
use crate::infrastructure::notification::{LogNotifier, WebhookNotifier};
use crate::infrastructure::storage::{LocalDatasetRepository, LocalKeyValueRepository};
use crate::utils::keyword_normalizer::normalize_keyword;

/// Key-value slot holding the run input when no input file is given.
pub const INPUT_KEY: &str = "INPUT.json";

/// Pipeline assembled from the production collaborators.
pub type Pipeline = PipelineService<
    HttpJobSearchApi,
    LocalDatasetRepository,
    LocalKeyValueRepository,
    dyn Notifier,
>;

/// Key-value store named by the configuration.
pub fn key_value_store(config: &Config) -> LocalKeyValueRepository {
    LocalKeyValueRepository::new(&config.storage_dir, &config.key_value_store_name)
}

/// Reads and validates the run input.
///
/// Uses `path` when given, otherwise the [`INPUT_KEY`] slot of `store`.
///
/// # Errors
///
/// - [`AppError::Storage`] if the file or slot cannot be read
/// - [`AppError::Validation`] if no input exists or it does not validate
pub async fn load_input<K>(store: &K, path: Option<&Path>) -> Result<SearchConfig, AppError>
where
    K: KeyValueRepository + ?Sized,
{
    let bytes = match path {
        Some(path) => tokio::fs::read(path)
            .await
            .map_err(|e| map_io_error(e, path))?,
        None => store.get_value(INPUT_KEY).await?.ok_or_else(|| {
            AppError::bad_request(
                "No run input found",
                json!({ "key": INPUT_KEY, "hint": "pass --input <file> or store INPUT.json" }),
            )
        })?,
    };

    let input = SearchConfig::from_json_slice(&bytes)?;
    tracing::info!(
        keyword = %input.include_keyword,
        pages = input.pages_to_fetch,
        date_posted = input.date_posted.as_str(),
        "Received input"
    );
    Ok(input)
}

fn search_service(config: &Config) -> Result<JobSearchService<HttpJobSearchApi>, AppError> {
    let api = HttpJobSearchApi::new(&config.search_api_url, config.request_timeout())?;
    let fetcher = FetchService::new(
        Arc::new(api),
        FetchPolicy {
            retry_delay: config.fetch_retry_delay(),
            max_retries: config.fetch_max_retries,
        },
    );

    Ok(JobSearchService::new(
        fetcher,
        SearchPlanner::new(config.default_sources.clone()),
        config.max_concurrent_requests,
    ))
}

fn notifier(config: &Config) -> Result<Arc<dyn Notifier>, AppError> {
    match config.notification_webhook_url {
        Some(ref url) => {
            tracing::info!("Notifications enabled (webhook)");
            Ok(Arc::new(WebhookNotifier::new(
                url,
                config.notification_token.clone(),
                config.request_timeout(),
            )?))
        }
        None => {
            tracing::info!("Notifications disabled (log only)");
            Ok(Arc::new(LogNotifier::new()))
        }
    }
}

/// Builds the production pipeline.
///
/// # Errors
///
/// Returns [`AppError::Internal`] if an HTTP client cannot be built.
pub fn build_pipeline(config: &Config) -> Result<Pipeline, AppError> {
    let export = ExportService::new(
        Arc::new(LocalDatasetRepository::new(
            &config.storage_dir,
            &config.dataset_name,
        )),
        Arc::new(key_value_store(config)),
        notifier(config)?,
        config.notification_recipient.clone(),
    );

    Ok(PipelineService::new(search_service(config)?, export))
}

/// Executes one full run for `input`.
///
/// # Errors
///
/// Returns the first fatal [`AppError`]; nothing is persisted when the
/// search fails.
pub async fn run(config: &Config, input: &SearchConfig) -> Result<RunReport, AppError> {
    build_pipeline(config)?.run(input).await
}

/// Normalized keyword and request plan for `input`, without network calls.
pub fn plan(config: &Config, input: &SearchConfig) -> (String, Vec<AtomicRequest>) {
    let keyword = normalize_keyword(&input.include_keyword);
    let requests = SearchPlanner::new(config.default_sources.clone()).expand(input, &keyword);
    (keyword, requests)
}
