#![allow(dead_code)]

use std::path::{Path, PathBuf};

use job_aggregator::config::Config;
use job_aggregator::domain::entities::SearchConfig;
use serde_json::Value;

/// Configuration pointing at a mock search endpoint and a scratch storage root.
pub fn test_config(search_api_url: String, storage_dir: &Path) -> Config {
    Config {
        search_api_url,
        request_timeout_secs: 5,
        fetch_retry_delay_ms: 0,
        storage_dir: storage_dir.to_path_buf(),
        ..Config::default()
    }
}

pub fn input(value: Value) -> SearchConfig {
    serde_json::from_value(value).unwrap()
}

pub fn items_path(storage_dir: &Path) -> PathBuf {
    storage_dir.join("datasets/default/items.jsonl")
}

pub fn csv_path(storage_dir: &Path) -> PathBuf {
    storage_dir.join("key_value_stores/default/jobs.csv")
}

pub fn read_items(storage_dir: &Path) -> Vec<Value> {
    std::fs::read_to_string(items_path(storage_dir))
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}
