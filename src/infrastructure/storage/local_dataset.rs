//! JSON Lines dataset on the local filesystem.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde_json::json;
use tokio::io::AsyncWriteExt;

use crate::domain::entities::FilteredJobRecord;
use crate::domain::repositories::DatasetRepository;
use crate::error::{AppError, map_io_error};

const ITEMS_FILE: &str = "items.jsonl";

/// Append-only dataset stored as one JSON object per line.
pub struct LocalDatasetRepository {
    dir: PathBuf,
}

impl LocalDatasetRepository {
    pub fn new(storage_root: impl AsRef<Path>, name: &str) -> Self {
        Self {
            dir: storage_root.as_ref().join("datasets").join(name),
        }
    }

    pub fn items_path(&self) -> PathBuf {
        self.dir.join(ITEMS_FILE)
    }
}

#[async_trait]
impl DatasetRepository for LocalDatasetRepository {
    async fn push_data(&self, records: &[FilteredJobRecord]) -> Result<usize, AppError> {
        if records.is_empty() {
            return Ok(0);
        }

        let mut lines = String::new();
        for record in records {
            let line = serde_json::to_string(record).map_err(|e| {
                AppError::internal(
                    "Failed to serialize dataset record",
                    json!({ "reason": e.to_string() }),
                )
            })?;
            lines.push_str(&line);
            lines.push('\n');
        }

        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| map_io_error(e, &self.dir))?;

        let path = self.items_path();
        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .await
            .map_err(|e| map_io_error(e, &path))?;

        file.write_all(lines.as_bytes())
            .await
            .map_err(|e| map_io_error(e, &path))?;
        file.flush().await.map_err(|e| map_io_error(e, &path))?;

        tracing::info!(count = records.len(), path = %path.display(), "Pushed records to dataset");
        Ok(records.len())
    }
}
