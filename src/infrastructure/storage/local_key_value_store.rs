//! Key-value store backed by one file per key.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde_json::json;

use crate::domain::repositories::KeyValueRepository;
use crate::error::{AppError, map_io_error};

/// Stores each value as `<dir>/<key>`.
///
/// Writes go to a temporary sibling first and are renamed into place, so a
/// reader never sees a half-written blob.
pub struct LocalKeyValueRepository {
    dir: PathBuf,
}

impl LocalKeyValueRepository {
    pub fn new(storage_root: impl AsRef<Path>, name: &str) -> Self {
        Self {
            dir: storage_root.as_ref().join("key_value_stores").join(name),
        }
    }

    /// Path of `key`, rejecting keys that would escape the store directory.
    pub fn path_for(&self, key: &str) -> Result<PathBuf, AppError> {
        let valid = !key.is_empty()
            && key != "."
            && key != ".."
            && !key.contains(['/', '\\'])
            && !key.contains('\0');

        if !valid {
            return Err(AppError::storage(
                "Invalid key-value store key",
                json!({ "key": key }),
            ));
        }

        Ok(self.dir.join(key))
    }
}

#[async_trait]
impl KeyValueRepository for LocalKeyValueRepository {
    async fn get_value(&self, key: &str) -> Result<Option<Vec<u8>>, AppError> {
        let path = self.path_for(key)?;

        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(map_io_error(e, &path)),
        }
    }

    async fn set_value(
        &self,
        key: &str,
        value: Vec<u8>,
        content_type: &str,
    ) -> Result<(), AppError> {
        let path = self.path_for(key)?;
        let tmp = self.dir.join(format!(".{key}.tmp"));

        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| map_io_error(e, &self.dir))?;
        tokio::fs::write(&tmp, &value)
            .await
            .map_err(|e| map_io_error(e, &tmp))?;
        tokio::fs::rename(&tmp, &path)
            .await
            .map_err(|e| map_io_error(e, &path))?;

        tracing::debug!(key, content_type, bytes = value.len(), "Stored key-value record");
        Ok(())
    }
}
