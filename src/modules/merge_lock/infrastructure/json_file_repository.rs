use async_trait::async_trait;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;
use url::Url;

use super::config::MergeLockStoreConfig;
use crate::modules::merge_lock::domain::{MergeLock, MergeLockRepository};
use crate::shared::errors::{AppError, AppResult};
use crate::shared::utils::logger::{LogContext, TimedOperation};

/// On-disk layout: `{"mergeLocks": [["uri", ...], ...]}`
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MergeLockFile {
    merge_locks: Vec<Vec<String>>,
}

impl MergeLockFile {
    fn from_locks(locks: &[MergeLock]) -> Self {
        let mut merge_locks: Vec<Vec<String>> = locks
            .iter()
            .filter(|lock| !lock.is_empty())
            .map(|lock| lock.uris().iter().map(|uri| uri.to_string()).collect())
            .collect();
        merge_locks.sort();

        Self { merge_locks }
    }

    fn into_locks(self) -> AppResult<Vec<MergeLock>> {
        self.merge_locks
            .into_iter()
            .map(|entries| {
                entries
                    .iter()
                    .map(|entry| {
                        Url::parse(entry).map_err(|e| {
                            AppError::MalformedStateError(format!(
                                "Invalid URI [{}] in merge lock file: {}",
                                entry, e
                            ))
                        })
                    })
                    .collect::<AppResult<MergeLock>>()
            })
            .collect()
    }
}

/// Persists merge locks as a single JSON document.
///
/// Writes go to a sibling `.tmp` file that is renamed over the target, so a crash
/// mid-write leaves the previous file intact.
pub struct JsonFileMergeLockRepository {
    path: PathBuf,
}

impl JsonFileMergeLockRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn from_config(config: &MergeLockStoreConfig) -> AppResult<Self> {
        config.validate().map_err(AppError::ValidationError)?;
        Ok(Self::new(config.merge_locks_file.clone()))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.clone().into_os_string();
        name.push(".tmp");
        PathBuf::from(name)
    }
}

#[async_trait]
impl MergeLockRepository for JsonFileMergeLockRepository {
    async fn load(&self) -> AppResult<Vec<MergeLock>> {
        if !fs::try_exists(&self.path).await? {
            debug!(
                "LOCKS: {} does not exist, starting without merge locks",
                self.path.display()
            );
            return Ok(Vec::new());
        }

        let timer = TimedOperation::new("LOCKS: load");
        let content = fs::read_to_string(&self.path).await?;
        if content.trim().is_empty() {
            warn!("LOCKS: {} is empty, starting without merge locks", self.path.display());
            return Ok(Vec::new());
        }

        let file: MergeLockFile = serde_json::from_str(&content).map_err(|e| {
            AppError::MalformedStateError(format!(
                "Unable to parse {}: {}",
                self.path.display(),
                e
            ))
        })?;
        let locks = file.into_locks()?;

        let duration = timer.finish();
        LogContext::lock_store_operation("load", locks.len(), Some(duration));
        Ok(locks)
    }

    async fn save(&self, locks: &[MergeLock]) -> AppResult<()> {
        LogContext::lock_store_operation("save", locks.len(), None);
        let timer = TimedOperation::new("LOCKS: save");

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }

        let json = serde_json::to_string_pretty(&MergeLockFile::from_locks(locks))?;
        let temp_path = self.temp_path();
        fs::write(&temp_path, json).await?;
        fs::rename(&temp_path, &self.path).await?;

        let duration = timer.finish();
        LogContext::lock_store_operation("save", locks.len(), Some(duration));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn lock(uris: &[&str]) -> MergeLock {
        uris.iter().map(|uri| Url::parse(uri).unwrap()).collect()
    }

    #[tokio::test]
    async fn test_missing_file_loads_empty() {
        let dir = TempDir::new().unwrap();
        let repository = JsonFileMergeLockRepository::new(dir.path().join("merge.lock"));

        assert!(repository.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_save_writes_sorted_document() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("merge.lock");
        let repository = JsonFileMergeLockRepository::new(&path);

        repository
            .save(&[
                lock(&["https://myanimelist.net/anime/2", "https://anilist.co/anime/2"]),
                lock(&["https://anidb.net/anime/1", "https://kitsu.app/anime/1"]),
            ])
            .await
            .unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "mergeLocks": [
                    ["https://anidb.net/anime/1", "https://kitsu.app/anime/1"],
                    ["https://anilist.co/anime/2", "https://myanimelist.net/anime/2"]
                ]
            })
        );
        assert!(!repository.temp_path().exists());
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let repository = JsonFileMergeLockRepository::new(dir.path().join("nested/merge.lock"));
        let locks = vec![lock(&["https://anidb.net/anime/1", "https://kitsu.app/anime/1"])];

        repository.save(&locks).await.unwrap();

        assert_eq!(repository.load().await.unwrap(), locks);
    }

    #[tokio::test]
    async fn test_invalid_uri_is_malformed_state() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("merge.lock");
        std::fs::write(&path, r#"{"mergeLocks":[["not a uri"]]}"#).unwrap();

        let result = JsonFileMergeLockRepository::new(&path).load().await;
        assert!(matches!(result, Err(AppError::MalformedStateError(_))));
    }

    #[tokio::test]
    async fn test_garbage_is_malformed_state() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("merge.lock");
        std::fs::write(&path, "[[[").unwrap();

        let result = JsonFileMergeLockRepository::new(&path).load().await;
        assert!(matches!(result, Err(AppError::MalformedStateError(_))));
    }
}
