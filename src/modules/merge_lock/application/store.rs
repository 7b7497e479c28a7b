use log::{debug, info, warn};
use std::collections::BTreeSet;
use std::sync::Arc;
use tokio::sync::{OnceCell, RwLock};
use url::Url;

use crate::modules::merge_lock::domain::{MergeLock, MergeLockRegistry, MergeLockRepository};
use crate::modules::merge_lock::infrastructure::{
    JsonFileMergeLockRepository, MergeLockStoreConfig,
};
use crate::shared::errors::{AppError, AppResult};
use crate::shared::utils::logger::LogContext;

/// Process-wide access to merge locks.
///
/// The backing repository is read on first use. Readers share the in-memory
/// registry; a writer holds the write guard until the repository confirmed the
/// save, so a failed save never leaves memory ahead of the stored state.
pub struct MergeLockStore {
    repository: Arc<dyn MergeLockRepository>,
    registry: OnceCell<RwLock<MergeLockRegistry>>,
}

impl MergeLockStore {
    pub fn new(repository: Arc<dyn MergeLockRepository>) -> Self {
        Self {
            repository,
            registry: OnceCell::new(),
        }
    }

    /// Store backed by the JSON file named in the config
    pub fn from_config(config: &MergeLockStoreConfig) -> AppResult<Self> {
        let repository = JsonFileMergeLockRepository::from_config(config)?;
        Ok(Self::new(Arc::new(repository)))
    }

    async fn registry(&self) -> AppResult<&RwLock<MergeLockRegistry>> {
        self.registry
            .get_or_try_init(|| async {
                let locks = self.repository.load().await?;
                let registry = MergeLockRegistry::from_locks(locks).map_err(|e| {
                    LogContext::error_with_context(&e, "LOCKS: Refusing to load merge locks");
                    e
                })?;
                info!("LOCKS: Loaded {} merge locks", registry.len());
                Ok::<_, AppError>(RwLock::new(registry))
            })
            .await
    }

    pub async fn is_part_of_merge_lock(&self, uri: &Url) -> AppResult<bool> {
        let registry = self.registry().await?.read().await;
        Ok(registry.is_part_of_merge_lock(uri))
    }

    /// The lock containing `uri`, or an empty lock if there is none.
    pub async fn get_merge_lock(&self, uri: &Url) -> AppResult<MergeLock> {
        let registry = self.registry().await?.read().await;
        Ok(registry.get(uri).cloned().unwrap_or_default())
    }

    /// True if a single stored lock contains all of `uris`. Empty input is never locked.
    pub async fn has_merge_lock(&self, uris: &BTreeSet<Url>) -> AppResult<bool> {
        let registry = self.registry().await?.read().await;
        Ok(registry.has_merge_lock(uris))
    }

    /// Copy of the current locks. Later writes to the store do not affect it.
    pub async fn snapshot(&self) -> AppResult<MergeLockRegistry> {
        let registry = self.registry().await?.read().await;
        Ok(registry.clone())
    }

    pub async fn add_merge_lock(&self, lock: MergeLock) -> AppResult<()> {
        if lock.is_empty() {
            debug!("LOCKS: Ignoring empty merge lock");
            return Ok(());
        }
        self.mutate("add_merge_lock", |registry| registry.add(lock)).await
    }

    pub async fn replace_uri(&self, old: &Url, new: &Url) -> AppResult<()> {
        self.mutate("replace_uri", |registry| registry.replace_uri(old, new))
            .await
    }

    pub async fn remove_entry(&self, uri: &Url) -> AppResult<()> {
        self.mutate("remove_entry", |registry| registry.remove_entry(uri))
            .await
    }

    pub async fn all_sources_in_all_merge_lock_entries(&self) -> AppResult<BTreeSet<Url>> {
        let registry = self.registry().await?.read().await;
        Ok(registry.all_sources())
    }

    /// Apply `change` to a copy, persist the copy, then publish it.
    async fn mutate<F>(&self, operation: &str, change: F) -> AppResult<()>
    where
        F: FnOnce(&mut MergeLockRegistry) -> AppResult<bool>,
    {
        let mut registry = self.registry().await?.write().await;

        let mut updated = registry.clone();
        if !change(&mut updated)? {
            debug!("LOCKS: {} changed nothing", operation);
            return Ok(());
        }

        if let Err(e) = self.repository.save(&updated.locks()).await {
            warn!("LOCKS: {} could not be persisted, keeping previous state", operation);
            return Err(e);
        }

        *registry = updated;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::merge_lock::domain::repository::MockMergeLockRepository;
    use crate::modules::merge_lock::infrastructure::InMemoryMergeLockRepository;

    fn uri(id: u32) -> Url {
        Url::parse(&format!("https://anidb.net/anime/{}", id)).unwrap()
    }

    fn lock(ids: &[u32]) -> MergeLock {
        ids.iter().map(|id| uri(*id)).collect()
    }

    #[tokio::test]
    async fn test_repository_is_loaded_once() {
        let mut repository = MockMergeLockRepository::new();
        repository
            .expect_load()
            .times(1)
            .returning(|| Ok(vec![lock(&[1, 2])]));

        let store = MergeLockStore::new(Arc::new(repository));

        assert!(store.is_part_of_merge_lock(&uri(1)).await.unwrap());
        assert!(!store.is_part_of_merge_lock(&uri(3)).await.unwrap());
        assert_eq!(store.get_merge_lock(&uri(2)).await.unwrap(), lock(&[1, 2]));
    }

    #[tokio::test]
    async fn test_failed_save_keeps_previous_state() {
        let mut repository = MockMergeLockRepository::new();
        repository.expect_load().returning(|| Ok(vec![lock(&[1, 2])]));
        repository
            .expect_save()
            .times(1)
            .returning(|_| Err(AppError::IoError("disk full".to_string())));

        let store = MergeLockStore::new(Arc::new(repository));

        let result = store.add_merge_lock(lock(&[3, 4])).await;
        assert!(matches!(result, Err(AppError::IoError(_))));
        assert!(!store.is_part_of_merge_lock(&uri(3)).await.unwrap());
        assert_eq!(
            store.all_sources_in_all_merge_lock_entries().await.unwrap(),
            lock(&[1, 2]).into_uris()
        );
    }

    #[tokio::test]
    async fn test_noop_changes_are_not_persisted() {
        let mut repository = MockMergeLockRepository::new();
        repository.expect_load().returning(|| Ok(vec![lock(&[1, 2])]));
        repository.expect_save().never();

        let store = MergeLockStore::new(Arc::new(repository));

        store.add_merge_lock(MergeLock::empty()).await.unwrap();
        store.add_merge_lock(lock(&[1, 2])).await.unwrap();
        store.remove_entry(&uri(9)).await.unwrap();
        store.replace_uri(&uri(8), &uri(9)).await.unwrap();
    }

    #[tokio::test]
    async fn test_load_failure_is_retried_on_next_call() {
        let mut repository = MockMergeLockRepository::new();
        let mut calls = 0;
        repository.expect_load().times(2).returning(move || {
            calls += 1;
            if calls == 1 {
                Err(AppError::IoError("busy".to_string()))
            } else {
                Ok(Vec::new())
            }
        });

        let store = MergeLockStore::new(Arc::new(repository));

        assert!(store.is_part_of_merge_lock(&uri(1)).await.is_err());
        assert!(!store.is_part_of_merge_lock(&uri(1)).await.unwrap());
    }

    #[tokio::test]
    async fn test_duplicate_uris_in_storage_are_malformed() {
        let repository = InMemoryMergeLockRepository::with_locks(vec![lock(&[1, 2]), lock(&[2, 3])]);
        let store = MergeLockStore::new(Arc::new(repository));

        let result = store.has_merge_lock(&lock(&[1, 2]).into_uris()).await;
        assert!(matches!(result, Err(AppError::MalformedStateError(_))));
    }

    #[tokio::test]
    async fn test_mutations_are_saved() {
        let repository = Arc::new(InMemoryMergeLockRepository::new());
        let store = MergeLockStore::new(repository.clone());

        store.add_merge_lock(lock(&[1, 2, 3])).await.unwrap();
        store.replace_uri(&uri(3), &uri(4)).await.unwrap();
        store.remove_entry(&uri(1)).await.unwrap();

        assert_eq!(repository.stored().await, vec![lock(&[2, 4])]);
        assert!(store.has_merge_lock(&lock(&[2, 4]).into_uris()).await.unwrap());
    }

    #[tokio::test]
    async fn test_snapshot_is_detached_from_later_writes() {
        let store = MergeLockStore::new(Arc::new(InMemoryMergeLockRepository::with_locks(vec![
            lock(&[1, 2]),
        ])));

        let snapshot = store.snapshot().await.unwrap();
        store.add_merge_lock(lock(&[3, 4])).await.unwrap();
        store.remove_entry(&uri(1)).await.unwrap();

        assert!(snapshot.has_merge_lock(&lock(&[1, 2]).into_uris()));
        assert!(!snapshot.is_part_of_merge_lock(&uri(3)));
        assert!(!store.is_part_of_merge_lock(&uri(1)).await.unwrap());
        assert!(store.is_part_of_merge_lock(&uri(3)).await.unwrap());
    }

    #[test]
    fn test_store_is_usable_from_blocking_code() {
        let store = MergeLockStore::new(Arc::new(InMemoryMergeLockRepository::with_locks(vec![
            lock(&[1, 2]),
        ])));

        let locked = tokio_test::block_on(store.is_part_of_merge_lock(&uri(2))).unwrap();
        assert!(locked);
    }
}
