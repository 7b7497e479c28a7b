use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::modules::merge_lock::domain::{MergeLock, MergeLockRepository};
use crate::shared::errors::AppResult;

/// Keeps merge locks in process memory. Useful for one-off runs and tests.
#[derive(Default)]
pub struct InMemoryMergeLockRepository {
    locks: Mutex<Vec<MergeLock>>,
}

impl InMemoryMergeLockRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_locks(locks: Vec<MergeLock>) -> Self {
        Self {
            locks: Mutex::new(locks),
        }
    }

    /// Snapshot of what was last saved
    pub async fn stored(&self) -> Vec<MergeLock> {
        self.locks.lock().await.clone()
    }
}

#[async_trait]
impl MergeLockRepository for InMemoryMergeLockRepository {
    async fn load(&self) -> AppResult<Vec<MergeLock>> {
        Ok(self.locks.lock().await.clone())
    }

    async fn save(&self, locks: &[MergeLock]) -> AppResult<()> {
        *self.locks.lock().await = locks.to_vec();
        Ok(())
    }
}
