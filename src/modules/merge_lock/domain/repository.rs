use async_trait::async_trait;

use super::merge_lock::MergeLock;
use crate::shared::errors::AppResult;

/// Durable storage for merge locks.
///
/// `save` always receives the complete set of locks and replaces whatever was
/// stored before.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MergeLockRepository: Send + Sync {
    /// A store that was never written loads as empty.
    async fn load(&self) -> AppResult<Vec<MergeLock>>;
    async fn save(&self, locks: &[MergeLock]) -> AppResult<()>;
}
