//! Cross-source anime record merging.
//!
//! Raw records scraped from many metadata providers are folded into golden
//! records: one per real-world anime. Manual merge locks take precedence over
//! fuzzy matching and are persisted between runs.
//!
//! ```no_run
//! use std::sync::Arc;
//! use animerge::{MergeLockStore, MergeLockStoreConfig, MergeOrchestrator};
//!
//! # async fn run(records: Vec<animerge::RawAnime>) -> animerge::AppResult<()> {
//! animerge::init_logger();
//!
//! let lock_store = Arc::new(MergeLockStore::from_config(&MergeLockStoreConfig::from_env())?);
//! let mut orchestrator = MergeOrchestrator::new(lock_store);
//! let golden_records = orchestrator.merge(records).await?;
//! # let _ = golden_records;
//! # Ok(())
//! # }
//! ```

pub mod modules;
pub mod shared;

pub use modules::anime::{
    AnimeDuration, AnimeSeason, AnimeStatus, AnimeType, CanonicalScore, DurationUnit,
    MetaDataProviderScore, RawAnime, ScoreAggregator, Season,
};
pub use modules::matching::{
    MatchingConfig, MatchingConfigBuilder, MatchingProbabilityCalculator,
    MatchingProbabilityResult,
};
pub use modules::merge_lock::{
    InMemoryMergeLockRepository, JsonFileMergeLockRepository, MergeLock, MergeLockRepository,
    MergeLockStore, MergeLockStoreConfig,
};
pub use modules::merging::{
    GoldenRecord, GoldenRecordId, GoldenRecordIndex, MergeConfig, MergeConfigBuilder,
    MergeMetrics, MergeOrchestrator, ProviderOrder,
};
pub use shared::errors::{AppError, AppResult};
pub use shared::utils::logger::init_logger;
