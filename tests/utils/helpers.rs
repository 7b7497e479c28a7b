/// Shared setup for merge tests
use animerge::{
    InMemoryMergeLockRepository, JsonFileMergeLockRepository, MergeLock, MergeLockStore,
    MergeOrchestrator, RawAnime,
};
use std::collections::BTreeSet;
use std::path::Path;
use std::sync::Arc;
use url::Url;

pub fn uri(s: &str) -> Url {
    Url::parse(s).unwrap()
}

pub fn lock(uris: &[&str]) -> MergeLock {
    uris.iter().map(|s| uri(s)).collect()
}

pub fn in_memory_store(locks: Vec<MergeLock>) -> Arc<MergeLockStore> {
    Arc::new(MergeLockStore::new(Arc::new(
        InMemoryMergeLockRepository::with_locks(locks),
    )))
}

pub fn file_store(path: &Path) -> Arc<MergeLockStore> {
    Arc::new(MergeLockStore::new(Arc::new(JsonFileMergeLockRepository::new(path))))
}

pub fn orchestrator(locks: Vec<MergeLock>) -> MergeOrchestrator {
    animerge::init_logger();
    MergeOrchestrator::new(in_memory_store(locks))
}

/// The golden record holding `source`
pub fn golden_with_source<'a>(golden: &'a [RawAnime], source: &str) -> &'a RawAnime {
    let source = uri(source);
    golden
        .iter()
        .find(|anime| anime.sources.contains(&source))
        .unwrap()
}

/// Output reduced to sorted source groups, for order-independent comparison
pub fn source_groups(golden: &[RawAnime]) -> BTreeSet<BTreeSet<Url>> {
    golden.iter().map(|anime| anime.sources.clone()).collect()
}
