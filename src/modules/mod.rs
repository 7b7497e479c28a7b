// Bounded contexts, leaves first
pub mod anime;
pub mod matching;
pub mod merge_lock;
pub mod merging;
