pub mod merge_lock;
pub mod repository;

pub use merge_lock::{MergeLock, MergeLockRegistry};
pub use repository::MergeLockRepository;
