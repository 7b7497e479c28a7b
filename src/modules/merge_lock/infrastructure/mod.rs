pub mod config;
pub mod in_memory_repository;
pub mod json_file_repository;

pub use config::{MergeLockStoreConfig, MERGE_LOCKS_FILE_ENV};
pub use in_memory_repository::InMemoryMergeLockRepository;
pub use json_file_repository::JsonFileMergeLockRepository;
