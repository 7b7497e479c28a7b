pub mod application;
pub mod domain;
pub mod infrastructure;

pub use application::MergeLockStore;
pub use domain::{MergeLock, MergeLockRegistry, MergeLockRepository};
pub use infrastructure::{
    InMemoryMergeLockRepository, JsonFileMergeLockRepository, MergeLockStoreConfig,
};
