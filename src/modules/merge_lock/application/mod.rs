pub mod store;

pub use store::MergeLockStore;
