pub mod application;
pub mod domain;

pub use application::{MergeConfig, MergeConfigBuilder, MergeMetrics, MergeOrchestrator, ProviderOrder};
pub use domain::{GoldenRecord, GoldenRecordId, GoldenRecordIndex};
