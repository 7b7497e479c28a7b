pub mod config;
pub mod metrics;
pub mod orchestrator;

pub use config::{MergeConfig, MergeConfigBuilder, ProviderOrder};
pub use metrics::{MergeMetrics, RunTimer};
pub use orchestrator::MergeOrchestrator;
