use crate::modules::matching::MatchingConfig;

/// Order in which provider groups seed the index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProviderOrder {
    /// Largest provider first
    #[default]
    Descending,
    /// Smallest provider first
    Ascending,
}

/// Configuration for the merge orchestrator
#[derive(Debug, Clone)]
pub struct MergeConfig {
    /// Minimum probability for merging into a golden record
    pub matching_threshold: f64,

    /// Number of run-throughs. The last one creates a golden record for every leftover.
    pub max_runs: u8,

    pub provider_order: ProviderOrder,

    pub matching: MatchingConfig,
}

impl MergeConfig {
    pub fn new() -> Self {
        Self {
            matching_threshold: 0.8,
            max_runs: 4,
            provider_order: ProviderOrder::Descending,
            matching: MatchingConfig::new(),
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if !(self.matching_threshold > 0.0 && self.matching_threshold <= 1.0) {
            return Err(format!(
                "matching_threshold must be in (0.0, 1.0], got {}",
                self.matching_threshold
            ));
        }

        if self.max_runs < 2 {
            return Err(format!("max_runs must be at least 2, got {}", self.max_runs));
        }

        self.matching.validate()
    }
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for MergeConfig
#[derive(Default)]
pub struct MergeConfigBuilder {
    config: MergeConfig,
}

impl MergeConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: MergeConfig::new(),
        }
    }

    pub fn matching_threshold(mut self, threshold: f64) -> Self {
        self.config.matching_threshold = threshold;
        self
    }

    pub fn max_runs(mut self, max_runs: u8) -> Self {
        self.config.max_runs = max_runs;
        self
    }

    pub fn provider_order(mut self, order: ProviderOrder) -> Self {
        self.config.provider_order = order;
        self
    }

    pub fn matching(mut self, matching: MatchingConfig) -> Self {
        self.config.matching = matching;
        self
    }

    pub fn build(self) -> Result<MergeConfig, String> {
        self.config.validate()?;
        Ok(self.config)
    }
}
