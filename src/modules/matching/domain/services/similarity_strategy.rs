use strsim::{jaro_winkler, normalized_levenshtein};

use crate::shared::errors::{AppError, AppResult};

/// Strategy for calculating similarity between two normalized titles
///
/// Returns a value between 0.0 (completely different) and 1.0 (identical).
pub trait SimilarityStrategy: Send + Sync {
    fn calculate(&self, a: &str, b: &str) -> f64;

    /// Get the name of this strategy for logging/debugging
    fn name(&self) -> &'static str;
}

/// Jaro-Winkler similarity, favours shared prefixes
#[derive(Debug, Clone)]
pub struct JaroWinklerStrategy;

impl SimilarityStrategy for JaroWinklerStrategy {
    fn calculate(&self, a: &str, b: &str) -> f64 {
        jaro_winkler(a, b)
    }

    fn name(&self) -> &'static str {
        "JaroWinkler"
    }
}

/// Normalized Levenshtein similarity, catches typos and romanization drift
#[derive(Debug, Clone)]
pub struct LevenshteinStrategy;

impl SimilarityStrategy for LevenshteinStrategy {
    fn calculate(&self, a: &str, b: &str) -> f64 {
        normalized_levenshtein(a, b)
    }

    fn name(&self) -> &'static str {
        "Levenshtein"
    }
}

/// Weighted average of several strategies
pub struct HybridStrategy {
    strategies: Vec<(Box<dyn SimilarityStrategy>, f64)>,
}

impl HybridStrategy {
    /// Weights must be non-negative and sum to 1.0.
    pub fn new(strategies: Vec<(Box<dyn SimilarityStrategy>, f64)>) -> AppResult<Self> {
        if strategies.iter().any(|(_, weight)| *weight < 0.0) {
            return Err(AppError::ValidationError(
                "Strategy weights must be non-negative".to_string(),
            ));
        }

        let weight_sum: f64 = strategies.iter().map(|(_, w)| w).sum();
        if (weight_sum - 1.0).abs() >= 0.01 {
            return Err(AppError::ValidationError(format!(
                "Strategy weights must sum to 1.0, got {}",
                weight_sum
            )));
        }

        Ok(Self { strategies })
    }

    /// Jaro-Winkler (70%) + Levenshtein (30%)
    pub fn default_hybrid() -> Self {
        Self {
            strategies: vec![
                (Box::new(JaroWinklerStrategy), 0.7),
                (Box::new(LevenshteinStrategy), 0.3),
            ],
        }
    }

    pub fn jaro_winkler_levenshtein(
        jaro_winkler_weight: f64,
        levenshtein_weight: f64,
    ) -> AppResult<Self> {
        Self::new(vec![
            (Box::new(JaroWinklerStrategy), jaro_winkler_weight),
            (Box::new(LevenshteinStrategy), levenshtein_weight),
        ])
    }

    pub fn strategy_names(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|(s, _)| s.name()).collect()
    }
}

impl SimilarityStrategy for HybridStrategy {
    fn calculate(&self, a: &str, b: &str) -> f64 {
        let score: f64 = self
            .strategies
            .iter()
            .map(|(strategy, weight)| strategy.calculate(a, b) * weight)
            .sum();
        score.clamp(0.0, 1.0)
    }

    fn name(&self) -> &'static str {
        "Hybrid"
    }
}
