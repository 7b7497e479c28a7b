use serde::{Deserialize, Serialize};

use crate::modules::anime::domain::value_objects::MetaDataProviderScore;

/// Combined score of a golden record on the canonical 1.0-10.0 scale
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalScore {
    pub arithmetic_mean: f64,
    pub median: f64,
    pub arithmetic_geometric_mean: f64,
}

/// Rescales per-provider scores and combines them.
///
/// Every score is first mapped onto 1.0-10.0 with its own provider range, so a
/// 75/100 on one site and a 7.7/10 on another weigh the same.
#[derive(Debug, Clone)]
pub struct ScoreAggregator {
    convergence_epsilon: f64,
    max_iterations: usize,
}

impl Default for ScoreAggregator {
    fn default() -> Self {
        Self {
            convergence_epsilon: 1e-12,
            max_iterations: 64,
        }
    }
}

impl ScoreAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// `None` when no provider supplied a score.
    pub fn aggregate(&self, scores: &[MetaDataProviderScore]) -> Option<CanonicalScore> {
        if scores.is_empty() {
            return None;
        }

        let mut normalized: Vec<f64> = scores.iter().map(|s| s.normalized()).collect();
        normalized.sort_by(|a, b| a.total_cmp(b));

        Some(CanonicalScore {
            arithmetic_mean: self.arithmetic_mean(&normalized),
            median: self.median(&normalized),
            arithmetic_geometric_mean: self.arithmetic_geometric_mean(&normalized),
        })
    }

    fn arithmetic_mean(&self, values: &[f64]) -> f64 {
        values.iter().sum::<f64>() / values.len() as f64
    }

    // expects sorted input
    fn median(&self, values: &[f64]) -> f64 {
        let mid = values.len() / 2;
        if values.len() % 2 == 0 {
            (values[mid - 1] + values[mid]) / 2.0
        } else {
            values[mid]
        }
    }

    fn geometric_mean(&self, values: &[f64]) -> f64 {
        // values are >= 1.0 after normalization, ln is safe
        let log_sum: f64 = values.iter().map(|v| v.ln()).sum();
        (log_sum / values.len() as f64).exp()
    }

    fn arithmetic_geometric_mean(&self, values: &[f64]) -> f64 {
        let mut a = self.arithmetic_mean(values);
        let mut g = self.geometric_mean(values);

        for _ in 0..self.max_iterations {
            if (a - g).abs() <= self.convergence_epsilon {
                break;
            }
            let next_a = (a + g) / 2.0;
            g = (a * g).sqrt();
            a = next_a;
        }

        a
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score(host: &str, value: f64, min: f64, max: f64) -> MetaDataProviderScore {
        MetaDataProviderScore::new(host, value, min, max).unwrap()
    }

    fn all_providers() -> Vec<MetaDataProviderScore> {
        vec![
            score("anidb.net", 6.63, 1.0, 10.0),
            score("anilist.co", 75.0, 1.0, 100.0),
            score("anime-planet.com", 3.845, 0.5, 5.0),
            score("anisearch.com", 3.9, 0.1, 5.0),
            score("kitsu.app", 76.95, 1.0, 100.0),
            score("livechart.me", 8.35, 1.0, 10.0),
            score("myanimelist.net", 8.62, 1.0, 10.0),
            score("notify.moe", 7.0, 1.0, 10.0),
            score("simkl.com", 7.9, 1.0, 10.0),
        ]
    }

    #[test]
    fn test_empty_input_has_no_score() {
        assert_eq!(ScoreAggregator::new().aggregate(&[]), None);
    }

    #[test]
    fn test_single_score() {
        let result = ScoreAggregator::new()
            .aggregate(&[score("myanimelist.net", 8.62, 1.0, 10.0)])
            .unwrap();

        assert!((result.arithmetic_mean - 8.62).abs() < 1e-9);
        assert!((result.median - 8.62).abs() < 1e-9);
        assert!((result.arithmetic_geometric_mean - 8.62).abs() < 1e-9);
    }

    #[test]
    fn test_all_providers_are_rescaled_before_combining() {
        let result = ScoreAggregator::new().aggregate(&all_providers()).unwrap();

        assert!((result.arithmetic_mean - 7.7557).abs() < 0.0001);
        assert!((result.median - 7.9).abs() < 0.0001);
        assert!((result.arithmetic_geometric_mean - 7.7445).abs() < 0.0001);
    }

    #[test]
    fn test_even_count_median_averages_middle_values() {
        let result = ScoreAggregator::new()
            .aggregate(&[
                score("a", 2.0, 1.0, 10.0),
                score("b", 4.0, 1.0, 10.0),
                score("c", 8.0, 1.0, 10.0),
                score("d", 9.0, 1.0, 10.0),
            ])
            .unwrap();

        assert!((result.median - 6.0).abs() < 1e-9);
    }

    #[test]
    fn test_agm_lies_between_geometric_and_arithmetic_mean() {
        let aggregator = ScoreAggregator::new();
        let result = aggregator.aggregate(&all_providers()).unwrap();
        let mut values: Vec<f64> = all_providers().iter().map(|s| s.normalized()).collect();
        values.sort_by(|a, b| a.total_cmp(b));
        let gm = aggregator.geometric_mean(&values);

        assert!(result.arithmetic_geometric_mean <= result.arithmetic_mean + 1e-12);
        assert!(result.arithmetic_geometric_mean >= gm - 1e-12);
    }

    #[test]
    fn test_input_order_does_not_matter() {
        let mut reversed = all_providers();
        reversed.reverse();

        assert_eq!(
            ScoreAggregator::new().aggregate(&all_providers()),
            ScoreAggregator::new().aggregate(&reversed)
        );
    }
}
