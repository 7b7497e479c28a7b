/// Configuration for the matching probability calculator
///
/// The four signal weights form a weighted average and must sum to 1.0. The
/// related-anime overlap is added on top as a bonus and the total is capped at 1.0.
#[derive(Debug, Clone)]
pub struct MatchingConfig {
    // Signal weights
    /// Weight of the best title/synonym similarity
    pub title_weight: f64,

    /// Weight of episode count agreement
    pub episodes_weight: f64,

    /// Weight of type agreement
    pub type_weight: f64,

    /// Weight of season + year agreement
    pub season_weight: f64,

    /// Maximum bonus for overlapping related anime
    pub related_anime_bonus: f64,

    /// Credit for a scalar signal that one side does not know
    pub unknown_credit: f64,

    // Fuzzy matching
    /// Weight for Jaro-Winkler similarity (0.0 to 1.0)
    pub jaro_winkler_weight: f64,

    /// Weight for Levenshtein similarity (0.0 to 1.0)
    pub levenshtein_weight: f64,

    // Title index
    /// Words that never become index tokens on their own
    pub stop_words: Vec<String>,

    /// Minimum token length in characters
    pub min_token_length: usize,
}

impl MatchingConfig {
    pub fn new() -> Self {
        Self {
            title_weight: 0.5,
            episodes_weight: 0.15,
            type_weight: 0.15,
            season_weight: 0.2,
            related_anime_bonus: 0.1,
            unknown_credit: 0.5,

            jaro_winkler_weight: 0.7,
            levenshtein_weight: 0.3,

            // English articles and the Japanese particles found in most romanized titles
            stop_words: ["the", "a", "an", "of", "no", "to", "wa", "ga", "wo", "ni", "de"]
                .iter()
                .map(|w| w.to_string())
                .collect(),
            min_token_length: 1,
        }
    }

    /// Creates a minimal configuration for testing
    #[cfg(test)]
    pub fn minimal() -> Self {
        Self {
            related_anime_bonus: 0.0,
            stop_words: vec![],
            ..Self::new()
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        let signal_weights = [
            self.title_weight,
            self.episodes_weight,
            self.type_weight,
            self.season_weight,
        ];

        if signal_weights.iter().any(|w| *w < 0.0) {
            return Err("Signal weights must be non-negative".to_string());
        }

        let signal_sum: f64 = signal_weights.iter().sum();
        if (signal_sum - 1.0).abs() > 0.01 {
            return Err(format!("Signal weights must sum to 1.0, got {}", signal_sum));
        }

        if !(0.0..=1.0).contains(&self.related_anime_bonus) {
            return Err(format!(
                "related_anime_bonus must be between 0.0 and 1.0, got {}",
                self.related_anime_bonus
            ));
        }

        if !(0.0..=1.0).contains(&self.unknown_credit) {
            return Err(format!(
                "unknown_credit must be between 0.0 and 1.0, got {}",
                self.unknown_credit
            ));
        }

        if self.jaro_winkler_weight < 0.0 || self.levenshtein_weight < 0.0 {
            return Err("Fuzzy matching weights must be non-negative".to_string());
        }

        let fuzzy_sum = self.jaro_winkler_weight + self.levenshtein_weight;
        if (fuzzy_sum - 1.0).abs() > 0.01 {
            return Err(format!(
                "Fuzzy matching weights must sum to 1.0, got {}",
                fuzzy_sum
            ));
        }

        if self.min_token_length == 0 {
            return Err("min_token_length must be > 0".to_string());
        }

        Ok(())
    }
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for MatchingConfig
#[derive(Default)]
pub struct MatchingConfigBuilder {
    config: MatchingConfig,
}

impl MatchingConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: MatchingConfig::new(),
        }
    }

    pub fn title_weight(mut self, weight: f64) -> Self {
        self.config.title_weight = weight;
        self
    }

    pub fn episodes_weight(mut self, weight: f64) -> Self {
        self.config.episodes_weight = weight;
        self
    }

    pub fn type_weight(mut self, weight: f64) -> Self {
        self.config.type_weight = weight;
        self
    }

    pub fn season_weight(mut self, weight: f64) -> Self {
        self.config.season_weight = weight;
        self
    }

    pub fn related_anime_bonus(mut self, bonus: f64) -> Self {
        self.config.related_anime_bonus = bonus;
        self
    }

    pub fn unknown_credit(mut self, credit: f64) -> Self {
        self.config.unknown_credit = credit;
        self
    }

    pub fn jaro_winkler_weight(mut self, weight: f64) -> Self {
        self.config.jaro_winkler_weight = weight;
        self
    }

    pub fn levenshtein_weight(mut self, weight: f64) -> Self {
        self.config.levenshtein_weight = weight;
        self
    }

    pub fn stop_words(mut self, words: Vec<String>) -> Self {
        self.config.stop_words = words;
        self
    }

    pub fn min_token_length(mut self, length: usize) -> Self {
        self.config.min_token_length = length;
        self
    }

    pub fn build(self) -> Result<MatchingConfig, String> {
        self.config.validate()?;
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(MatchingConfig::default().validate().is_ok());
        assert!(MatchingConfig::minimal().validate().is_ok());
    }

    #[test]
    fn test_signal_weights_must_sum_to_one() {
        let config = MatchingConfigBuilder::new().title_weight(0.9).build();

        assert!(config.unwrap_err().contains("must sum to 1.0"));
    }

    #[test]
    fn test_signal_weights_must_be_non_negative() {
        let config = MatchingConfigBuilder::new()
            .title_weight(1.2)
            .episodes_weight(-0.35)
            .build();

        assert!(config.unwrap_err().contains("non-negative"));
    }

    #[test]
    fn test_fuzzy_weights_must_sum_to_one() {
        let config = MatchingConfigBuilder::new()
            .jaro_winkler_weight(0.7)
            .levenshtein_weight(0.32)
            .build();

        assert!(config.unwrap_err().contains("Fuzzy matching"));
    }

    #[test]
    fn test_bonus_and_credit_are_bounded() {
        assert!(MatchingConfigBuilder::new()
            .related_anime_bonus(1.5)
            .build()
            .is_err());
        assert!(MatchingConfigBuilder::new()
            .unknown_credit(-0.1)
            .build()
            .is_err());
    }

    #[test]
    fn test_zero_token_length_is_invalid() {
        let result = MatchingConfigBuilder::new().min_token_length(0).build();
        assert!(result.unwrap_err().contains("min_token_length"));
    }

    #[test]
    fn test_builder_chaining() {
        let config = MatchingConfigBuilder::new()
            .title_weight(0.4)
            .episodes_weight(0.2)
            .type_weight(0.2)
            .season_weight(0.2)
            .stop_words(vec![])
            .build()
            .unwrap();

        assert_eq!(config.title_weight, 0.4);
        assert!(config.stop_words.is_empty());
    }
}
