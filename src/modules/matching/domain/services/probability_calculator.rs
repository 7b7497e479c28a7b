use std::collections::BTreeSet;

use super::config::MatchingConfig;
use super::similarity_strategy::{HybridStrategy, SimilarityStrategy};
use super::title_normalizer::TitleNormalizer;
use crate::modules::anime::domain::value_objects::AnimeSeason;
use crate::modules::anime::RawAnime;
use crate::shared::errors::{AppError, AppResult};

/// How likely two records describe the same anime, with the signals behind it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchingProbabilityResult {
    /// Combined probability in [0.0, 1.0]
    pub probability: f64,
    pub title_similarity: f64,
    pub episodes: f64,
    pub anime_type: f64,
    pub season: f64,
    pub related_anime_overlap: f64,
}

impl MatchingProbabilityResult {
    pub fn is_match(&self, threshold: f64) -> bool {
        self.probability >= threshold
    }
}

/// Scores a raw record against a golden record candidate.
///
/// Pure and deterministic. Every signal is in [0.0, 1.0] and enters the total with
/// a non-negative weight, so raising any signal never lowers the probability.
pub struct MatchingProbabilityCalculator {
    config: MatchingConfig,
    normalizer: TitleNormalizer,
    similarity: Box<dyn SimilarityStrategy>,
}

impl MatchingProbabilityCalculator {
    pub fn new(config: MatchingConfig) -> AppResult<Self> {
        config.validate().map_err(AppError::ValidationError)?;
        let similarity = HybridStrategy::jaro_winkler_levenshtein(
            config.jaro_winkler_weight,
            config.levenshtein_weight,
        )?;

        Ok(Self {
            config,
            normalizer: TitleNormalizer::matching_pipeline(),
            similarity: Box::new(similarity),
        })
    }

    /// Use a different title similarity strategy. Its output must be symmetric.
    pub fn with_strategy(
        config: MatchingConfig,
        similarity: Box<dyn SimilarityStrategy>,
    ) -> AppResult<Self> {
        config.validate().map_err(AppError::ValidationError)?;
        Ok(Self {
            config,
            normalizer: TitleNormalizer::matching_pipeline(),
            similarity,
        })
    }

    pub fn config(&self) -> &MatchingConfig {
        &self.config
    }

    pub fn calculate(&self, candidate: &RawAnime, target: &RawAnime) -> MatchingProbabilityResult {
        let title_similarity = self.title_similarity(candidate, target);
        let episodes = self.episodes_agreement(candidate.episodes, target.episodes);
        let anime_type = if candidate.anime_type.is_unknown() || target.anime_type.is_unknown() {
            self.config.unknown_credit
        } else if candidate.anime_type == target.anime_type {
            1.0
        } else {
            0.0
        };
        let season = self.season_agreement(&candidate.anime_season, &target.anime_season);
        let related_anime_overlap =
            related_anime_overlap(&candidate.related_anime, &target.related_anime);

        let weighted = self.config.title_weight * title_similarity
            + self.config.episodes_weight * episodes
            + self.config.type_weight * anime_type
            + self.config.season_weight * season
            + self.config.related_anime_bonus * related_anime_overlap;

        MatchingProbabilityResult {
            probability: weighted.clamp(0.0, 1.0),
            title_similarity,
            episodes,
            anime_type,
            season,
            related_anime_overlap,
        }
    }

    /// Best similarity over every title/synonym pair of both records
    fn title_similarity(&self, a: &RawAnime, b: &RawAnime) -> f64 {
        let titles_a = self.normalized_titles(a);
        let titles_b = self.normalized_titles(b);

        if !titles_a.is_disjoint(&titles_b) {
            return 1.0;
        }

        let mut best: f64 = 0.0;
        for title_a in &titles_a {
            for title_b in &titles_b {
                // fixed argument order keeps the score symmetric
                let (first, second) = if title_a <= title_b {
                    (title_a, title_b)
                } else {
                    (title_b, title_a)
                };
                best = best.max(self.similarity.calculate(first, second));
            }
        }
        best.clamp(0.0, 1.0)
    }

    fn normalized_titles(&self, anime: &RawAnime) -> BTreeSet<String> {
        anime
            .titles()
            .map(|title| self.normalizer.normalize(title))
            .filter(|title| !title.is_empty())
            .collect()
    }

    fn episodes_agreement(&self, a: u32, b: u32) -> f64 {
        match (a, b) {
            (0, _) | (_, 0) => self.config.unknown_credit,
            (a, b) if a == b => 1.0,
            _ => 0.0,
        }
    }

    fn season_agreement(&self, a: &AnimeSeason, b: &AnimeSeason) -> f64 {
        match (a.year, b.year) {
            (Some(year_a), Some(year_b)) if year_a != year_b => 0.0,
            (Some(_), Some(_)) => {
                if !a.season.is_undefined() && a.season == b.season {
                    1.0
                } else {
                    // providers disagree on season boundaries, the year is the hard signal
                    self.config.unknown_credit
                }
            }
            _ => self.config.unknown_credit,
        }
    }
}

impl Default for MatchingProbabilityCalculator {
    fn default() -> Self {
        Self {
            config: MatchingConfig::default(),
            normalizer: TitleNormalizer::matching_pipeline(),
            similarity: Box::new(HybridStrategy::default_hybrid()),
        }
    }
}

/// Share of the smaller related-anime set that also appears in the other one
fn related_anime_overlap<T: Ord>(a: &BTreeSet<T>, b: &BTreeSet<T>) -> f64 {
    let smaller = a.len().min(b.len());
    if smaller == 0 {
        return 0.0;
    }
    a.intersection(b).count() as f64 / smaller as f64
}
