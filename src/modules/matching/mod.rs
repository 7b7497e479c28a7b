pub mod domain;

pub use domain::services::{
    HybridStrategy, MatchingConfig, MatchingConfigBuilder, MatchingProbabilityCalculator,
    MatchingProbabilityResult, SimilarityStrategy, TitleNormalizer, TitleTokenizer,
};
