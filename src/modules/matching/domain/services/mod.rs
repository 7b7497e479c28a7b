pub mod config;
pub mod probability_calculator;
pub mod similarity_strategy;
pub mod title_normalizer;

pub use config::{MatchingConfig, MatchingConfigBuilder};
pub use probability_calculator::{MatchingProbabilityCalculator, MatchingProbabilityResult};
pub use similarity_strategy::{
    HybridStrategy, JaroWinklerStrategy, LevenshteinStrategy, SimilarityStrategy,
};
pub use title_normalizer::{
    FoldLongVowelsTransform, LowercaseTransform, NormalizeWhitespaceTransform,
    ReplaceSpecialCharsTransform, TitleNormalizer, TitleTokenizer, TitleTransformation,
};
