pub mod domain;

// Re-exports for easy external access
pub use domain::services::{CanonicalScore, ScoreAggregator};
pub use domain::RawAnime;

// Re-export common value objects for shorter imports
pub use domain::value_objects::{
    AnimeDuration, AnimeSeason, AnimeStatus, AnimeType, DurationUnit, MetaDataProviderScore,
    Season,
};
