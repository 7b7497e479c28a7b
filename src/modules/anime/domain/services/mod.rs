pub mod score_aggregator;

pub use score_aggregator::{CanonicalScore, ScoreAggregator};
