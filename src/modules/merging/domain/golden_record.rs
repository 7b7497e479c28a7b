use serde::Serialize;
use std::fmt;

use crate::modules::anime::{CanonicalScore, RawAnime};

/// Position of a golden record in its index. Only valid until the index is cleared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct GoldenRecordId(usize);

impl GoldenRecordId {
    pub(crate) fn new(value: usize) -> Self {
        Self(value)
    }

    pub fn value(&self) -> usize {
        self.0
    }
}

impl fmt::Display for GoldenRecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "golden-{}", self.0)
    }
}

/// Canonical record for one real-world anime, accumulated from provider records
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GoldenRecord {
    id: GoldenRecordId,
    anime: RawAnime,
    score: Option<CanonicalScore>,
}

impl GoldenRecord {
    pub(crate) fn new(id: GoldenRecordId, anime: RawAnime, score: Option<CanonicalScore>) -> Self {
        Self { id, anime, score }
    }

    pub fn id(&self) -> GoldenRecordId {
        self.id
    }

    pub fn anime(&self) -> &RawAnime {
        &self.anime
    }

    pub(crate) fn anime_mut(&mut self) -> &mut RawAnime {
        &mut self.anime
    }

    /// `None` while no merged provider published a score
    pub fn score(&self) -> Option<&CanonicalScore> {
        self.score.as_ref()
    }

    pub(crate) fn set_score(&mut self, score: Option<CanonicalScore>) {
        self.score = score;
    }

    pub fn into_anime(self) -> RawAnime {
        self.anime
    }
}
