use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use url::Url;

use crate::modules::anime::domain::value_objects::{
    AnimeDuration, AnimeSeason, AnimeStatus, AnimeType, MetaDataProviderScore,
};

/// One provider's view of one anime, or the accumulated state of a golden record.
///
/// A record produced by a converter carries exactly one source URI. Golden records
/// reuse the same shape and grow their sets through [`RawAnime::merge_with`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawAnime {
    pub title: String,
    pub sources: BTreeSet<Url>,
    #[serde(rename = "type")]
    pub anime_type: AnimeType,
    pub episodes: u32,
    pub status: AnimeStatus,
    pub anime_season: AnimeSeason,
    pub picture: Option<Url>,
    pub thumbnail: Option<Url>,
    pub duration: AnimeDuration,
    pub synonyms: BTreeSet<String>,
    pub related_anime: BTreeSet<Url>,
    pub tags: BTreeSet<String>,
    pub studios: BTreeSet<String>,
    pub producers: BTreeSet<String>,
    pub scores: Vec<MetaDataProviderScore>,
}

impl RawAnime {
    pub fn new(title: &str, source: Url) -> Self {
        Self {
            title: normalize_title(title),
            sources: BTreeSet::from([source]),
            anime_type: AnimeType::Unknown,
            episodes: 0,
            status: AnimeStatus::Unknown,
            anime_season: AnimeSeason::unknown(),
            picture: None,
            thumbnail: None,
            duration: AnimeDuration::unknown(),
            synonyms: BTreeSet::new(),
            related_anime: BTreeSet::new(),
            tags: BTreeSet::new(),
            studios: BTreeSet::new(),
            producers: BTreeSet::new(),
            scores: Vec::new(),
        }
    }

    pub fn with_type(mut self, anime_type: AnimeType) -> Self {
        self.anime_type = anime_type;
        self
    }

    pub fn with_episodes(mut self, episodes: u32) -> Self {
        self.episodes = episodes;
        self
    }

    pub fn with_status(mut self, status: AnimeStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_season(mut self, anime_season: AnimeSeason) -> Self {
        self.anime_season = anime_season;
        self
    }

    pub fn with_picture(mut self, picture: Url, thumbnail: Url) -> Self {
        self.picture = Some(picture);
        self.thumbnail = Some(thumbnail);
        self
    }

    pub fn with_duration(mut self, duration: AnimeDuration) -> Self {
        self.duration = duration;
        self
    }

    pub fn with_synonyms<I, S>(mut self, synonyms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for synonym in synonyms {
            self.add_synonym(synonym.as_ref());
        }
        self
    }

    pub fn with_related_anime(mut self, related: impl IntoIterator<Item = Url>) -> Self {
        for uri in related {
            self.add_related_anime(uri);
        }
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.tags.extend(normalize_labels(tags));
        self
    }

    pub fn with_studios<I, S>(mut self, studios: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.studios.extend(normalize_labels(studios));
        self
    }

    pub fn with_producers<I, S>(mut self, producers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.producers.extend(normalize_labels(producers));
        self
    }

    pub fn with_score(mut self, score: MetaDataProviderScore) -> Self {
        self.add_score(score);
        self
    }

    /// Hostname of the provider this record was scraped from.
    ///
    /// For golden records this is the provider of the lexicographically first source.
    pub fn provider(&self) -> &str {
        self.sources
            .iter()
            .next()
            .and_then(|uri| uri.host_str())
            .unwrap_or_default()
    }

    /// Title followed by all synonyms
    pub fn titles(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.title.as_str()).chain(self.synonyms.iter().map(String::as_str))
    }

    /// Adds a synonym unless it is blank or equals the title. Returns whether it was new.
    pub fn add_synonym(&mut self, synonym: &str) -> bool {
        let synonym = normalize_title(synonym);
        if synonym.is_empty() || synonym == self.title {
            return false;
        }
        self.synonyms.insert(synonym)
    }

    /// Related anime never points to one of the record's own sources.
    pub fn add_related_anime(&mut self, uri: Url) -> bool {
        if self.sources.contains(&uri) {
            return false;
        }
        self.related_anime.insert(uri)
    }

    pub fn add_score(&mut self, score: MetaDataProviderScore) {
        if !self.scores.contains(&score) {
            self.scores.push(score);
        }
    }

    /// Merge `other` into this record.
    ///
    /// Sets are unioned, `other`'s title becomes a synonym and scalar fields are only
    /// taken over while this record's value is still unknown. Returns the synonyms
    /// that were newly added so callers can index them.
    pub fn merge_with(&mut self, other: &RawAnime) -> Vec<String> {
        let mut added_synonyms = Vec::new();

        for title in other.titles() {
            let normalized = normalize_title(title);
            if self.add_synonym(&normalized) {
                added_synonyms.push(normalized);
            }
        }

        self.sources.extend(other.sources.iter().cloned());
        for uri in &other.related_anime {
            self.add_related_anime(uri.clone());
        }
        // A newly merged source may have been listed as related before
        let sources = &self.sources;
        self.related_anime.retain(|uri| !sources.contains(uri));

        self.tags.extend(other.tags.iter().cloned());
        self.studios.extend(other.studios.iter().cloned());
        self.producers.extend(other.producers.iter().cloned());
        for score in &other.scores {
            self.add_score(score.clone());
        }

        if self.episodes == 0 {
            self.episodes = other.episodes;
        }
        if self.anime_type.is_unknown() {
            self.anime_type = other.anime_type;
        }
        if self.status.is_unknown() {
            self.status = other.status;
        }
        self.anime_season.fill_unknown_from(&other.anime_season);
        if self.duration.is_unknown() {
            self.duration = other.duration;
        }
        if self.picture.is_none() {
            self.picture = other.picture.clone();
            self.thumbnail = other.thumbnail.clone();
        }

        added_synonyms
    }
}

/// Trim and collapse inner whitespace
fn normalize_title(title: &str) -> String {
    title.split_whitespace().collect::<Vec<&str>>().join(" ")
}

fn normalize_labels<I, S>(labels: I) -> impl Iterator<Item = String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    labels
        .into_iter()
        .map(|label| normalize_title(label.as_ref()).to_lowercase())
        .filter(|label| !label.is_empty())
}
