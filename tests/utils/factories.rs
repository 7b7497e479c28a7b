/// Test data factories using builder pattern
///
/// Provides convenient methods to create raw provider records with sensible defaults
use animerge::{
    AnimeDuration, AnimeSeason, AnimeStatus, AnimeType, DurationUnit, MetaDataProviderScore,
    RawAnime, Season,
};
use url::Url;

pub struct AnimeFactory {
    title: String,
    source: String,
    anime_type: AnimeType,
    episodes: u32,
    status: AnimeStatus,
    season: AnimeSeason,
    duration: AnimeDuration,
    synonyms: Vec<String>,
    related_anime: Vec<String>,
    tags: Vec<String>,
    studios: Vec<String>,
    scores: Vec<MetaDataProviderScore>,
}

impl Default for AnimeFactory {
    fn default() -> Self {
        Self {
            title: "Test Anime".to_string(),
            source: format!(
                "https://myanimelist.net/anime/{}",
                rand::random::<u32>() % 1000000 + 1000
            ),
            anime_type: AnimeType::Unknown,
            episodes: 0,
            status: AnimeStatus::Unknown,
            season: AnimeSeason::unknown(),
            duration: AnimeDuration::unknown(),
            synonyms: Vec::new(),
            related_anime: Vec::new(),
            tags: Vec::new(),
            studios: Vec::new(),
            scores: Vec::new(),
        }
    }
}

impl AnimeFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn minimal() -> Self {
        Self::default()
    }

    /// A TV series with every scalar filled in
    pub fn complete() -> Self {
        Self::default()
            .with_title("Complete Test Anime")
            .with_type(AnimeType::TV)
            .with_episodes(12)
            .with_status(AnimeStatus::Finished)
            .with_season(Season::Spring, 2020)
            .with_duration(24, DurationUnit::Minutes)
            .with_tags(vec!["action", "fantasy"])
            .with_studios(vec!["Test Studio"])
    }

    pub fn with_title(mut self, title: &str) -> Self {
        self.title = title.to_string();
        self
    }

    pub fn with_source(mut self, source: &str) -> Self {
        self.source = source.to_string();
        self
    }

    pub fn with_myanimelist_id(self, id: u32) -> Self {
        self.with_source(&format!("https://myanimelist.net/anime/{}", id))
    }

    pub fn with_anilist_id(self, id: u32) -> Self {
        self.with_source(&format!("https://anilist.co/anime/{}", id))
    }

    pub fn with_kitsu_id(self, id: u32) -> Self {
        self.with_source(&format!("https://kitsu.app/anime/{}", id))
    }

    pub fn with_anidb_id(self, id: u32) -> Self {
        self.with_source(&format!("https://anidb.net/anime/{}", id))
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

    pub fn with_season(mut self, season: Season, year: u16) -> Self {
        self.season = AnimeSeason::new(season, year);
        self
    }

    pub fn with_duration(mut self, value: u32, unit: DurationUnit) -> Self {
        self.duration = AnimeDuration::new(value, unit);
        self
    }

    pub fn with_synonyms(mut self, synonyms: Vec<&str>) -> Self {
        self.synonyms = synonyms.into_iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn with_related_anime(mut self, related: Vec<&str>) -> Self {
        self.related_anime = related.into_iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn with_tags(mut self, tags: Vec<&str>) -> Self {
        self.tags = tags.into_iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn with_studios(mut self, studios: Vec<&str>) -> Self {
        self.studios = studios.into_iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn with_score(mut self, hostname: &str, value: f64, min: f64, max: f64) -> Self {
        self.scores
            .push(MetaDataProviderScore::new(hostname, value, min, max).unwrap());
        self
    }

    pub fn build(self) -> RawAnime {
        let source = Url::parse(&self.source).unwrap();
        let related: Vec<Url> = self
            .related_anime
            .iter()
            .map(|uri| Url::parse(uri).unwrap())
            .collect();

        let mut anime = RawAnime::new(&self.title, source)
            .with_type(self.anime_type)
            .with_episodes(self.episodes)
            .with_status(self.status)
            .with_season(self.season)
            .with_duration(self.duration)
            .with_synonyms(self.synonyms)
            .with_related_anime(related)
            .with_tags(self.tags)
            .with_studios(self.studios);

        for score in self.scores {
            anime = anime.with_score(score);
        }
        anime
    }
}

// Convenience functions
pub fn minimal_anime() -> RawAnime {
    AnimeFactory::minimal().build()
}

pub fn complete_anime() -> RawAnime {
    AnimeFactory::complete().build()
}

/// "5-toubun no Hanayome*" as listed on MyAnimeList
pub fn quintuplets_myanimelist() -> RawAnime {
    AnimeFactory::new()
        .with_title("5-toubun no Hanayome*")
        .with_myanimelist_id(58755)
        .with_type(AnimeType::Special)
        .with_episodes(2)
        .with_status(AnimeStatus::Finished)
        .with_season(Season::Fall, 2024)
        .with_synonyms(vec!["Gotoubun no Hanayome*", "The Quintessential Quintuplets*"])
        .with_score("myanimelist.net", 7.9, 1.0, 10.0)
        .build()
}

/// The same special as listed on AniList
pub fn quintuplets_anilist() -> RawAnime {
    AnimeFactory::new()
        .with_title("The Quintessential Quintuplets*")
        .with_anilist_id(177191)
        .with_type(AnimeType::Special)
        .with_episodes(2)
        .with_season(Season::Fall, 2024)
        .with_synonyms(vec!["5-toubun no Hanayome*", "五等分の花嫁*"])
        .with_score("anilist.co", 75.0, 1.0, 100.0)
        .build()
}
