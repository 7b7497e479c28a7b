use serde::{Deserialize, Serialize};
use std::fmt;

/// Anime season enum for better type safety
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Season {
    Undefined,
    Winter,
    Spring,
    Summer,
    Fall,
}

impl Season {
    /// Get season from string (case insensitive)
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "winter" => Self::Winter,
            "spring" => Self::Spring,
            "summer" => Self::Summer,
            "fall" | "autumn" => Self::Fall,
            _ => Self::Undefined,
        }
    }

    /// Get season from month (1-12)
    pub fn from_month(month: u32) -> Self {
        match month {
            12 | 1 | 2 => Self::Winter,
            3..=5 => Self::Spring,
            6..=8 => Self::Summer,
            9..=11 => Self::Fall,
            _ => Self::Undefined,
        }
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, Self::Undefined)
    }
}

impl Default for Season {
    fn default() -> Self {
        Self::Undefined
    }
}

/// Season and year an anime premiered in. Either part may be unknown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct AnimeSeason {
    pub season: Season,
    pub year: Option<u16>,
}

impl AnimeSeason {
    pub fn new(season: Season, year: u16) -> Self {
        Self {
            season,
            year: Some(year),
        }
    }

    pub fn unknown() -> Self {
        Self::default()
    }

    pub fn is_unknown(&self) -> bool {
        self.season.is_undefined() && self.year.is_none()
    }

    /// Fill whichever half is unknown from `other`.
    pub fn fill_unknown_from(&mut self, other: &AnimeSeason) {
        if self.season.is_undefined() {
            self.season = other.season;
        }
        if self.year.is_none() {
            self.year = other.year;
        }
    }
}

impl fmt::Display for AnimeSeason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.year {
            Some(year) => write!(f, "{:?} {}", self.season, year),
            None => write!(f, "{:?}", self.season),
        }
    }
}
