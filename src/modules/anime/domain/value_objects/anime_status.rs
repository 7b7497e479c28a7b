use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AnimeStatus {
    Finished,
    Ongoing,
    Upcoming,
    Unknown,
}

impl AnimeStatus {
    pub fn display_name(&self) -> &'static str {
        match self {
            AnimeStatus::Finished => "Finished Airing",
            AnimeStatus::Ongoing => "Currently Airing",
            AnimeStatus::Upcoming => "Not Yet Aired",
            AnimeStatus::Unknown => "Unknown",
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, AnimeStatus::Unknown)
    }
}

impl Default for AnimeStatus {
    fn default() -> Self {
        AnimeStatus::Unknown
    }
}

impl fmt::Display for AnimeStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl From<&str> for AnimeStatus {
    fn from(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "finished" | "finished airing" => AnimeStatus::Finished,
            "ongoing" | "airing" | "currently airing" => AnimeStatus::Ongoing,
            "upcoming" | "not yet aired" | "not_yet_aired" => AnimeStatus::Upcoming,
            _ => AnimeStatus::Unknown,
        }
    }
}

impl FromStr for AnimeStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(s.into())
    }
}
