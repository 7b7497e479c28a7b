use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Distribution type of an anime
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AnimeType {
    TV,
    Movie,
    OVA,
    ONA,
    Special,
    Unknown,
}

impl AnimeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnimeType::TV => "TV",
            AnimeType::Movie => "MOVIE",
            AnimeType::OVA => "OVA",
            AnimeType::ONA => "ONA",
            AnimeType::Special => "SPECIAL",
            AnimeType::Unknown => "UNKNOWN",
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, AnimeType::Unknown)
    }
}

impl Default for AnimeType {
    fn default() -> Self {
        AnimeType::Unknown
    }
}

impl fmt::Display for AnimeType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<&str> for AnimeType {
    fn from(s: &str) -> Self {
        match s.trim().to_uppercase().as_str() {
            "TV" => AnimeType::TV,
            "MOVIE" => AnimeType::Movie,
            "OVA" => AnimeType::OVA,
            "ONA" => AnimeType::ONA,
            "SPECIAL" => AnimeType::Special,
            _ => AnimeType::Unknown,
        }
    }
}

impl FromStr for AnimeType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(s.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(AnimeType::from("special"), AnimeType::Special);
        assert_eq!(AnimeType::from(" Movie "), AnimeType::Movie);
        assert_eq!(AnimeType::from("music"), AnimeType::Unknown);
    }

    #[test]
    fn test_serializes_uppercase() {
        assert_eq!(serde_json::to_string(&AnimeType::Special).unwrap(), "\"SPECIAL\"");
        assert_eq!(serde_json::to_string(&AnimeType::TV).unwrap(), "\"TV\"");
    }
}
