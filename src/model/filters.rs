//! Optional list constraints for the music list.
//!
//! Filters are edited as text in the form `genre=Jazz; yearFrom=1960`, using
//! the same key names as the backend query parameters.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Filters {
    pub genre: Option<String>,
    pub artist: Option<String>,
    pub album: Option<String>,
    pub year_from: Option<u32>,
    pub year_to: Option<u32>,
    pub decade: Option<u32>,
    pub min_bitrate: Option<u32>,
    pub max_bitrate: Option<u32>,
    pub favorite: Option<bool>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FilterError {
    #[error("expected `key=value`, got `{0}`")]
    Syntax(String),
    #[error("unknown filter `{0}`")]
    UnknownKey(String),
    #[error("`{key}` expects {expected}, got `{value}`")]
    InvalidValue {
        key: String,
        value: String,
        expected: &'static str,
    },
    #[error("yearFrom must not be after yearTo")]
    YearRange,
    #[error("minBitrate must not exceed maxBitrate")]
    BitrateRange,
}

pub const FILTER_KEYS: [&str; 9] = [
    "genre",
    "artist",
    "album",
    "yearFrom",
    "yearTo",
    "decade",
    "minBitrate",
    "maxBitrate",
    "favorite",
];

impl Filters {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Set one filter from its wire key. An empty value clears the filter.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), FilterError> {
        let value = value.trim();
        let text = || (!value.is_empty()).then(|| value.to_string());
        let number = |expected: &'static str| -> Result<Option<u32>, FilterError> {
            if value.is_empty() {
                return Ok(None);
            }
            value.parse().map(Some).map_err(|_| FilterError::InvalidValue {
                key: key.to_string(),
                value: value.to_string(),
                expected,
            })
        };

        match key {
            "genre" => self.genre = text(),
            "artist" => self.artist = text(),
            "album" => self.album = text(),
            "yearFrom" => self.year_from = number("a year")?,
            "yearTo" => self.year_to = number("a year")?,
            "decade" => {
                let decade = number("a decade such as 1980")?;
                if decade.is_some_and(|d| d % 10 != 0) {
                    return Err(FilterError::InvalidValue {
                        key: key.to_string(),
                        value: value.to_string(),
                        expected: "a decade such as 1980",
                    });
                }
                self.decade = decade;
            }
            "minBitrate" => self.min_bitrate = number("a bitrate")?,
            "maxBitrate" => self.max_bitrate = number("a bitrate")?,
            "favorite" => {
                self.favorite = match value.to_ascii_lowercase().as_str() {
                    "" => None,
                    "true" | "yes" | "1" => Some(true),
                    "false" | "no" | "0" => Some(false),
                    _ => {
                        return Err(FilterError::InvalidValue {
                            key: key.to_string(),
                            value: value.to_string(),
                            expected: "true or false",
                        });
                    }
                }
            }
            other => return Err(FilterError::UnknownKey(other.to_string())),
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), FilterError> {
        if let (Some(from), Some(to)) = (self.year_from, self.year_to) {
            if from > to {
                return Err(FilterError::YearRange);
            }
        }
        if let (Some(min), Some(max)) = (self.min_bitrate, self.max_bitrate) {
            if min > max {
                return Err(FilterError::BitrateRange);
            }
        }
        Ok(())
    }

    /// Query parameters for the constraints that are set, in wire key order
    pub fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        let mut push = |key: &'static str, value: Option<String>| {
            if let Some(value) = value {
                params.push((key, value));
            }
        };
        push("genre", self.genre.clone());
        push("artist", self.artist.clone());
        push("album", self.album.clone());
        push("yearFrom", self.year_from.map(|v| v.to_string()));
        push("yearTo", self.year_to.map(|v| v.to_string()));
        push("decade", self.decade.map(|v| v.to_string()));
        push("minBitrate", self.min_bitrate.map(|v| v.to_string()));
        push("maxBitrate", self.max_bitrate.map(|v| v.to_string()));
        push("favorite", self.favorite.map(|v| v.to_string()));
        params
    }
}

impl FromStr for Filters {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut filters = Filters::default();
        for clause in s.split(';').map(str::trim).filter(|c| !c.is_empty()) {
            let (key, value) = clause
                .split_once('=')
                .ok_or_else(|| FilterError::Syntax(clause.to_string()))?;
            filters.set(key.trim(), value)?;
        }
        filters.validate()?;
        Ok(filters)
    }
}

impl fmt::Display for Filters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let clauses: Vec<String> = self
            .params()
            .into_iter()
            .map(|(key, value)| format!("{key}={value}"))
            .collect();
        f.write_str(&clauses.join("; "))
    }
}
