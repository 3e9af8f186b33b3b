//! View locations: a path plus query parameters, e.g.
//! `/tracks?artist=Nina%20Simone&page=2`.
//!
//! A location is the serialized form of a list view's state. It is shown in
//! the top bar, used as the navigation target and accepted as the configured
//! start view.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// The list views the application can show
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ViewKind {
    Tracks,
    Favorites,
    RecentlyPlayed,
    Artists,
}

impl ViewKind {
    pub const ALL: [ViewKind; 4] = [
        Self::Tracks,
        Self::Favorites,
        Self::RecentlyPlayed,
        Self::Artists,
    ];

    pub fn path(self) -> &'static str {
        match self {
            Self::Tracks => "/tracks",
            Self::Favorites => "/favorites",
            Self::RecentlyPlayed => "/recently-played",
            Self::Artists => "/artists",
        }
    }

    pub fn from_path(path: &str) -> Option<Self> {
        let path = path.trim_end_matches('/');
        Self::ALL.into_iter().find(|kind| kind.path() == path)
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::Tracks => "All Music",
            Self::Favorites => "Favorites",
            Self::RecentlyPlayed => "Recently Played",
            Self::Artists => "Artists",
        }
    }

    pub fn supports_sort(self) -> bool {
        matches!(self, Self::Tracks | Self::Favorites)
    }

    pub fn supports_search(self) -> bool {
        !matches!(self, Self::Artists)
    }

    pub fn supports_filters(self) -> bool {
        matches!(self, Self::Tracks)
    }

    pub fn shows_tracks(self) -> bool {
        !matches!(self, Self::Artists)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Location {
    pub kind: ViewKind,
    pub params: Vec<(String, String)>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LocationError {
    #[error("unknown view `{0}`")]
    UnknownPath(String),
    #[error("malformed query parameter `{0}`")]
    MalformedParam(String),
}

impl Location {
    pub fn new(kind: ViewKind) -> Self {
        Self {
            kind,
            params: Vec::new(),
        }
    }

    pub fn with_param(mut self, key: &str, value: impl Into<String>) -> Self {
        self.params.push((key.to_string(), value.into()));
        self
    }

    /// Last value given for `key`
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

impl FromStr for Location {
    type Err = LocationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (path, query) = s.split_once('?').unwrap_or((s, ""));
        let kind =
            ViewKind::from_path(path).ok_or_else(|| LocationError::UnknownPath(path.to_string()))?;

        let mut params = Vec::new();
        for pair in query.split('&').filter(|p| !p.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            let decode = |part: &str| {
                urlencoding::decode(&part.replace('+', " "))
                    .map(|d| d.into_owned())
                    .map_err(|_| LocationError::MalformedParam(pair.to_string()))
            };
            params.push((decode(key)?, decode(value)?));
        }

        Ok(Self { kind, params })
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.kind.path())?;
        for (i, (key, value)) in self.params.iter().enumerate() {
            let sep = if i == 0 { '?' } else { '&' };
            write!(
                f,
                "{sep}{}={}",
                urlencoding::encode(key),
                urlencoding::encode(value)
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_path_and_query() {
        let location: Location = "/tracks?artist=Nina%20Simone&page=2".parse().unwrap();

        assert_eq!(location.kind, ViewKind::Tracks);
        assert_eq!(location.param("artist"), Some("Nina Simone"));
        assert_eq!(location.param("page"), Some("2"));
        assert_eq!(location.param("sort"), None);
    }

    #[test]
    fn plus_decodes_to_space() {
        let location: Location = "/favorites?search=blue+moon".parse().unwrap();
        assert_eq!(location.param("search"), Some("blue moon"));
    }

    #[test]
    fn trailing_slash_and_bare_keys_are_accepted() {
        let location: Location = "/artists/?page".parse().unwrap();
        assert_eq!(location.kind, ViewKind::Artists);
        assert_eq!(location.param("page"), Some(""));
    }

    #[test]
    fn unknown_path_is_rejected() {
        assert_eq!(
            "/playlists".parse::<Location>(),
            Err(LocationError::UnknownPath("/playlists".into()))
        );
    }

    #[test]
    fn display_encodes_and_parses_back() {
        let location = Location::new(ViewKind::RecentlyPlayed)
            .with_param("search", "a&b c")
            .with_param("page", "3");
        let text = location.to_string();

        assert_eq!(text, "/recently-played?search=a%26b%20c&page=3");
        assert_eq!(text.parse::<Location>().unwrap(), location);
    }

    #[test]
    fn capabilities_per_view() {
        assert!(ViewKind::Tracks.supports_filters());
        assert!(!ViewKind::Favorites.supports_filters());
        assert!(ViewKind::Favorites.supports_sort());
        assert!(!ViewKind::RecentlyPlayed.supports_sort());
        assert!(ViewKind::RecentlyPlayed.supports_search());
        assert!(!ViewKind::Artists.supports_search());
    }
}
