//! Track and artist records, raw (as sent by the backend) and display-ready

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Deserialize;

use super::lenient;

pub const UNKNOWN_TITLE: &str = "未知标题";
pub const UNKNOWN_ARTIST: &str = "未知艺术家";
pub const UNKNOWN_ALBUM: &str = "未知专辑";

/// A track exactly as the backend sent it. Every field may be missing.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTrack {
    #[serde(default, deserialize_with = "lenient::string")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub artist: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub album: Option<String>,
    #[serde(default, deserialize_with = "lenient::uint")]
    pub duration: Option<u64>,
    #[serde(default, deserialize_with = "lenient::uint")]
    pub year: Option<u64>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub genre: Option<String>,
    #[serde(default, deserialize_with = "lenient::uint")]
    pub bitrate: Option<u64>,
    #[serde(default, deserialize_with = "lenient::uint")]
    pub sample_rate: Option<u64>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub filename: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub cover_image: Option<String>,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub favorite: Option<bool>,
    #[serde(default, deserialize_with = "lenient::uint")]
    pub play_count: Option<u64>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub last_played: Option<String>,
}

/// Cover art is either embedded as a `data:` URI or referenced by URL
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CoverImage {
    Inline(String),
    Url(String),
}

impl CoverImage {
    fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        if value.is_empty() {
            None
        } else if value.starts_with("data:") {
            Some(Self::Inline(value.to_string()))
        } else {
            Some(Self::Url(value.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Inline(s) | Self::Url(s) => s,
        }
    }
}

/// Display-ready track. Zero means "unknown" for the numeric fields.
#[derive(Clone, Debug, PartialEq)]
pub struct Track {
    pub id: String,
    pub title: String,
    pub artist: String,
    pub album: String,
    pub duration_secs: u32,
    pub year: u32,
    pub genre: String,
    pub bitrate: u32,
    pub sample_rate: u32,
    pub filename: String,
    pub cover_image: Option<CoverImage>,
    pub favorite: bool,
    pub play_count: u32,
    pub last_played: Option<DateTime<Utc>>,
}

impl Track {
    /// Map a raw backend record to a display record. Never fails; missing
    /// title/artist/album get placeholders, everything else zero or empty.
    pub fn normalize(raw: RawTrack) -> Self {
        Self {
            id: raw.id.map(|id| id.trim().to_string()).unwrap_or_default(),
            title: text_or(raw.title, UNKNOWN_TITLE),
            artist: text_or(raw.artist, UNKNOWN_ARTIST),
            album: text_or(raw.album, UNKNOWN_ALBUM),
            duration_secs: lenient::to_u32(raw.duration),
            year: lenient::to_u32(raw.year),
            genre: raw.genre.map(|g| g.trim().to_string()).unwrap_or_default(),
            bitrate: lenient::to_u32(raw.bitrate),
            sample_rate: lenient::to_u32(raw.sample_rate),
            filename: raw.filename.unwrap_or_default(),
            cover_image: raw.cover_image.as_deref().and_then(CoverImage::parse),
            favorite: raw.favorite.unwrap_or(false),
            play_count: lenient::to_u32(raw.play_count),
            last_played: raw.last_played.as_deref().and_then(parse_timestamp),
        }
    }
}

impl From<&Track> for RawTrack {
    fn from(track: &Track) -> Self {
        Self {
            id: Some(track.id.clone()),
            title: Some(track.title.clone()),
            artist: Some(track.artist.clone()),
            album: Some(track.album.clone()),
            duration: Some(track.duration_secs.into()),
            year: Some(track.year.into()),
            genre: Some(track.genre.clone()),
            bitrate: Some(track.bitrate.into()),
            sample_rate: Some(track.sample_rate.into()),
            filename: Some(track.filename.clone()),
            cover_image: track.cover_image.as_ref().map(|c| c.as_str().to_string()),
            favorite: Some(track.favorite),
            play_count: Some(track.play_count.into()),
            last_played: track.last_played.map(|t| t.to_rfc3339()),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawArtist {
    #[serde(default, deserialize_with = "lenient::string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient::uint")]
    pub track_count: Option<u64>,
    #[serde(default, deserialize_with = "lenient::uint")]
    pub album_count: Option<u64>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub cover_image: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Artist {
    pub name: String,
    pub track_count: u32,
    pub album_count: u32,
    pub cover_image: Option<CoverImage>,
}

impl Artist {
    pub fn normalize(raw: RawArtist) -> Self {
        Self {
            name: text_or(raw.name, UNKNOWN_ARTIST),
            track_count: lenient::to_u32(raw.track_count),
            album_count: lenient::to_u32(raw.album_count),
            cover_image: raw.cover_image.as_deref().and_then(CoverImage::parse),
        }
    }

    /// Whether the name is a real artist name rather than the placeholder
    pub fn is_known(&self) -> bool {
        self.name != UNKNOWN_ARTIST
    }
}

fn text_or(value: Option<String>, placeholder: &str) -> String {
    match value {
        Some(s) if !s.trim().is_empty() => s.trim().to_string(),
        _ => placeholder.to_string(),
    }
}

fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S")
        .ok()
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(json: &str) -> RawTrack {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn missing_title_gets_placeholder() {
        let track = Track::normalize(raw(r#"{"id": "t1", "artist": "Nina Simone"}"#));

        assert_eq!(track.title, UNKNOWN_TITLE);
        assert_eq!(track.artist, "Nina Simone");
        assert_eq!(track.album, UNKNOWN_ALBUM);
    }

    #[test]
    fn blank_text_counts_as_missing() {
        let track = Track::normalize(raw(r#"{"title": "   ", "artist": ""}"#));

        assert_eq!(track.title, UNKNOWN_TITLE);
        assert_eq!(track.artist, UNKNOWN_ARTIST);
    }

    #[test]
    fn empty_record_normalizes_to_defaults() {
        let track = Track::normalize(RawTrack::default());

        assert_eq!(track.id, "");
        assert_eq!(track.duration_secs, 0);
        assert_eq!(track.year, 0);
        assert!(!track.favorite);
        assert!(track.cover_image.is_none());
        assert!(track.last_played.is_none());
    }

    #[test]
    fn full_record_keeps_all_fields() {
        let track = Track::normalize(raw(
            r#"{
                "id": 17,
                "title": "Sinnerman",
                "artist": "Nina Simone",
                "album": "Pastel Blues",
                "duration": "622",
                "year": 1965,
                "genre": "Jazz",
                "bitrate": 320,
                "sampleRate": 44100,
                "filename": "sinnerman.flac",
                "coverImage": "data:image/png;base64,AAAA",
                "favorite": 1,
                "playCount": 12,
                "lastPlayed": "2024-03-01T10:20:30Z"
            }"#,
        ));

        assert_eq!(track.id, "17");
        assert_eq!(track.duration_secs, 622);
        assert_eq!(track.year, 1965);
        assert_eq!(track.sample_rate, 44100);
        assert!(track.favorite);
        assert_eq!(track.play_count, 12);
        assert!(matches!(track.cover_image, Some(CoverImage::Inline(_))));
        assert_eq!(
            track.last_played.map(|t| t.to_rfc3339()),
            Some("2024-03-01T10:20:30+00:00".to_string())
        );
    }

    #[test]
    fn cover_urls_are_distinguished_from_inline_images() {
        let track = Track::normalize(raw(r#"{"coverImage": "/covers/17.jpg"}"#));
        assert_eq!(track.cover_image, Some(CoverImage::Url("/covers/17.jpg".into())));
    }

    #[test]
    fn sql_style_timestamps_are_accepted() {
        let track = Track::normalize(raw(r#"{"lastPlayed": "2024-03-01 10:20:30"}"#));
        assert!(track.last_played.is_some());

        let track = Track::normalize(raw(r#"{"lastPlayed": "yesterday"}"#));
        assert!(track.last_played.is_none());
    }

    #[test]
    fn normalizing_twice_is_a_no_op() {
        let inputs = [
            "{}",
            r#"{"title": "Sinnerman", "year": "1965", "lastPlayed": "2024-03-01 10:20:30"}"#,
            r#"{"id": " 9 ", "album": " Blue ", "coverImage": "https://x/y.jpg", "favorite": true}"#,
        ];
        for input in inputs {
            let once = Track::normalize(raw(input));
            let twice = Track::normalize(RawTrack::from(&once));
            assert_eq!(once, twice, "input: {input}");
        }
    }

    #[test]
    fn artist_placeholder() {
        let artist = Artist::normalize(RawArtist {
            track_count: Some(3),
            ..Default::default()
        });
        assert_eq!(artist.name, UNKNOWN_ARTIST);
        assert!(!artist.is_known());
        assert_eq!(artist.track_count, 3);
    }
}
