//! HTTP client for the music library REST API

use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;

use super::catalog::{ApiError, Catalog};
use super::lenient;
use super::list_state::ListQuery;
use super::pagination::{Page, PageEnvelope};
use super::route::ViewKind;
use super::track::{Artist, RawTrack, Track};

const TRACKS_ENDPOINT: &str = "/api/music/tracks";
const FAVORITES_ENDPOINT: &str = "/api/music/favorites";
const RECENTLY_PLAYED_ENDPOINT: &str = "/api/music/recently-played";
const ARTISTS_ENDPOINT: &str = "/api/music/artists";

/// Acknowledgement body of mutating requests. May be absent entirely.
#[derive(Debug, Default, Deserialize)]
struct Ack {
    #[serde(default, deserialize_with = "lenient::flag")]
    success: Option<bool>,
    #[serde(default, deserialize_with = "lenient::string")]
    message: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    error: Option<String>,
}

/// Music library API client
#[derive(Clone)]
pub struct LibraryClient {
    http: reqwest::Client,
    base_url: Arc<str>,
}

impl LibraryClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: Arc::from(base_url.trim_end_matches('/')),
        }
    }

    fn build_url(&self, endpoint: &str, params: &[(&str, String)]) -> String {
        let mut url = format!("{}{}", self.base_url, endpoint);
        for (i, (key, value)) in params.iter().enumerate() {
            url.push(if i == 0 { '?' } else { '&' });
            url.push_str(key);
            url.push('=');
            url.push_str(&urlencoding::encode(value));
        }
        url
    }

    /// Query parameters for a list request, in the form each endpoint expects
    fn query_params(query: &ListQuery) -> Vec<(&'static str, String)> {
        let window = query.window;
        let mut params = Vec::new();

        match query.kind {
            ViewKind::RecentlyPlayed => {
                params.push(("limit", window.page_size.get().to_string()));
                params.push(("offset", window.offset().to_string()));
            }
            _ => {
                params.push(("page", window.page.to_string()));
                params.push(("pageSize", window.page_size.get().to_string()));
            }
        }
        if query.kind.supports_sort() {
            params.push(("sort", query.sort_key.wire().to_string()));
            params.push(("order", query.sort_order.wire().to_string()));
        }
        if query.kind.supports_search() && !query.search.is_empty() {
            params.push(("search", query.search.clone()));
        }
        if query.kind.supports_filters() {
            params.extend(query.filters.params());
        }
        params
    }

    fn endpoint(kind: ViewKind) -> &'static str {
        match kind {
            ViewKind::Tracks => TRACKS_ENDPOINT,
            ViewKind::Favorites => FAVORITES_ENDPOINT,
            ViewKind::RecentlyPlayed => RECENTLY_PLAYED_ENDPOINT,
            ViewKind::Artists => ARTISTS_ENDPOINT,
        }
    }

    async fn fetch_page<R, T>(
        &self,
        query: &ListQuery,
        normalize: impl Fn(R) -> T,
    ) -> Result<Page<T>, ApiError>
    where
        R: serde::de::DeserializeOwned,
    {
        let url = self.build_url(Self::endpoint(query.kind), &Self::query_params(query));
        crate::log_api_request!("fetch_page", url = %url, page = query.window.page);

        let result: Result<Page<T>, ApiError> = async {
            let resp = Self::check_status(self.http.get(&url).send().await?).await?;
            let envelope: PageEnvelope = resp
                .json()
                .await
                .map_err(|e| ApiError::Decode(e.to_string()))?;
            envelope.into_page(query.window, normalize)
        }
        .await;

        crate::log_api_result!("fetch_page", result);
        result
    }

    async fn check_status(resp: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let body = resp.text().await.unwrap_or_default();
        Err(status_error(status.as_u16(), &body))
    }

    async fn acknowledge(resp: reqwest::Response) -> Result<(), ApiError> {
        let resp = Self::check_status(resp).await?;
        let body = resp.text().await?;
        ack_from_body(&body)
    }
}

/// Error for a non-2xx reply, preferring the server's own message
fn status_error(status: u16, body: &str) -> ApiError {
    let message = serde_json::from_str::<Ack>(body)
        .ok()
        .and_then(|ack| ack.message.or(ack.error))
        .unwrap_or_else(|| body.chars().take(200).collect());
    ApiError::Status { status, message }
}

/// Interpret the body of a 2xx reply to a mutating request. Only an explicit
/// `success: false` is a failure; empty or non-JSON bodies count as done.
fn ack_from_body(body: &str) -> Result<(), ApiError> {
    if body.trim().is_empty() {
        return Ok(());
    }
    let ack: Ack = serde_json::from_str(body).unwrap_or_default();
    if ack.success == Some(false) {
        let message = ack
            .message
            .or(ack.error)
            .unwrap_or_else(|| "request was not successful".to_string());
        return Err(ApiError::Unsuccessful(message));
    }
    Ok(())
}

#[async_trait]
impl Catalog for LibraryClient {
    async fn tracks(&self, query: &ListQuery) -> Result<Page<Track>, ApiError> {
        self.fetch_page(query, Track::normalize).await
    }

    async fn favorites(&self, query: &ListQuery) -> Result<Page<Track>, ApiError> {
        self.fetch_page(query, |raw: RawTrack| {
            // Everything on this endpoint is a favorite, whether or not the
            // record says so.
            Track {
                favorite: true,
                ..Track::normalize(raw)
            }
        })
        .await
    }

    async fn recently_played(&self, query: &ListQuery) -> Result<Page<Track>, ApiError> {
        self.fetch_page(query, Track::normalize).await
    }

    async fn artists(&self, query: &ListQuery) -> Result<Page<Artist>, ApiError> {
        self.fetch_page(query, Artist::normalize).await
    }

    async fn set_favorite(&self, track_id: &str, favorite: bool) -> Result<(), ApiError> {
        if track_id.is_empty() {
            return Err(ApiError::Unsuccessful("Track has no id".to_string()));
        }
        let url = self.build_url(
            &format!("{}/{}/favorite", TRACKS_ENDPOINT, urlencoding::encode(track_id)),
            &[],
        );
        crate::log_api_request!("set_favorite", track_id, favorite);

        let result: Result<(), ApiError> = async {
            let resp = self
                .http
                .put(&url)
                .json(&serde_json::json!({ "favorite": favorite }))
                .send()
                .await?;
            Self::acknowledge(resp).await
        }
        .await;

        crate::log_api_result!("set_favorite", result);
        result
    }

    async fn record_play(&self, track_id: &str) -> Result<(), ApiError> {
        if track_id.is_empty() {
            return Err(ApiError::Unsuccessful("Track has no id".to_string()));
        }
        let url = self.build_url(
            &format!("{}/{}", RECENTLY_PLAYED_ENDPOINT, urlencoding::encode(track_id)),
            &[],
        );
        crate::log_api_request!("record_play", track_id);

        let result: Result<(), ApiError> =
            async { Self::acknowledge(self.http.post(&url).send().await?).await }.await;

        crate::log_api_result!("record_play", result);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::list_state::{ListChange, ListState, SortKey};
    use crate::model::pagination::PageSize;

    fn query(kind: ViewKind) -> ListState<Track> {
        ListState::new(kind, PageSize::Twenty)
    }

    fn params(state: &ListState<Track>) -> Vec<(&'static str, String)> {
        LibraryClient::query_params(&state.query())
    }

    #[test]
    fn build_url_strips_trailing_slash_and_encodes_values() {
        let client = LibraryClient::new("http://localhost:3000/");
        let url = client.build_url(
            TRACKS_ENDPOINT,
            &[("page", "1".to_string()), ("search", "blue moon & co".to_string())],
        );

        assert_eq!(
            url,
            "http://localhost:3000/api/music/tracks?page=1&search=blue%20moon%20%26%20co"
        );
    }

    #[test]
    fn build_url_without_params() {
        let client = LibraryClient::new("http://music.local");
        assert_eq!(
            client.build_url("/api/music/recently-played/42", &[]),
            "http://music.local/api/music/recently-played/42"
        );
    }

    #[test]
    fn tracks_query_carries_sort_search_and_filters() {
        let mut state = query(ViewKind::Tracks);
        state.apply(ListChange::Sort(SortKey::Year));
        state.apply(ListChange::Search("blue".into()));
        state.apply(ListChange::Filters("genre=Jazz; minBitrate=256".parse().unwrap()));

        let params = params(&state);

        assert_eq!(
            params,
            vec![
                ("page", "1".to_string()),
                ("pageSize", "20".to_string()),
                ("sort", "year".to_string()),
                ("order", "asc".to_string()),
                ("search", "blue".to_string()),
                ("genre", "Jazz".to_string()),
                ("minBitrate", "256".to_string()),
            ]
        );
    }

    #[test]
    fn recently_played_uses_limit_and_offset() {
        let mut state = query(ViewKind::RecentlyPlayed);
        state.pagination.page = 3;
        state.apply(ListChange::Search("moon".into()));

        assert_eq!(
            params(&state),
            vec![
                ("limit", "20".to_string()),
                ("offset", "0".to_string()),
                ("search", "moon".to_string()),
            ]
        );

        state.pagination.page = 3;
        assert_eq!(params(&state)[1], ("offset", "40".to_string()));
    }

    #[test]
    fn artists_query_is_only_paged() {
        let state = query(ViewKind::Artists);
        assert_eq!(
            params(&state),
            vec![("page", "1".to_string()), ("pageSize", "20".to_string())]
        );
    }

    #[test]
    fn favorites_query_has_sort_but_no_filters() {
        let mut state = query(ViewKind::Favorites);
        state.filters = "genre=Jazz".parse().unwrap();
        let keys: Vec<&str> = params(&state).into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["page", "pageSize", "sort", "order"]);
    }

    #[test]
    fn empty_or_plain_acknowledgements_succeed() {
        assert!(ack_from_body("").is_ok());
        assert!(ack_from_body("  \n").is_ok());
        assert!(ack_from_body("OK").is_ok());
        assert!(ack_from_body("<html>saved</html>").is_ok());
        assert!(ack_from_body(r#"{"success": true}"#).is_ok());
        assert!(ack_from_body(r#"{"favorite": true}"#).is_ok());
    }

    #[test]
    fn explicit_failure_in_acknowledgement_is_an_error() {
        let err = ack_from_body(r#"{"success": false, "message": "Track not found"}"#).unwrap_err();
        assert!(matches!(&err, ApiError::Unsuccessful(m) if m == "Track not found"));

        let err = ack_from_body(r#"{"success": "false", "error": "locked"}"#).unwrap_err();
        assert!(matches!(&err, ApiError::Unsuccessful(m) if m == "locked"));

        let err = ack_from_body(r#"{"success": false}"#).unwrap_err();
        assert!(matches!(&err, ApiError::Unsuccessful(m) if m == "request was not successful"));
    }

    #[test]
    fn status_error_prefers_server_message() {
        let err = status_error(400, r#"{"success": false, "error": "bad page"}"#);
        assert!(matches!(&err, ApiError::Status { status: 400, message } if message == "bad page"));

        let body = "x".repeat(500);
        let err = status_error(502, &body);
        assert!(matches!(&err, ApiError::Status { status: 502, message } if message.len() == 200));
    }
}
