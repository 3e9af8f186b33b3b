//! The music catalog seen by the application: list endpoints and mutations.
//!
//! The controller only talks to the backend through [`Catalog`], so views can
//! be driven by the HTTP client in production and by in-memory fakes in
//! tests.

use async_trait::async_trait;
use thiserror::Error;

use super::list_state::ListQuery;
use super::pagination::Page;
use super::track::{Artist, Track};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server returned {status}: {message}")]
    Status { status: u16, message: String },
    #[error("request was not successful: {0}")]
    Unsuccessful(String),
    #[error("unexpected response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Message suitable for showing to the user
    pub fn user_message(&self) -> String {
        match self {
            Self::Http(e) if e.is_connect() => {
                "Cannot reach the music library server. Is it running?".to_string()
            }
            Self::Http(e) if e.is_timeout() => "The music library server timed out.".to_string(),
            Self::Http(e) if e.is_decode() => {
                "The server sent a response that could not be read.".to_string()
            }
            Self::Http(e) => format!("Network error: {}", e),
            Self::Status { status: 401, .. } => "Not signed in to the music library.".to_string(),
            Self::Status { status: 403, .. } => "Not allowed to do that.".to_string(),
            Self::Status { status: 404, .. } => "Not found on the server.".to_string(),
            Self::Status { status: 429, .. } => "Too many requests. Please wait a moment.".to_string(),
            Self::Status { status, .. } if *status >= 500 => {
                format!("The server failed to handle the request ({}).", status)
            }
            Self::Status { status, message } => format!("Request failed ({}): {}", status, message),
            Self::Unsuccessful(message) => message.clone(),
            Self::Decode(message) => format!("Unexpected response from server: {}", message),
        }
    }
}

#[async_trait]
pub trait Catalog: Send + Sync {
    async fn tracks(&self, query: &ListQuery) -> Result<Page<Track>, ApiError>;

    async fn favorites(&self, query: &ListQuery) -> Result<Page<Track>, ApiError>;

    async fn recently_played(&self, query: &ListQuery) -> Result<Page<Track>, ApiError>;

    async fn artists(&self, query: &ListQuery) -> Result<Page<Artist>, ApiError>;

    /// Set the favorite flag of a track. `Ok` means the server acknowledged.
    async fn set_favorite(&self, track_id: &str, favorite: bool) -> Result<(), ApiError>;

    /// Record that a track was played
    async fn record_play(&self, track_id: &str) -> Result<(), ApiError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_errors_map_to_friendly_messages() {
        let err = ApiError::Status {
            status: 404,
            message: "no such track".into(),
        };
        assert_eq!(err.user_message(), "Not found on the server.");

        let err = ApiError::Status {
            status: 503,
            message: String::new(),
        };
        assert!(err.user_message().contains("503"));

        let err = ApiError::Status {
            status: 418,
            message: "teapot".into(),
        };
        assert_eq!(err.user_message(), "Request failed (418): teapot");
    }

    #[test]
    fn unsuccessful_passes_server_message_through() {
        let err = ApiError::Unsuccessful("database offline".into());
        assert_eq!(err.user_message(), "database offline");
    }
}
