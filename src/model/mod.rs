//! Model module - Application state and data types
//!
//! - `track`: raw and display-ready track/artist records, the normalizer
//! - `pagination`: page sizes, pagination metadata, the wire page envelope
//! - `filters`, `route`: filter sets and view locations
//! - `list_state`: per-view list state and load sequencing
//! - `catalog`, `library_client`: backend access and its HTTP implementation
//! - `playback`: the player collaborator
//! - `types`, `content`, `app_model`: UI state and the application model

mod app_model;
mod catalog;
mod content;
mod filters;
mod lenient;
mod library_client;
mod list_state;
mod pagination;
mod playback;
mod route;
mod track;
mod types;

pub use app_model::AppModel;
pub use catalog::{ApiError, Catalog};
pub use content::{ContentState, ContentView};
pub use filters::{FILTER_KEYS, Filters};
pub use library_client::LibraryClient;
pub use list_state::{ListChange, ListQuery, ListState, LoadOutcome, RequestToken, SortKey};
pub use pagination::{Page, PageSize, Pagination};
pub use playback::{PlaybackInfo, Player, SessionPlayer};
pub use route::{Location, ViewKind};
pub use track::{Artist, Track, UNKNOWN_ALBUM};
pub use types::{ActiveSection, UiState};

#[cfg(test)]
pub use track::{RawArtist, RawTrack};
