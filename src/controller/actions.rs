//! User actions on the selected item

use tokio::task::JoinHandle;

use crate::model::{Location, ViewKind};
use super::AppController;

const ALBUM_FILTER: &str = "album";
const ARTIST_FILTER: &str = "artist";

impl AppController {
    /// Enter on the main content: play a track, or open an artist
    pub async fn activate_selected(&self) -> Option<JoinHandle<()>> {
        let kind = self.model.lock().await.current_kind().await?;
        if kind == ViewKind::Artists {
            self.open_selected_artist().await
        } else {
            self.play_selected().await
        }
    }

    pub async fn play_selected(&self) -> Option<JoinHandle<()>> {
        let track = self.model.lock().await.selected_track().await?;

        if let Err(e) = self.player.play_track(&track).await {
            tracing::error!(track_id = %track.id, error = %e, "Play failed");
            self.model.lock().await.set_error(Self::format_error(&e)).await;
            return None;
        }

        let model = self.model.lock().await;
        model.set_notice(format!("Playing {} - {}", track.title, track.artist)).await;
        // The play was just recorded, so a visible history is out of date
        if model.current_kind().await == Some(ViewKind::RecentlyPlayed) {
            drop(model);
            return self.spawn_reload().await;
        }
        None
    }

    pub async fn add_selected_to_playlist(&self) {
        let Some(track) = self.model.lock().await.selected_track().await else {
            return;
        };

        let result = self.player.add_to_playlist(&track).await;
        let model = self.model.lock().await;
        match result {
            Ok(true) => model.set_notice(format!("Added {} to playlist", track.title)).await,
            Ok(false) => model.set_notice(format!("{} is already in the playlist", track.title)).await,
            Err(e) => {
                tracing::error!(track_id = %track.id, error = %e, "Add to playlist failed");
                model.set_error(Self::format_error(&e)).await;
            }
        }
    }

    /// Flip the favorite flag of the selected track. Local state changes
    /// only once the server has acknowledged.
    pub async fn toggle_favorite_selected(&self) -> Option<JoinHandle<()>> {
        let track = self.model.lock().await.selected_track().await?;
        let favorite = !track.favorite;
        tracing::debug!(track_id = %track.id, favorite, "Toggling favorite");

        if let Err(e) = self.catalog.set_favorite(&track.id, favorite).await {
            self.model.lock().await.set_error(e.user_message()).await;
            return None;
        }

        let needs_reload = {
            let model = self.model.lock().await;
            let notice = if favorite {
                format!("Added {} to favorites", track.title)
            } else {
                format!("Removed {} from favorites", track.title)
            };
            model.set_notice(notice).await;
            model.reconcile_favorite(&track.id, favorite).await
        };
        if needs_reload {
            return self.spawn_reload().await;
        }
        None
    }

    /// Show the music list filtered to the selected artist
    pub async fn open_selected_artist(&self) -> Option<JoinHandle<()>> {
        let artist = self.model.lock().await.selected_artist().await?;
        if !artist.is_known() {
            return None;
        }
        self.navigate(Location::new(ViewKind::Tracks).with_param(ARTIST_FILTER, artist.name))
            .await
    }

    /// Show the music list filtered to the selected track's album
    pub async fn open_selected_album(&self) -> Option<JoinHandle<()>> {
        let track = self.model.lock().await.selected_track().await?;
        if track.album == crate::model::UNKNOWN_ALBUM {
            return None;
        }
        self.navigate(Location::new(ViewKind::Tracks).with_param(ALBUM_FILTER, track.album))
            .await
    }
}
