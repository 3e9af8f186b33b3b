//! Navigation and list loading

use tokio::task::JoinHandle;

use crate::model::{ActiveSection, ListChange, ListQuery, LoadOutcome, Location, RequestToken, ViewKind};
use super::AppController;

impl AppController {
    /// Show the view described by `location` and start loading it. The
    /// current view is kept for Back.
    pub async fn navigate(&self, location: Location) -> Option<JoinHandle<()>> {
        tracing::info!(%location, "Navigating");
        {
            let model = self.model.lock().await;
            model.open_location(&location).await;
            model.set_active_section(ActiveSection::MainContent).await;
        }
        self.spawn_reload().await
    }

    /// Open a top-level view, dropping the navigation history
    pub async fn navigate_root(&self, location: Location) -> Option<JoinHandle<()>> {
        tracing::info!(%location, "Opening library view");
        {
            let model = self.model.lock().await;
            model.open_library_location(&location).await;
            model.set_active_section(ActiveSection::MainContent).await;
        }
        self.spawn_reload().await
    }

    pub async fn open_library_item(&self) -> Option<JoinHandle<()>> {
        let kind = self.model.lock().await.selected_library_kind().await?;
        self.navigate_root(Location::new(kind)).await
    }

    pub async fn go_back(&self) -> Option<JoinHandle<()>> {
        if !self.model.lock().await.navigate_back().await {
            return None;
        }
        self.spawn_reload().await
    }

    /// Apply a list change; reloads only if the change took effect
    pub async fn apply_change(&self, change: ListChange) -> Option<JoinHandle<()>> {
        tracing::debug!(?change, "Applying list change");
        if !self.model.lock().await.apply_change(change).await {
            return None;
        }
        self.spawn_reload().await
    }

    pub async fn submit_search(&self) -> Option<JoinHandle<()>> {
        let query = {
            let model = self.model.lock().await;
            model.set_active_section(ActiveSection::MainContent).await;
            model.get_search_query().await
        };
        self.apply_change(ListChange::Search(query)).await
    }

    /// Issue the load token now, so tokens follow the order of user
    /// actions, and fetch in a background task.
    pub async fn spawn_reload(&self) -> Option<JoinHandle<()>> {
        let (token, query) = self.model.lock().await.begin_load().await?;
        let controller = self.clone();
        Some(tokio::spawn(async move {
            controller.complete_load(token, query).await;
        }))
    }

    /// Load the visible list and wait for it
    pub async fn reload(&self) {
        let Some((token, query)) = self.model.lock().await.begin_load().await else {
            return;
        };
        self.complete_load(token, query).await;
    }

    async fn complete_load(&self, mut token: RequestToken, mut query: ListQuery) {
        loop {
            tracing::debug!(seq = token.0, kind = ?query.kind, page = query.window.page, "Loading list");
            let outcome = self.fetch_into_model(token, &query).await;

            if outcome != LoadOutcome::Clamped {
                break;
            }
            // The list shrank under us; fetch the page we were moved back to
            match self.model.lock().await.begin_load().await {
                Some((next_token, next_query)) => {
                    token = next_token;
                    query = next_query;
                }
                None => break,
            }
        }
    }

    async fn fetch_into_model(&self, token: RequestToken, query: &ListQuery) -> LoadOutcome {
        if query.kind == ViewKind::Artists {
            let result = self.catalog.artists(query).await;
            if let Err(e) = &result {
                tracing::error!(seq = token.0, error = %e, "Failed to load artists");
            }
            let result = result.map_err(|e| e.user_message());
            return self.model.lock().await.finish_artist_load(token, result).await;
        }

        let result = match query.kind {
            ViewKind::Favorites => self.catalog.favorites(query).await,
            ViewKind::RecentlyPlayed => self.catalog.recently_played(query).await,
            _ => self.catalog.tracks(query).await,
        };
        if let Err(e) = &result {
            tracing::error!(seq = token.0, kind = ?query.kind, error = %e, "Failed to load tracks");
        }
        let result = result.map_err(|e| e.user_message());
        self.model.lock().await.finish_track_load(token, result).await
    }
}
